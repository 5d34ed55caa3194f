//! Waitlist signup endpoints - in-memory store, no email service wired in

use crate::error::ApiError;
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub email: String,
    pub name: String,
    pub investment_type: Option<String>,
    pub experience: Option<String>,
    pub interests: Vec<String>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct WaitlistStore {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl WaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, entry: WaitlistEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn total_signups(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn today_signups(&self) -> usize {
        let today = Utc::now().date_naive();
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.joined_at.date_naive() == today)
            .count()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub investment_type: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// POST /api/waitlist/join
pub async fn join(
    State(state): State<AppState>,
    Json(body): Json<JoinBody>,
) -> Result<Json<Value>, ApiError> {
    let mut details = Vec::new();

    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| looks_like_email(e));
    if email.is_none() {
        details.push("Valid email is required".to_string());
    }

    let name = body.name.as_deref().map(str::trim).filter(|n| n.len() >= 2);
    if name.is_none() {
        details.push("Name is required".to_string());
    }

    let (email, name) = match (email, name) {
        (Some(email), Some(name)) => (email.to_string(), name.to_string()),
        _ => return Err(ApiError::Validation(details)),
    };

    let joined_at = Utc::now();
    state.waitlist.add(WaitlistEntry {
        email: email.clone(),
        name: name.clone(),
        investment_type: body.investment_type,
        experience: body.experience,
        interests: body.interests.unwrap_or_default(),
        joined_at,
    });

    info!("New waitlist signup: {} ({})", email, name);

    Ok(Json(json!({
        "success": true,
        "message": "Successfully joined the waitlist",
        "data": {
            "email": email,
            "name": name,
            "joinedAt": joined_at,
        },
    })))
}

/// GET /api/waitlist/stats
pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "totalSignups": state.waitlist.total_signups(),
        "todaySignups": state.waitlist.today_signups(),
        "topInterests": [
            "Unlimited property searches",
            "Real-time deal alerts",
            "Portfolio management tools",
        ],
        "topStrategies": [
            "Buy & Hold Rental",
            "Fix & Flip",
            "BRRRR Strategy",
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("investor@example.com"));
        assert!(!looks_like_email("investor"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("investor@nodot"));
    }

    #[test]
    fn test_store_counts() {
        let store = WaitlistStore::new();
        assert_eq!(store.total_signups(), 0);

        store.add(WaitlistEntry {
            email: "investor@example.com".to_string(),
            name: "Jordan".to_string(),
            investment_type: None,
            experience: None,
            interests: vec![],
            joined_at: Utc::now(),
        });

        assert_eq!(store.total_signups(), 1);
        assert_eq!(store.today_signups(), 1);
    }
}
