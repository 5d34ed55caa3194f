//! Property analysis and analytics endpoints

use crate::analysis::types::{AnalysisRequest, Strategy};
use crate::error::ApiError;
use crate::routes::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// Raw analyze body - fields land as strings so validation can produce
/// field-level messages instead of a deserialization error
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Validate the raw body into an AnalysisRequest, collecting every
/// field-level failure. Rejected requests never reach a gateway.
fn validate(body: &AnalyzeBody) -> Result<AnalysisRequest, ApiError> {
    let mut details = Vec::new();

    let address = body
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| a.len() >= 5);
    if address.is_none() {
        details.push("Valid address is required".to_string());
    }

    let strategy = body.strategy.as_deref().and_then(Strategy::parse);
    if strategy.is_none() {
        details.push("Valid strategy is required".to_string());
    }

    match (address, strategy) {
        (Some(address), Some(strategy)) => Ok(AnalysisRequest {
            address: address.to_string(),
            strategy,
        }),
        _ => Err(ApiError::Validation(details)),
    }
}

/// POST /api/property/analyze
pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<Value>, ApiError> {
    let request = validate(&body)?;

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state
        .analytics
        .track_search(&request.address, request.strategy, user_agent);

    let result = state.orchestrator.analyze(&request).await?;

    Ok(Json(json!({
        "success": true,
        "data": result,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// GET /api/property/popular
pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Value> {
    let limit = query.limit.unwrap_or(10);
    let popular = state.analytics.popular_addresses(limit);

    Json(json!({
        "success": true,
        "data": popular,
    }))
}

/// GET /api/property/trending
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Value> {
    let limit = query.limit.unwrap_or(5);
    let trending = state.analytics.trending_areas(limit);

    Json(json!({
        "success": true,
        "data": trending,
    }))
}

/// GET /api/property/insights
pub async fn insights(State(state): State<AppState>) -> Json<Value> {
    let insights = state.analytics.marketing_insights();
    info!("Marketing insights generated");

    Json(json!({
        "success": true,
        "data": insights,
    }))
}
