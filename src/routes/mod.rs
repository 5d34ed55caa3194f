//! HTTP route handlers, shared application state and router assembly

pub mod property;
pub mod waitlist;

use crate::analysis::orchestrator::AnalysisOrchestrator;
use crate::analytics::AnalyticsStore;
use crate::routes::waitlist::WaitlistStore;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub analytics: Arc<AnalyticsStore>,
    pub waitlist: Arc<WaitlistStore>,
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/property/analyze", post(property::analyze))
        .route("/api/property/popular", get(property::popular))
        .route("/api/property/trending", get(property::trending))
        .route("/api/property/insights", get(property::insights))
        .route("/api/waitlist/join", post(waitlist::join))
        .route("/api/waitlist/stats", get(waitlist::stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
