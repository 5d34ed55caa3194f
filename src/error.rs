//! API error taxonomy and HTTP response mapping
//!
//! Only validation failures and property-data unavailability reach the HTTP
//! boundary as errors. Everything downstream of the LLM call degrades to a
//! fallback result instead of failing.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request, rejected before any gateway call
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Upstream property provider unreachable and no fallback permitted
    #[error("Property data unavailable: {0}")]
    PropertyDataUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Validation failed",
                    "details": details,
                })),
            )
                .into_response(),
            ApiError::PropertyDataUnavailable(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Analysis failed",
                    "message": message,
                })),
            )
                .into_response(),
            ApiError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Analysis failed",
                    "message": err.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
