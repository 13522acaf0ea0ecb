//! HTTP error mapping for API handlers.
//!
//! Only validation-category errors carry specific text back to the
//! caller; everything internal collapses to an opaque message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snipbin_core::AppError;

/// Wrapper that maps [`AppError`] onto HTTP responses.
pub struct HttpError(AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ContentTooLarge(max) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Content too large. Maximum size is {} characters", max),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::CapacityExceeded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage is temporarily full. Please try again later.".to_string(),
            ),
            AppError::IdentifierExhausted => {
                tracing::error!("Paste id allocation exhausted its retry budget");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
