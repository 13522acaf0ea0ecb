//! Paste HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snipbin_core::models::paste::CreatePasteRequest;
use snipbin_core::AppError;

const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Derive the rate-limit key for a request.
///
/// First hop of `x-forwarded-for`, then `x-real-ip`, then a shared
/// `unknown` bucket. Proxy headers are spoofable; the limiter is
/// advisory, so that is an accepted trade-off.
fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_hop) = forwarded.split(',').next() {
            let trimmed = first_hop.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let trimmed = real_ip.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    "unknown".to_string()
}

/// Create a new paste.
///
/// # Returns
/// `{"id": "<id>"}` plus rate-limit headers.
///
/// # Errors
/// Returns an error response if the client is rate limited or
/// validation/persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePasteRequest>,
) -> Result<Response, HttpError> {
    let decision = state.limiter.check(&client_key(&headers));
    if !decision.allowed {
        return Ok((
            StatusCode::TOO_MANY_REQUESTS,
            [
                (header::RETRY_AFTER.as_str(), state.limiter.window_secs().to_string()),
                (RATE_LIMIT_LIMIT_HEADER, state.limiter.limit().to_string()),
                (RATE_LIMIT_REMAINING_HEADER, "0".to_string()),
            ],
            Json(json!({ "error": "Too many requests. Please try again later." })),
        )
            .into_response());
    }

    let paste = state.service.create_paste(req)?;
    Ok((
        [
            (RATE_LIMIT_LIMIT_HEADER, state.limiter.limit().to_string()),
            (RATE_LIMIT_REMAINING_HEADER, decision.remaining.to_string()),
        ],
        Json(json!({ "id": paste.id })),
    )
        .into_response())
}

/// Fetch a paste by id as JSON.
///
/// # Errors
/// 404 for malformed ids, missing pastes, and expired pastes alike.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    state
        .service
        .get_paste(&id)?
        .map(|paste| Json(paste).into_response())
        .ok_or_else(|| AppError::NotFound.into())
}

/// Fetch the raw content of a paste as plain text.
pub async fn get_paste_raw(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    state
        .service
        .get_paste(&id)?
        .map(|paste| {
            (
                [(header::CONTENT_TYPE.as_str(), "text/plain; charset=utf-8")],
                paste.content,
            )
                .into_response()
        })
        .ok_or_else(|| AppError::NotFound.into())
}

/// Delete a paste by id. Idempotent.
pub async fn delete_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.service.delete_paste(&id)?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::client_key;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn client_key_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(client_key(&headers), "203.0.113.9");
    }

    #[test]
    fn client_key_falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static(" 198.51.100.4 "));
        assert_eq!(client_key(&headers), "198.51.100.4");

        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn empty_forwarded_header_does_not_mask_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(client_key(&headers), "198.51.100.4");
    }
}
