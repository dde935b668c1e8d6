//! API key authentication middleware.
//!
//! Every `/api` route requires the configured backend key, presented either
//! as `X-API-Key: <key>` or `Authorization: Bearer <key>`. There is no
//! per-user account system; the key gates the whole API.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Pull the presented API key out of the request headers.
///
/// `X-API-Key` wins over `Authorization`; a `Bearer ` prefix is stripped,
/// a bare key is accepted as-is.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get("x-api-key")
        .or_else(|| headers.get("authorization"))?
        .to_str()
        .ok()?;

    let key = match raw.strip_prefix("Bearer ") {
        Some(rest) => rest.trim(),
        None => raw.trim(),
    };

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Reject requests that do not present the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match extract_api_key(request.headers()) {
        Some(key) if key == *state.api_key => next.run(request).await,
        _ => {
            debug!("Rejected request with missing or invalid API key");
            ApiError::Unauthorized(
                "Invalid or missing API key. Send X-API-Key or Authorization: Bearer <key>."
                    .to_string(),
            )
            .into_response()
        }
    }
}
