//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// API-level error with a definite HTTP status.
///
/// Extraction failures arrive as typed [`jot_core::Error`] variants, so the
/// status mapping here never inspects message text: rate limits become 429,
/// provider credential failures become 401, everything else unexpected is a
/// 500.
#[derive(Debug)]
pub enum ApiError {
    Internal(jot_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    RateLimited(String),
}

impl From<jot_core::Error> for ApiError {
    fn from(err: jot_core::Error) -> Self {
        use jot_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note {} not found", id)),
            Error::TaskNotFound(id) => ApiError::NotFound(format!("Task {} not found", id)),
            Error::AreaNotFound(id) => ApiError::NotFound(format!("Area {} not found", id)),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::RateLimited(msg) => ApiError::RateLimited(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
