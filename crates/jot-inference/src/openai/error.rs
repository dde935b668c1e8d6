//! OpenAI-specific error classification.
//!
//! The provider reports failures with an HTTP status plus a structured error
//! body. Classification happens here, once, off those typed fields — the
//! HTTP layer upstream maps the resulting variants to response codes without
//! ever inspecting message text.

use jot_core::Error;

/// OpenAI-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl OpenAIErrorCode {
    /// Determine error code from HTTP status and the body's error code/type.
    pub fn from_response(status: u16, error_type: &str, code: Option<&str>) -> Self {
        match (status, code) {
            (401 | 403, _) | (_, Some("invalid_api_key")) => Self::AuthenticationError,
            (429, _) | (_, Some("rate_limit_exceeded")) => Self::RateLimitExceeded,
            (404, _) | (_, Some("model_not_found")) => Self::ModelNotFound,
            (500..=599, _) => Self::ServerError,
            _ => {
                if error_type == "authentication_error" {
                    Self::AuthenticationError
                } else {
                    Self::Unknown
                }
            }
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::ServerError)
    }
}

/// Convert a classified OpenAI error into a jot Error.
pub fn to_jot_error(code: OpenAIErrorCode, message: &str) -> Error {
    match code {
        OpenAIErrorCode::AuthenticationError => Error::Unauthorized(message.to_string()),
        OpenAIErrorCode::RateLimitExceeded => Error::RateLimited(message.to_string()),
        OpenAIErrorCode::ModelNotFound => Error::Config(format!("Model not found: {}", message)),
        OpenAIErrorCode::ServerError => Error::Inference(format!("Server error: {}", message)),
        OpenAIErrorCode::Unknown => Error::Inference(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_401() {
        let code = OpenAIErrorCode::from_response(401, "invalid_request_error", None);
        assert_eq!(code, OpenAIErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_from_invalid_api_key_code() {
        let code = OpenAIErrorCode::from_response(400, "invalid_request_error", Some("invalid_api_key"));
        assert_eq!(code, OpenAIErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_from_429() {
        let code = OpenAIErrorCode::from_response(429, "rate_limit_error", None);
        assert_eq!(code, OpenAIErrorCode::RateLimitExceeded);
    }

    #[test]
    fn test_error_code_from_404() {
        let code = OpenAIErrorCode::from_response(404, "invalid_request_error", Some("model_not_found"));
        assert_eq!(code, OpenAIErrorCode::ModelNotFound);
    }

    #[test]
    fn test_error_code_from_500() {
        let code = OpenAIErrorCode::from_response(500, "server_error", None);
        assert_eq!(code, OpenAIErrorCode::ServerError);
    }

    #[test]
    fn test_retryable() {
        assert!(OpenAIErrorCode::RateLimitExceeded.is_retryable());
        assert!(OpenAIErrorCode::ServerError.is_retryable());
        assert!(!OpenAIErrorCode::AuthenticationError.is_retryable());
    }

    #[test]
    fn test_to_jot_error_rate_limited() {
        let err = to_jot_error(OpenAIErrorCode::RateLimitExceeded, "slow down");
        assert!(matches!(err, Error::RateLimited(_)));
    }

    #[test]
    fn test_to_jot_error_unauthorized() {
        let err = to_jot_error(OpenAIErrorCode::AuthenticationError, "bad key");
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_to_jot_error_unknown_is_inference() {
        let err = to_jot_error(OpenAIErrorCode::Unknown, "weird");
        assert!(matches!(err, Error::Inference(_)));
    }
}
