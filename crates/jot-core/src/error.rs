//! Error types for jot.

use thiserror::Error;

/// Result type alias using jot's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(uuid::Uuid),

    /// Area not found
    #[error("Area not found: {0}")]
    AreaNotFound(uuid::Uuid),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// The model returned an empty completion (no choices or empty content).
    ///
    /// Distinct from [`Error::Extraction`] so callers can tell "the model
    /// declined" from "the model replied with garbage".
    #[error("Model returned no content")]
    EmptyCompletion,

    /// The model's reply could not be parsed as JSON.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The model's reply parsed as JSON but was not a JSON object.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The inference provider rejected the request for rate-limit reasons.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_note_not_found() {
        let id = Uuid::nil();
        let err = Error::NoteNotFound(id);
        assert_eq!(err.to_string(), format!("Note not found: {}", id));
    }

    #[test]
    fn test_error_display_task_not_found() {
        let id = Uuid::new_v4();
        let err = Error::TaskNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_error_display_area_not_found() {
        let id = Uuid::new_v4();
        let err = Error::AreaNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model timeout".to_string());
        assert_eq!(err.to_string(), "Inference error: model timeout");
    }

    #[test]
    fn test_error_display_empty_completion() {
        let err = Error::EmptyCompletion;
        assert_eq!(err.to_string(), "Model returned no content");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("not json".to_string());
        assert_eq!(err.to_string(), "Extraction error: not json");
    }

    #[test]
    fn test_error_display_malformed_response() {
        let err = Error::MalformedResponse("expected object, got array".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed model response: expected object, got array"
        );
    }

    #[test]
    fn test_error_display_rate_limited() {
        let err = Error::RateLimited("retry after 20s".to_string());
        assert_eq!(err.to_string(), "Rate limited: retry after 20s");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty text".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty text");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid token");
    }

    #[test]
    fn test_empty_completion_distinct_from_extraction() {
        // Callers match on the variant to distinguish "declined" from "garbage".
        let declined = Error::EmptyCompletion;
        let garbage = Error::Extraction("exuberant prose".to_string());
        assert!(matches!(declined, Error::EmptyCompletion));
        assert!(matches!(garbage, Error::Extraction(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        let result = get_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::NotFound("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }
}
