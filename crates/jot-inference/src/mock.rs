//! Scripted mock chat backend for deterministic testing.
//!
//! Responses are scripted, not randomized: tests enqueue the exact outcomes
//! they want, in order, and can assert on the recorded requests afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use jot_inference::mock::MockChatBackend;
//! use jot_core::{ChatBackend, ChatMessage, ChatOptions};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = MockChatBackend::new().with_response(r#"{"title":"Hi"}"#);
//! let completion = backend
//!     .chat(&[ChatMessage::user("note text")], &ChatOptions::default())
//!     .await
//!     .unwrap();
//! assert_eq!(completion.content, r#"{"title":"Hi"}"#);
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use jot_core::{ChatBackend, ChatCompletion, ChatMessage, ChatOptions, Error, Result};

/// A single recorded chat call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub options: ChatOptions,
}

#[derive(Default)]
struct MockState {
    /// Scripted outcomes consumed front-to-back before the default applies.
    script: VecDeque<Result<String>>,
    default_response: Option<String>,
    calls: Vec<RecordedCall>,
    healthy: bool,
}

/// Mock chat backend for testing.
#[derive(Clone)]
pub struct MockChatBackend {
    state: Arc<Mutex<MockState>>,
    model: String,
}

impl MockChatBackend {
    /// Create a new mock backend with no scripted responses.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                healthy: true,
                ..Default::default()
            })),
            model: "mock-model".to_string(),
        }
    }

    /// Set the default response returned when the script is exhausted.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.state.lock().unwrap().default_response = Some(content.into());
        self
    }

    /// Enqueue one successful scripted response.
    pub fn push_response(&self, content: impl Into<String>) {
        self.state.lock().unwrap().script.push_back(Ok(content.into()));
    }

    /// Enqueue one scripted failure.
    pub fn push_error(&self, error: Error) {
        self.state.lock().unwrap().script.push_back(Err(error));
    }

    /// Set the health check result.
    pub fn with_healthy(self, healthy: bool) -> Self {
        self.state.lock().unwrap().healthy = healthy;
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of chat calls made.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatCompletion> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        let outcome = state
            .script
            .pop_front()
            .unwrap_or_else(|| match &state.default_response {
                Some(content) => Ok(content.clone()),
                None => Err(Error::EmptyCompletion),
            });

        outcome.map(|content| ChatCompletion {
            content,
            usage: None,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.state.lock().unwrap().healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let backend = MockChatBackend::new().with_response("hello");
        let completion = backend
            .chat(&[ChatMessage::user("x")], &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.content, "hello");
    }

    #[tokio::test]
    async fn test_scripted_responses_consumed_in_order() {
        let backend = MockChatBackend::new().with_response("default");
        backend.push_response("first");
        backend.push_error(Error::RateLimited("scripted".to_string()));

        let first = backend
            .chat(&[ChatMessage::user("a")], &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(first.content, "first");

        let second = backend
            .chat(&[ChatMessage::user("b")], &ChatOptions::default())
            .await;
        assert!(matches!(second, Err(Error::RateLimited(_))));

        let third = backend
            .chat(&[ChatMessage::user("c")], &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(third.content, "default");
    }

    #[tokio::test]
    async fn test_unscripted_backend_declines() {
        let backend = MockChatBackend::new();
        let result = backend
            .chat(&[ChatMessage::user("x")], &ChatOptions::default())
            .await;
        assert!(matches!(result, Err(Error::EmptyCompletion)));
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let backend = MockChatBackend::new().with_response("ok");
        let options = ChatOptions {
            temperature: Some(0.3),
            json_object: true,
            ..Default::default()
        };
        backend
            .chat(&[ChatMessage::system("sys"), ChatMessage::user("usr")], &options)
            .await
            .unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 2);
        assert_eq!(calls[0].messages[1].content, "usr");
        assert!(calls[0].options.json_object);
    }

    #[tokio::test]
    async fn test_health_check() {
        let healthy = MockChatBackend::new();
        assert!(healthy.health_check().await.unwrap());

        let unhealthy = MockChatBackend::new().with_healthy(false);
        assert!(!unhealthy.health_check().await.unwrap());
    }
}
