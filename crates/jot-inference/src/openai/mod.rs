//! OpenAI-compatible chat backend.
//!
//! This module provides a chat backend that works with any OpenAI-compatible
//! API endpoint, including:
//!
//! - OpenAI cloud API
//! - Azure OpenAI
//! - Ollama (in OpenAI compatibility mode)
//! - vLLM
//! - LocalAI
//! - LM Studio
//!
//! # Example
//!
//! ```rust,no_run
//! use jot_inference::openai::{OpenAIBackend, OpenAIConfig};
//! use jot_core::{ChatBackend, ChatMessage, ChatOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables
//!     let backend = OpenAIBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         api_key: None, // Not needed for local
//!         model: "llama3".to_string(),
//!         timeout_seconds: 120,
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!
//!     let messages = vec![ChatMessage::user("Hello, world!")];
//!     let completion = backend.chat(&messages, &ChatOptions::default()).await.unwrap();
//!     println!("{}", completion.content);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    OpenAIBackend, OpenAIConfig, DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::{to_jot_error, OpenAIErrorCode};
pub use types::*;
