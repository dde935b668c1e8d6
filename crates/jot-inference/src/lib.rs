//! # jot-inference
//!
//! Chat-completion backend abstraction for jot.
//!
//! This crate provides:
//! - An OpenAI-compatible implementation of the [`jot_core::ChatBackend`] trait
//! - Typed classification of provider failures (rate limit, auth) so callers
//!   never have to substring-match error messages
//! - A scripted mock backend for deterministic tests (feature `mock`)

pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use jot_core::*;

pub use openai::{OpenAIBackend, OpenAIConfig};
