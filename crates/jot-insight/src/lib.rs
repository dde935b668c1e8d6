//! # jot-insight
//!
//! The note insight pipeline: extraction and materialization.
//!
//! [`InsightExtractor`] turns free-text note content (plus the caller's area
//! list) into a bounded, validated [`jot_core::NoteInsight`] via one chat
//! completion. [`TaskMaterializer`] turns that insight into one persisted
//! note and a sequence of linked tasks, tolerating partial failure.
//!
//! Extraction failures are typed: transport/provider errors pass through
//! unchanged, an empty completion is [`jot_core::Error::EmptyCompletion`],
//! non-JSON replies are [`jot_core::Error::Extraction`], and JSON non-objects
//! are [`jot_core::Error::MalformedResponse`]. Individual malformed fields
//! never fail an extraction; they degrade to safe defaults.

pub mod extract;
pub mod materialize;
pub mod prompt;

// Re-export core types
pub use jot_core::*;

pub use extract::{parse_insight, InsightExtractor};
pub use materialize::TaskMaterializer;
pub use prompt::{build_system_prompt, user_content, PROMPT_VERSION};
