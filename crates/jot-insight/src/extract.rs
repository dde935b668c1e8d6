//! Note insight extraction.
//!
//! Turns free-text note content (plus an optional area list) into a
//! [`NoteInsight`] via one chat-completion call. Parsing is a typed two-stage
//! affair: total failures (non-JSON, non-object) are fatal and carry their
//! own error variants; individual field anomalies degrade to safe defaults
//! through pure per-field coercions that never fail. A garbled title must not
//! discard a valid set of action items.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use jot_core::defaults::{
    INSIGHT_MAX_TOKENS, INSIGHT_TEMPERATURE, TITLE_MAX_CHARS, TITLE_MAX_WORDS,
};
use jot_core::{Area, ChatBackend, ChatMessage, ChatOptions, Error, NoteInsight, Result};

use crate::prompt::{build_system_prompt, user_content};

/// Extracts structured insights from note text.
pub struct InsightExtractor {
    backend: Arc<dyn ChatBackend>,
}

impl InsightExtractor {
    /// Create an extractor over the given chat backend.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Extract a [`NoteInsight`] from `content`.
    ///
    /// `areas` is an immutable lookup table for this one call; the model's
    /// area choice is resolved against it and never invents new areas.
    ///
    /// Transport and provider failures propagate unchanged. A reply that is
    /// not JSON fails with [`Error::Extraction`]; valid JSON that is not an
    /// object fails with [`Error::MalformedResponse`]. No partial insight is
    /// ever returned from those paths.
    pub async fn extract(&self, content: &str, areas: &[Area]) -> Result<NoteInsight> {
        let system = build_system_prompt(areas);
        let user = user_content(content);
        let messages = [ChatMessage::system(system.as_str()), ChatMessage::user(user)];

        // Fixed, not caller-configurable: low temperature for deterministic
        // structure, a generous token ceiling so long action-item lists
        // survive, and a JSON-object response constraint.
        let options = ChatOptions {
            model: None,
            temperature: Some(INSIGHT_TEMPERATURE),
            max_tokens: Some(INSIGHT_MAX_TOKENS),
            json_object: true,
        };

        debug!(
            prompt_len = system.len(),
            area_count = areas.len(),
            "Requesting note insight"
        );

        let start = Instant::now();
        let completion = self.backend.chat(&messages, &options).await?;

        let insight = parse_insight(&completion.content, areas)?;
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = completion.content.len(),
            item_count = insight.action_items.len(),
            "Extracted note insight"
        );
        Ok(insight)
    }
}

/// Parse and validate a raw model reply into a [`NoteInsight`].
///
/// Pure function of the raw text and the area list; fatal only on non-JSON
/// or non-object replies.
pub fn parse_insight(raw: &str, areas: &[Area]) -> Result<NoteInsight> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::Extraction(format!("model reply is not valid JSON: {}", e)))?;

    let obj = value.as_object().ok_or_else(|| {
        Error::MalformedResponse(format!("expected a JSON object, got {}", json_kind(&value)))
    })?;

    Ok(NoteInsight {
        title: coerce_title(obj.get("title")),
        summary: coerce_summary(obj.get("summary")),
        tags: coerce_string_list(obj.get("tags")),
        action_items: coerce_string_list(obj.get("actionItems")),
        area_id: resolve_area(obj.get("areaId"), areas),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Clamp a title to at most [`TITLE_MAX_WORDS`] words and
/// [`TITLE_MAX_CHARS`] characters. Truncation, not rejection: this is a
/// defense-in-depth clamp applied regardless of what the model was asked.
fn normalize_title(raw: &str) -> String {
    let joined = raw
        .split_whitespace()
        .take(TITLE_MAX_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(TITLE_MAX_CHARS).collect()
}

/// `title` field: strings are normalized, anything else becomes empty.
fn coerce_title(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(s) => normalize_title(s),
        None => String::new(),
    }
}

/// `summary` field: strings pass through, anything else becomes empty.
fn coerce_summary(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// `tags`/`actionItems` fields: arrays keep only their string elements in
/// original order, with no count cap; anything else becomes empty.
fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Resolve the model's `areaId` against the caller's area list.
///
/// Considered only when the caller supplied a non-empty list. An exact id
/// match wins; a non-empty string matching nothing substitutes the first
/// area (never `None`); an absent/empty/non-string value yields `None`.
fn resolve_area(value: Option<&Value>, areas: &[Area]) -> Option<Uuid> {
    let first = areas.first()?;
    let chosen = value.and_then(Value::as_str)?;
    if chosen.is_empty() {
        return None;
    }
    match areas.iter().find(|a| a.id.to_string() == chosen) {
        Some(area) => Some(area.id),
        None => Some(first.id),
    }
}
