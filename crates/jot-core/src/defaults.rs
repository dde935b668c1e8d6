//! Centralized default constants for the jot system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// INSIGHT EXTRACTION
// =============================================================================

/// Default chat model for note insight extraction.
pub const NOTES_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for insight extraction. Low to favor deterministic
/// structure over creative phrasing.
pub const INSIGHT_TEMPERATURE: f32 = 0.3;

/// Output token ceiling for insight extraction. Generous so long notes can
/// produce many action items without the list being truncated mid-array.
pub const INSIGHT_MAX_TOKENS: u32 = 2048;

/// Placeholder sent to the model in place of an empty note. Never persisted.
pub const EMPTY_NOTE_PLACEHOLDER: &str = "(empty note)";

// =============================================================================
// TITLES
// =============================================================================

/// Maximum whitespace-separated words in a normalized insight title.
pub const TITLE_MAX_WORDS: usize = 4;

/// Maximum characters in a normalized insight title.
pub const TITLE_MAX_CHARS: usize = 50;

/// Character bound when deriving a note title from the first content line.
pub const FALLBACK_TITLE_CHARS: usize = 60;

/// Title used when neither the insight nor the content yields one.
pub const FALLBACK_TITLE: &str = "Note";

// =============================================================================
// TASKS
// =============================================================================

/// Default color for tasks created from action items.
pub const TASK_COLOR: &str = "cyan";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for list endpoints (notes, tasks, areas).
pub const PAGE_LIMIT: i64 = 50;

/// Default page offset.
pub const PAGE_OFFSET: i64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds_are_consistent() {
        // A 4-word title of 50 chars must fit the fallback bound too.
        assert!(TITLE_MAX_CHARS <= FALLBACK_TITLE_CHARS);
        assert!(TITLE_MAX_WORDS >= 3);
    }

    #[test]
    fn test_temperature_is_low() {
        assert!(INSIGHT_TEMPERATURE < 0.5);
    }

    #[test]
    fn test_placeholder_is_nonempty() {
        assert!(!EMPTY_NOTE_PLACEHOLDER.trim().is_empty());
    }
}
