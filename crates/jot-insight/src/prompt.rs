//! Prompt template for note insight extraction.
//!
//! The system prompt is versioned configuration data: fixed fragments plus a
//! named slot for the caller's area list. Prompt changes bump
//! [`PROMPT_VERSION`] so they are auditable independent of code changes.

use jot_core::defaults::EMPTY_NOTE_PLACEHOLDER;
use jot_core::Area;

/// Version marker for the extraction prompt template.
pub const PROMPT_VERSION: &str = "3";

/// Base instructions, always present.
const BASE_INSTRUCTIONS: &str = "You are a notepad assistant. The user will send you a note (free-form text).
Respond with a single JSON object only, no other text, with exactly these keys:
- \"title\": string — a short title for the note, 3 to 4 words maximum (e.g. \"YouTube course ideas\").
- \"summary\": string — one or two short sentences summarizing the note.
- \"tags\": string[] — short labels (e.g. work, idea, reminder). Lowercase, no spaces in a tag.
- \"actionItems\": string[] — concrete next steps or to-dos extracted from the note. Each item one short sentence. Cover the ENTIRE note: a long note with many to-dos should produce many items, do not stop early.";

/// Closing instructions, always present.
const CLOSING_INSTRUCTIONS: &str = "If the note is empty or meaningless, return: {\"title\":\"\",\"summary\":\"\",\"tags\":[],\"actionItems\":[]}.
Be thorough: every actionable sentence in the note should appear in actionItems.";

/// Render the area-selection fragment for a non-empty area list.
///
/// Instructs the model to return one id verbatim as `areaId`, defaulting to
/// the first listed area when unclear. The first-area default matches the
/// resolver's fallback so prompt and behavior agree.
fn areas_fragment(areas: &[Area]) -> String {
    let mut fragment = String::from(
        "Additionally include an \"areaId\" key: pick the one area below that best fits the note and return its id verbatim.
If no area clearly fits, use the first area in the list.
Areas:\n",
    );
    for area in areas {
        fragment.push_str(&format!("- {}: {}\n", area.id, area.name));
    }
    fragment
}

/// Assemble the full system prompt.
///
/// The areas fragment is present iff `areas` is non-empty.
pub fn build_system_prompt(areas: &[Area]) -> String {
    if areas.is_empty() {
        format!("{}\n\n{}", BASE_INSTRUCTIONS, CLOSING_INSTRUCTIONS)
    } else {
        format!(
            "{}\n\n{}\n{}",
            BASE_INSTRUCTIONS,
            areas_fragment(areas),
            CLOSING_INSTRUCTIONS
        )
    }
}

/// The user message for a note: the trimmed text, or the placeholder for a
/// blank note. The placeholder is only ever sent to the model, never stored.
pub fn user_content(note: &str) -> &str {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        EMPTY_NOTE_PLACEHOLDER
    } else {
        trimmed
    }
}
