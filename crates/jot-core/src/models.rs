//! Domain models for jot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined category used to bucket tasks and notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    /// Icon slug for client rendering (e.g. "briefcase", "home").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether this is the fallback area for uncategorized tasks.
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// A persisted free-text note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Content hash in "sha256:<hex>" form, maintained on every write.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight note projection for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted todo item, optionally linked to a note and an area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Structured extraction result for a single note.
///
/// Ephemeral: produced fresh per extraction call, never mutated, consumed
/// once by the materializer. Serialized in camelCase because it crosses the
/// HTTP boundary as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInsight {
    /// Normalized title: at most 4 words and 50 characters.
    pub title: String,
    pub summary: String,
    /// Lowercase single-token labels, in model order. No count cap.
    pub tags: Vec<String>,
    /// Concrete next steps, in model order. No count cap.
    pub action_items: Vec<String>,
    /// Resolved area, present only when the caller supplied an area list
    /// and the model's choice could be resolved against it.
    pub area_id: Option<Uuid>,
}

/// Result of materializing an insight into persisted records.
///
/// `note_id` is `None` when the note creation itself failed; `created_tasks`
/// counts only task creations that succeeded, so partial failures surface as
/// a count lower than the number of action items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeOutcome {
    pub note_id: Option<Uuid>,
    pub created_tasks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_insight_camel_case_wire_format() {
        let insight = NoteInsight {
            title: "Plan the launch".to_string(),
            summary: "s".to_string(),
            tags: vec!["work".to_string()],
            action_items: vec!["Book venue".to_string()],
            area_id: None,
        };

        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"actionItems\""));
        assert!(json.contains("\"areaId\""));
        assert!(!json.contains("action_items"));
    }

    #[test]
    fn test_note_insight_round_trip() {
        let id = Uuid::new_v4();
        let insight = NoteInsight {
            title: "t".to_string(),
            summary: "s".to_string(),
            tags: vec![],
            action_items: vec!["a".to_string(), "b".to_string()],
            area_id: Some(id),
        };

        let json = serde_json::to_string(&insight).unwrap();
        let back: NoteInsight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, insight);
    }

    #[test]
    fn test_materialize_outcome_serialization() {
        let outcome = MaterializeOutcome {
            note_id: None,
            created_tasks: 0,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"noteId\":null"));
        assert!(json.contains("\"createdTasks\":0"));
    }

    #[test]
    fn test_task_optional_fields_skipped() {
        let task = Task {
            id: Uuid::new_v4(),
            text: "do it".to_string(),
            completed: false,
            color: "cyan".to_string(),
            area_id: None,
            note_id: None,
            due_date: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("areaId"));
        assert!(!json.contains("noteId"));
        assert!(!json.contains("dueDate"));
        assert!(json.contains("createdAt"));
    }
}
