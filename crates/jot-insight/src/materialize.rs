//! Task materialization.
//!
//! Turns a [`NoteInsight`] into one persisted note and a sequence of linked
//! tasks. The sequence is an explicit saga: the note step aborts the whole
//! batch on failure, each task step is skip-on-failure, and the outcome
//! reports partial success as a count. There is no cross-step atomicity and
//! no internal parallelism; every creation is awaited before the next starts
//! so each item is individually retryable.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use jot_core::defaults::{FALLBACK_TITLE, FALLBACK_TITLE_CHARS, TASK_COLOR};
use jot_core::{
    CreateNoteRequest, CreateTaskRequest, MaterializeOutcome, NoteInsight, NoteRepository,
    TaskRepository,
};

/// Materializes insights into persisted notes and tasks.
pub struct TaskMaterializer {
    notes: Arc<dyn NoteRepository>,
    tasks: Arc<dyn TaskRepository>,
    /// Area assigned to tasks when the insight carries none.
    default_area: Option<Uuid>,
}

impl TaskMaterializer {
    /// Create a materializer over the given repositories.
    pub fn new(notes: Arc<dyn NoteRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self {
            notes,
            tasks,
            default_area: None,
        }
    }

    /// Set the fallback area for tasks whose insight resolved no area.
    pub fn with_default_area(mut self, area: Option<Uuid>) -> Self {
        self.default_area = area;
        self
    }

    /// Persist `insight` as one note plus one task per action item.
    ///
    /// Never fails: a note-creation failure yields `note_id: None` and zero
    /// tasks; a task-creation failure is skipped and the final count reports
    /// how many items actually landed. `original_content` is stored verbatim
    /// — in particular, a blank note stores the blank original, never the
    /// prompt placeholder the extractor sent to the model.
    pub async fn materialize(
        &self,
        original_content: &str,
        insight: &NoteInsight,
    ) -> MaterializeOutcome {
        let start = Instant::now();
        let title = derive_title(&insight.title, original_content);

        let note_id = match self
            .notes
            .insert(CreateNoteRequest {
                title,
                content: original_content.to_string(),
            })
            .await
        {
            Ok(id) => id,
            Err(e) => {
                // No note means no home for tasks; abort the batch.
                warn!(error = %e, "Note creation failed, skipping task materialization");
                return MaterializeOutcome {
                    note_id: None,
                    created_tasks: 0,
                };
            }
        };

        if insight.action_items.is_empty() {
            return MaterializeOutcome {
                note_id: Some(note_id),
                created_tasks: 0,
            };
        }

        let area_id = insight.area_id.or(self.default_area);
        let mut created = 0usize;

        // Reverse order: the first-listed item is created last, so a
        // newest-first task list shows the items in reading order.
        for item in insight.action_items.iter().rev() {
            let text = item.trim();
            if text.is_empty() {
                continue;
            }

            match self
                .tasks
                .insert(CreateTaskRequest {
                    text: text.to_string(),
                    color: Some(TASK_COLOR.to_string()),
                    area_id,
                    note_id: Some(note_id),
                    due_date: None,
                })
                .await
            {
                Ok(_) => created += 1,
                Err(e) => {
                    warn!(note_id = %note_id, error = %e, "Task creation failed, skipping item");
                }
            }
        }

        info!(
            note_id = %note_id,
            item_count = insight.action_items.len(),
            created_count = created,
            duration_ms = start.elapsed().as_millis() as u64,
            "Materialized note insight"
        );

        MaterializeOutcome {
            note_id: Some(note_id),
            created_tasks: created,
        }
    }
}

/// Derive the note title: the insight title when non-empty, else the first
/// content line (bounded), else a fixed fallback.
fn derive_title(insight_title: &str, content: &str) -> String {
    let trimmed = insight_title.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    let first_line = content.lines().next().unwrap_or("").trim();
    if !first_line.is_empty() {
        return first_line.chars().take(FALLBACK_TITLE_CHARS).collect();
    }

    FALLBACK_TITLE.to_string()
}
