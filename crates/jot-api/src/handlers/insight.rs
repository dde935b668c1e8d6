//! Insight pipeline handlers: extraction and server-side materialization.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use jot_core::{AreaRepository, MaterializeOutcome, NoteInsight, NoteRepository, TaskRepository};
use jot_insight::{InsightExtractor, TaskMaterializer};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessNoteBody {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MaterializeBody {
    pub content: String,
    pub insight: NoteInsight,
}

/// Extract a structured insight from free-text note content.
///
/// The caller's area list (creation order) is handed to the extractor as the
/// lookup table for area resolution. Nothing is persisted here.
pub async fn extract_note_insight(
    State(state): State<AppState>,
    Json(body): Json<ProcessNoteBody>,
) -> Result<Json<NoteInsight>, ApiError> {
    let content = body.content.unwrap_or_default();
    let areas = state.db.areas.list().await?;

    let extractor = InsightExtractor::new(state.chat.clone());
    let insight = extractor.extract(&content, &areas).await?;
    Ok(Json(insight))
}

/// Persist an extracted insight as one note plus linked tasks.
///
/// Runs the same non-atomic create-note-then-create-tasks sequence a client
/// would; the outcome reports partial success rather than failing the batch.
pub async fn materialize_insight(
    State(state): State<AppState>,
    Json(body): Json<MaterializeBody>,
) -> Result<Json<MaterializeOutcome>, ApiError> {
    let default_area = state.db.areas.find_default().await?.map(|a| a.id);

    let notes: std::sync::Arc<dyn NoteRepository> = state.db.notes.clone();
    let tasks: std::sync::Arc<dyn TaskRepository> = state.db.tasks.clone();
    let materializer = TaskMaterializer::new(notes, tasks).with_default_area(default_area);

    let outcome = materializer.materialize(&body.content, &body.insight).await;
    info!(
        item_count = body.insight.action_items.len(),
        created_count = outcome.created_tasks,
        "Materialized insight via API"
    );
    Ok(Json(outcome))
}
