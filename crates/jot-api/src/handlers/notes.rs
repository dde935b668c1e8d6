//! Note CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use jot_core::{
    CreateNoteRequest, ListNotesRequest, Note, NoteRepository, NoteSummary, UpdateNoteRequest,
};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<NoteSummary>>, ApiError> {
    let notes = state
        .db
        .notes
        .list(ListNotesRequest {
            limit: query.limit,
            offset: query.offset,
        })
        .await?;
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteBody>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("title required".to_string()))?;

    let id = state
        .db
        .notes
        .insert(CreateNoteRequest {
            title: title.to_string(),
            content: body.content.unwrap_or_default(),
        })
        .await?;

    let note = state.db.notes.fetch(id).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.db.notes.fetch(id).await?))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let req = UpdateNoteRequest {
        title: body.title.map(|t| t.trim().to_string()),
        content: body.content,
    };
    Ok(Json(state.db.notes.update(id, req).await?))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
