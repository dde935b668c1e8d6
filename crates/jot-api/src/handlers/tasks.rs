//! Task CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use jot_core::{CreateTaskRequest, Task, TaskRepository, UpdateTaskRequest};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    pub note_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    pub text: Option<String>,
    pub color: Option<String>,
    pub area_id: Option<Uuid>,
    pub note_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.db.tasks.list(query.note_id).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let text = body
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("text required".to_string()))?;

    let id = state
        .db
        .tasks
        .insert(CreateTaskRequest {
            text: text.to_string(),
            color: body.color,
            area_id: body.area_id,
            note_id: body.note_id,
            due_date: body.due_date,
        })
        .await?;

    let task = state.db.tasks.fetch(id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.db.tasks.update(id, body).await?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.db.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
