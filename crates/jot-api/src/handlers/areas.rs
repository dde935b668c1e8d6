//! Area handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use jot_core::{Area, AreaRepository, CreateAreaRequest};

use crate::error::ApiError;
use crate::AppState;

pub async fn list_areas(State(state): State<AppState>) -> Result<Json<Vec<Area>>, ApiError> {
    Ok(Json(state.db.areas.list().await?))
}

pub async fn create_area(
    State(state): State<AppState>,
    Json(body): Json<CreateAreaRequest>,
) -> Result<(StatusCode, Json<Area>), ApiError> {
    let id = state.db.areas.insert(body).await?;
    let area = state
        .db
        .areas
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Area {} not found", id)))?;
    Ok((StatusCode::CREATED, Json(area)))
}

/// Delete a non-default area. Its tasks are reassigned to the default area
/// (or left uncategorized when none is flagged).
pub async fn delete_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let area = state
        .db
        .areas
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Area {} not found", id)))?;

    if area.is_default {
        return Err(ApiError::BadRequest(
            "cannot delete the default area".to_string(),
        ));
    }

    let reassign_to = state
        .db
        .areas
        .find_default()
        .await?
        .map(|default| default.id)
        .filter(|default_id| *default_id != id);

    state.db.areas.delete(id, reassign_to).await?;
    Ok(StatusCode::NO_CONTENT)
}
