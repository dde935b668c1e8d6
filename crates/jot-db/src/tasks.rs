//! Task repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use jot_core::defaults::TASK_COLOR;
use jot_core::{
    new_v7, CreateTaskRequest, Error, Result, Task, TaskRepository, UpdateTaskRequest,
};

/// PostgreSQL implementation of TaskRepository.
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_task(row: PgRow) -> Task {
    Task {
        id: row.get("id"),
        text: row.get("text"),
        completed: row.get("completed"),
        color: row.get("color"),
        area_id: row.get("area_id"),
        note_id: row.get("note_id"),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, req: CreateTaskRequest) -> Result<Uuid> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("task text required".to_string()));
        }

        let id = new_v7();
        let color = req.color.unwrap_or_else(|| TASK_COLOR.to_string());

        sqlx::query(
            "INSERT INTO task (id, text, completed, color, area_id, note_id, due_date, created_at)
             VALUES ($1, $2, FALSE, $3, $4, $5, $6, now())",
        )
        .bind(id)
        .bind(text)
        .bind(&color)
        .bind(req.area_id)
        .bind(req.note_id)
        .bind(req.due_date)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Task> {
        let row = sqlx::query(
            "SELECT id, text, completed, color, area_id, note_id, due_date, created_at
             FROM task WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_task).ok_or(Error::TaskNotFound(id))
    }

    async fn list(&self, note_id: Option<Uuid>) -> Result<Vec<Task>> {
        // Newest-first: combined with reverse-order materialization this
        // shows a note's action items in their original reading order.
        // UUIDv7 ids break created_at ties from back-to-back inserts.
        let rows = match note_id {
            Some(note_id) => {
                sqlx::query(
                    "SELECT id, text, completed, color, area_id, note_id, due_date, created_at
                     FROM task WHERE note_id = $1
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(note_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT id, text, completed, color, area_id, note_id, due_date, created_at
                     FROM task
                     ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_task).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateTaskRequest) -> Result<Task> {
        if req.text.is_none()
            && req.completed.is_none()
            && req.area_id.is_none()
            && req.due_date.is_none()
        {
            return Err(Error::InvalidInput("no updates provided".to_string()));
        }

        // $1 = id, dynamic params start at $2.
        let mut updates: Vec<String> = Vec::new();
        let mut param_idx = 2;

        for (present, column) in [
            (req.text.is_some(), "text"),
            (req.completed.is_some(), "completed"),
            (req.area_id.is_some(), "area_id"),
            (req.due_date.is_some(), "due_date"),
        ] {
            if present {
                updates.push(format!("{} = ${}", column, param_idx));
                param_idx += 1;
            }
        }

        let query = format!(
            "UPDATE task SET {} WHERE id = $1
             RETURNING id, text, completed, color, area_id, note_id, due_date, created_at",
            updates.join(", ")
        );

        let mut q = sqlx::query(&query).bind(id);
        if let Some(text) = &req.text {
            q = q.bind(text);
        }
        if let Some(completed) = req.completed {
            q = q.bind(completed);
        }
        if let Some(area_id) = req.area_id {
            q = q.bind(area_id);
        }
        if let Some(due_date) = req.due_date {
            q = q.bind(due_date);
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(map_row_to_task).ok_or(Error::TaskNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }
}
