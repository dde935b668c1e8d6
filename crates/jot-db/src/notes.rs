//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use jot_core::{
    new_v7, CreateNoteRequest, Error, ListNotesRequest, Note, NoteRepository, NoteSummary, Result,
    UpdateNoteRequest,
};

use jot_core::defaults::{PAGE_LIMIT, PAGE_OFFSET};

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute SHA256 hash of content.
    fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }
}

fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        content_hash: row.get("content_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_row_to_note_summary(row: PgRow) -> NoteSummary {
    NoteSummary {
        id: row.get("id"),
        title: row.get("title"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid> {
        let id = new_v7();
        let now = Utc::now();
        let hash = Self::hash_content(&req.content);

        sqlx::query(
            "INSERT INTO note (id, title, content, content_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        let row = sqlx::query(
            "SELECT id, title, content, content_hash, created_at, updated_at
             FROM note WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, req: ListNotesRequest) -> Result<Vec<NoteSummary>> {
        let limit = req.limit.unwrap_or(PAGE_LIMIT);
        let offset = req.offset.unwrap_or(PAGE_OFFSET);

        let rows = sqlx::query(
            "SELECT id, title, created_at FROM note
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_note_summary).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        if req.title.is_none() && req.content.is_none() {
            return Err(Error::InvalidInput("no updates provided".to_string()));
        }

        let now = Utc::now();
        // $1 = now, $2 = id, dynamic params start at $3.
        let mut updates: Vec<String> = vec!["updated_at = $1".to_string()];
        let mut param_idx = 3;

        if req.title.is_some() {
            updates.push(format!("title = ${}", param_idx));
            param_idx += 1;
        }
        if req.content.is_some() {
            updates.push(format!("content = ${}", param_idx));
            updates.push(format!("content_hash = ${}", param_idx + 1));
        }

        let query = format!(
            "UPDATE note SET {} WHERE id = $2
             RETURNING id, title, content, content_hash, created_at, updated_at",
            updates.join(", ")
        );

        let mut q = sqlx::query(&query).bind(now).bind(id);
        if let Some(title) = &req.title {
            q = q.bind(title);
        }
        if let Some(content) = &req.content {
            q = q.bind(content).bind(Self::hash_content(content));
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_format() {
        let hash = PgNoteRepository::hash_content("hello");
        assert!(hash.starts_with("sha256:"));
        // SHA256 hex digest is 64 characters.
        assert_eq!(hash.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_hash_content_is_deterministic() {
        assert_eq!(
            PgNoteRepository::hash_content("same"),
            PgNoteRepository::hash_content("same")
        );
        assert_ne!(
            PgNoteRepository::hash_content("one"),
            PgNoteRepository::hash_content("two")
        );
    }
}
