//! Area repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use jot_core::{new_v7, Area, AreaRepository, CreateAreaRequest, Error, Result};

/// PostgreSQL implementation of AreaRepository.
pub struct PgAreaRepository {
    pool: PgPool,
}

impl PgAreaRepository {
    /// Create a new PgAreaRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_area(row: PgRow) -> Area {
    Area {
        id: row.get("id"),
        name: row.get("name"),
        icon: row.get("icon"),
        is_default: row.get("is_default"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl AreaRepository for PgAreaRepository {
    async fn insert(&self, req: CreateAreaRequest) -> Result<Uuid> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("area name required".to_string()));
        }

        let id = new_v7();
        sqlx::query(
            "INSERT INTO area (id, name, icon, is_default, created_at)
             VALUES ($1, $2, $3, $4, now())",
        )
        .bind(id)
        .bind(name)
        .bind(&req.icon)
        .bind(req.is_default)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Area>> {
        let row = sqlx::query(
            "SELECT id, name, icon, is_default, created_at FROM area WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_area))
    }

    async fn list(&self) -> Result<Vec<Area>> {
        // Creation order: the extractor's positional fallback depends on it.
        let rows = sqlx::query(
            "SELECT id, name, icon, is_default, created_at FROM area
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_area).collect())
    }

    async fn delete(&self, id: Uuid, reassign_to: Option<Uuid>) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let reassigned = sqlx::query("UPDATE task SET area_id = $2 WHERE area_id = $1")
            .bind(id)
            .bind(reassign_to)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let deleted = sqlx::query("DELETE FROM area WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        if deleted.rows_affected() == 0 {
            return Err(Error::AreaNotFound(id));
        }

        tx.commit().await.map_err(Error::Database)?;
        debug!(
            area_id = %id,
            reassigned = reassigned.rows_affected(),
            "Deleted area and reassigned its tasks"
        );
        Ok(())
    }

    async fn find_default(&self) -> Result<Option<Area>> {
        let row = sqlx::query(
            "SELECT id, name, icon, is_default, created_at FROM area
             WHERE is_default = TRUE
             ORDER BY created_at ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_area))
    }
}
