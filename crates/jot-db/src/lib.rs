//! # jot-db
//!
//! PostgreSQL database layer for jot.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes, tasks, and areas
//! - An optional `migrations` feature for embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use jot_db::Database;
//! use jot_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/jot").await?;
//!
//!     let note_id = db.notes.insert(CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: "Hello, world!".to_string(),
//!     }).await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```

pub mod areas;
pub mod notes;
pub mod pool;
pub mod tasks;

use std::sync::Arc;

use sqlx::PgPool;

// Re-export core types
pub use jot_core::*;

pub use areas::PgAreaRepository;
pub use notes::PgNoteRepository;
pub use pool::{connect, PoolConfig};
pub use tasks::PgTaskRepository;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Bundle of repositories over one connection pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    pub notes: Arc<PgNoteRepository>,
    pub tasks: Arc<PgTaskRepository>,
    pub areas: Arc<PgAreaRepository>,
}

impl Database {
    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, PoolConfig::default()).await
    }

    /// Connect with a custom pool configuration.
    pub async fn connect_with(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = pool::connect(database_url, config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Build a Database over an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            notes: Arc::new(PgNoteRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
            areas: Arc::new(PgAreaRepository::new(pool.clone())),
            pool,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ping the database.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    /// Run embedded schema migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
