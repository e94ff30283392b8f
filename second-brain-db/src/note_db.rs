//! Note database connection pool and initialization.

use std::path::{Path, PathBuf};

use second_brain_core::{NewNote, Note, NoteUpdate};
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    error::{DbError, DbResult},
    notes::NoteRepository,
    sqlite_runtime::create_file_pool,
    store::NoteStore,
};

/// Note database pool wrapper
#[derive(Debug, Clone)]
pub struct NoteDbPool {
    pool: SqlitePool,
    db_path: Option<PathBuf>,
}

impl NoteDbPool {
    /// Open (or create) the database at `db_path` and run migrations.
    pub async fn open(db_path: &Path) -> DbResult<Self> {
        info!("Initializing note database at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pool = create_file_pool(db_path, 5).await?;

        Self::run_migrations(&pool).await?;

        info!("Note database initialized successfully");
        Ok(Self {
            pool,
            db_path: Some(db_path.to_path_buf()),
        })
    }

    /// Get the inner SQLx pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path of the backing file (`None` for in-memory pools)
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub(crate) async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;

        info!("Note database migrations completed");
        Ok(())
    }

    /// Close the pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create a NoteDbPool from an already migrated SqlitePool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            db_path: None,
        }
    }
}

#[async_trait::async_trait]
impl NoteStore for NoteDbPool {
    async fn insert(&self, note: NewNote) -> DbResult<Note> {
        NoteRepository::create(&self.pool, &note).await
    }

    async fn list(&self) -> DbResult<Vec<Note>> {
        NoteRepository::list_all(&self.pool).await
    }

    async fn get(&self, id: &str) -> DbResult<Note> {
        NoteRepository::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| DbError::NoteNotFound(id.to_string()))
    }

    async fn update(&self, id: &str, update: NoteUpdate) -> DbResult<Note> {
        NoteRepository::update(&self.pool, id, &update).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        NoteRepository::delete(&self.pool, id).await
    }
}
