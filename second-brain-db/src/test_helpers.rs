//! Test helpers for the note database.

use crate::{
    error::DbResult, note_db::NoteDbPool, sqlite_runtime::create_in_memory_pool,
};

/// Create an in-memory note database for testing
pub async fn create_test_note_pool() -> DbResult<NoteDbPool> {
    let pool = create_in_memory_pool().await?;

    NoteDbPool::run_migrations(&pool).await?;

    Ok(NoteDbPool::from_pool(pool))
}
