//! SQLite pool construction shared by the note database and its tests.

use std::path::Path;
use std::time::Duration;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};

use crate::error::DbResult;

pub(crate) async fn create_file_pool(db_path: &Path, max_connections: u32) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    Ok(SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?)
}

/// In-memory databases live and die with their connection, so the pool holds
/// exactly one and never recycles it.
#[cfg(any(test, feature = "test-helpers"))]
pub(crate) async fn create_in_memory_pool() -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::new().filename(":memory:");

    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?)
}
