//! second-brain-db: SQLite storage for notes.
//!
//! This crate provides:
//! - The [`NoteStore`] capability used by the ingestion and query pipelines
//! - [`NoteDbPool`], its sqlx/SQLite implementation
//! - [`NoteRepository`] for direct pool-level access

pub mod error;
pub mod note_db;
pub mod notes;
mod sqlite_runtime;
pub mod store;

// Re-export commonly used types
pub use error::{DbError, DbResult};
pub use note_db::NoteDbPool;
pub use notes::NoteRepository;
pub use store::NoteStore;

// Re-export test helpers when running tests or when test-helpers feature is enabled
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
