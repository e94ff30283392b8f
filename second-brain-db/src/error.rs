//! Database error types.

use second_brain_core::NoteValidationError;

/// Database operation errors
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// SQL error from sqlx
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Note rejected before reaching the database
    #[error("Invalid note: {0}")]
    InvalidNote(#[from] NoteValidationError),

    /// Tag list (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NoteNotFound(_))
    }
}

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;
