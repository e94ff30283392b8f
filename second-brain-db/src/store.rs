//! The `NoteStore` capability consumed by the ingestion and query pipelines.

use second_brain_core::{NewNote, Note, NoteUpdate};

use crate::error::DbResult;

/// Persistence capability for notes.
///
/// Every call is an independent await point; implementations provide no
/// transactional snapshot across calls.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a note, assigning `id` and `created_at`.
    async fn insert(&self, note: NewNote) -> DbResult<Note>;

    /// All notes, newest first.
    async fn list(&self) -> DbResult<Vec<Note>>;

    /// Fails with `DbError::NoteNotFound` when absent.
    async fn get(&self, id: &str) -> DbResult<Note>;

    /// Edit title and/or content. Derived fields are not touched.
    async fn update(&self, id: &str, update: NoteUpdate) -> DbResult<Note>;

    /// Irreversible delete. Fails with `DbError::NoteNotFound` when absent.
    async fn delete(&self, id: &str) -> DbResult<()>;
}
