//! Note persistence operations.

use chrono::{DateTime, Utc};
use second_brain_core::{NewNote, Note, NoteType, NoteUpdate};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Note repository for database operations
pub struct NoteRepository;

impl NoteRepository {
    /// Insert a new note, assigning its id and creation time.
    pub async fn create(pool: &SqlitePool, note: &NewNote) -> DbResult<Note> {
        note.validate()?;

        let id = format!("note_{}", Uuid::new_v4());
        let now = Utc::now().timestamp_millis();
        let tags = encode_tags(note.tags.as_deref())?;

        sqlx::query(
            "INSERT INTO notes (id, title, content, summary, tags, note_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.summary.as_deref())
        .bind(tags)
        .bind(note.note_type.as_str())
        .bind(now)
        .execute(pool)
        .await?;

        info!("Created note {} ({})", id, note.note_type);

        Self::get_by_id(pool, &id)
            .await?
            .ok_or_else(|| DbError::NoteNotFound(id))
    }

    /// Get note by ID
    pub async fn get_by_id(pool: &SqlitePool, id: &str) -> DbResult<Option<Note>> {
        let row = sqlx::query_as::<_, NoteRow>(
            "SELECT id, title, content, summary, tags, note_type, created_at
             FROM notes
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Note::from))
    }

    /// List all notes, newest first.
    pub async fn list_all(pool: &SqlitePool) -> DbResult<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT id, title, content, summary, tags, note_type, created_at
             FROM notes
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    /// Apply a title/content edit. Derived metadata is left as-is.
    pub async fn update(pool: &SqlitePool, id: &str, update: &NoteUpdate) -> DbResult<Note> {
        update.validate()?;

        let result = sqlx::query(
            "UPDATE notes
             SET title = COALESCE(?, title),
                 content = COALESCE(?, content)
             WHERE id = ?",
        )
        .bind(update.title.as_deref())
        .bind(update.content.as_deref())
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NoteNotFound(id.to_string()));
        }

        Self::get_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::NoteNotFound(id.to_string()))
    }

    /// Delete a note permanently.
    pub async fn delete(pool: &SqlitePool, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NoteNotFound(id.to_string()));
        }

        info!("Deleted note {}", id);
        Ok(())
    }

    /// Number of stored notes.
    pub async fn count(pool: &SqlitePool) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

fn encode_tags(tags: Option<&[String]>) -> DbResult<Option<String>> {
    Ok(tags.map(serde_json::to_string).transpose()?)
}

#[derive(Debug, sqlx::FromRow)]
struct NoteRow {
    id: String,
    title: String,
    content: String,
    summary: Option<String>,
    tags: Option<String>,
    note_type: String,
    created_at: i64,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        let tags = row.tags.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(tags) => Some(tags),
            Err(e) => {
                warn!("Ignoring malformed tags on note {}: {}", row.id, e);
                None
            }
        });

        Note {
            title: row.title,
            content: row.content,
            summary: row.summary,
            tags,
            note_type: row.note_type.parse().unwrap_or(NoteType::Note),
            created_at: DateTime::from_timestamp_millis(row.created_at).unwrap_or_default(),
            id: row.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_note_pool;

    fn link_note() -> NewNote {
        NewNote {
            title: "Recipes".to_string(),
            content: "Check out https://example.com for recipes".to_string(),
            summary: Some("Recipe link".to_string()),
            tags: Some(vec!["cooking".to_string(), "cooking".to_string()]),
            note_type: NoteType::Link,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_note() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let created = NoteRepository::create(pool, &link_note()).await.unwrap();
        assert!(created.id.starts_with("note_"));
        assert_eq!(created.note_type, NoteType::Link);

        let found = NoteRepository::get_by_id(pool, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, created);
        assert_eq!(found.title, "Recipes");
        assert_eq!(
            found.tags,
            Some(vec!["cooking".to_string(), "cooking".to_string()])
        );
    }

    #[tokio::test]
    async fn test_unclassified_note_keeps_optional_fields_empty() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let created = NoteRepository::create(pool, &NewNote::new("", "raw thought"))
            .await
            .unwrap();
        assert!(created.summary.is_none());
        assert!(created.tags.is_none());
        assert_eq!(created.note_type, NoteType::Note);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let result = NoteRepository::create(pool, &NewNote::new("Empty", "  ")).await;
        assert!(matches!(result, Err(DbError::InvalidNote(_))));
        assert_eq!(NoteRepository::count(pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let first = NoteRepository::create(pool, &NewNote::new("first", "a"))
            .await
            .unwrap();
        let second = NoteRepository::create(pool, &NewNote::new("second", "b"))
            .await
            .unwrap();
        let third = NoteRepository::create(pool, &NewNote::new("third", "c"))
            .await
            .unwrap();

        let ids: Vec<String> = NoteRepository::list_all(pool)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_keeps_derived_fields() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let created = NoteRepository::create(pool, &link_note()).await.unwrap();
        let update = NoteUpdate {
            title: None,
            content: Some("X".to_string()),
        };
        let updated = NoteRepository::update(pool, &created.id, &update)
            .await
            .unwrap();

        assert_eq!(updated.content, "X");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.summary, created.summary);
        assert_eq!(updated.tags, created.tags);
        assert_eq!(updated.note_type, NoteType::Link);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_note() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let update = NoteUpdate {
            title: Some("t".to_string()),
            content: None,
        };
        let err = NoteRepository::update(pool, "note_missing", &update)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = NoteRepository::delete(pool, "note_missing")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NoteNotFound(id) if id == "note_missing"));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let db = create_test_note_pool().await.unwrap();
        let pool = db.pool();

        let created = NoteRepository::create(pool, &link_note()).await.unwrap();
        NoteRepository::delete(pool, &created.id).await.unwrap();

        assert!(NoteRepository::get_by_id(pool, &created.id)
            .await
            .unwrap()
            .is_none());
        assert!(NoteRepository::delete(pool, &created.id).await.is_err());
    }
}
