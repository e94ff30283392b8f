//! Turning a capture request into a stored note.

use second_brain_core::{NewNote, Note, NoteType};
use second_brain_db::{DbError, NoteStore};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::classifier::{ClassificationOutcome, ClassifyMode, MetadataClassifier};

/// Raw capture input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Case-insensitive on input (`"link"` and `"LINK"` both parse)
    #[serde(default, rename = "type", deserialize_with = "deserialize_note_type")]
    pub note_type: Option<NoteType>,
}

fn deserialize_note_type<'de, D>(deserializer: D) -> Result<Option<NoteType>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| value.parse::<NoteType>().map_err(serde::de::Error::custom))
        .transpose()
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("content is required")]
    EmptyContent,
    #[error(transparent)]
    Store(#[from] DbError),
}

/// A classified note ready to persist.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub note: NewNote,
    pub outcome: ClassificationOutcome,
}

/// A persisted note with its classification outcome.
#[derive(Debug, Clone)]
pub struct Stored {
    pub note: Note,
    pub outcome: ClassificationOutcome,
}

/// Classifies capture requests with a fixed [`ClassifyMode`].
#[derive(Clone)]
pub struct Ingestor {
    classifier: MetadataClassifier,
    mode: ClassifyMode,
}

impl Ingestor {
    pub fn new(classifier: MetadataClassifier, mode: ClassifyMode) -> Self {
        Self { classifier, mode }
    }

    pub fn mode(&self) -> ClassifyMode {
        self.mode
    }

    /// Validate and classify a request without persisting it.
    ///
    /// In [`ClassifyMode::Full`] the derived tags and type replace anything the
    /// caller sent. In [`ClassifyMode::SummaryOnly`] the caller's tags and type
    /// are kept, defaulting to no tags and [`NoteType::Note`].
    pub async fn prepare(&self, request: IngestRequest) -> Result<Ingested, IngestError> {
        if request.content.trim().is_empty() {
            return Err(IngestError::EmptyContent);
        }

        let classification = self
            .classifier
            .classify(&request.title, &request.content, self.mode)
            .await;
        let metadata = classification.metadata;

        let (tags, note_type) = match self.mode {
            ClassifyMode::Full => (metadata.tags, metadata.note_type.unwrap_or_default()),
            ClassifyMode::SummaryOnly => (
                Some(request.tags.unwrap_or_default()),
                request.note_type.unwrap_or_default(),
            ),
        };

        Ok(Ingested {
            note: NewNote {
                title: request.title,
                content: request.content,
                summary: Some(metadata.summary),
                tags,
                note_type,
            },
            outcome: classification.outcome,
        })
    }

    /// Classify and persist a request.
    pub async fn ingest(
        &self,
        store: &dyn NoteStore,
        request: IngestRequest,
    ) -> Result<Stored, IngestError> {
        let Ingested { note, outcome } = self.prepare(request).await?;
        let note = store.insert(note).await?;
        info!(
            "Ingested note {} as {} ({})",
            note.id,
            note.note_type,
            if matches!(outcome, ClassificationOutcome::Generated) {
                "generated"
            } else {
                "fallback"
            }
        );
        Ok(Stored { note, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{FALLBACK_SUMMARY, FALLBACK_TAG};
    use second_brain_db::test_helpers::create_test_note_pool;

    fn request(content: &str) -> IngestRequest {
        IngestRequest {
            title: "Groceries".to_string(),
            content: content.to_string(),
            tags: Some(vec!["home".to_string()]),
            note_type: Some(NoteType::Insight),
        }
    }

    #[test]
    fn test_request_type_is_case_insensitive() {
        let request: IngestRequest =
            serde_json::from_str(r#"{"content": "c", "type": "link"}"#).unwrap();
        assert_eq!(request.note_type, Some(NoteType::Link));
        assert!(request.title.is_empty());

        let request: IngestRequest = serde_json::from_str(r#"{"content": "c"}"#).unwrap();
        assert!(request.note_type.is_none());

        assert!(serde_json::from_str::<IngestRequest>(r#"{"content": "c", "type": "QUOTE"}"#)
            .is_err());
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let ingestor = Ingestor::new(MetadataClassifier::new(None), ClassifyMode::Full);
        assert!(matches!(
            ingestor.prepare(request(" \n")).await,
            Err(IngestError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_full_mode_replaces_caller_metadata() {
        let ingestor = Ingestor::new(MetadataClassifier::new(None), ClassifyMode::Full);
        let ingested = ingestor.prepare(request("eggs, milk")).await.unwrap();

        assert!(matches!(
            ingested.outcome,
            ClassificationOutcome::Fallback { .. }
        ));
        assert_eq!(ingested.note.summary.as_deref(), Some(FALLBACK_SUMMARY));
        assert_eq!(ingested.note.tags, Some(vec![FALLBACK_TAG.to_string()]));
        assert_eq!(ingested.note.note_type, NoteType::Note);
    }

    #[tokio::test]
    async fn test_summary_mode_keeps_caller_metadata() {
        let ingestor = Ingestor::new(MetadataClassifier::new(None), ClassifyMode::SummaryOnly);
        let ingested = ingestor.prepare(request("eggs, milk")).await.unwrap();

        assert_eq!(ingested.note.summary.as_deref(), Some("eggs, milk..."));
        assert_eq!(ingested.note.tags, Some(vec!["home".to_string()]));
        assert_eq!(ingested.note.note_type, NoteType::Insight);

        let bare = IngestRequest {
            content: "just text".to_string(),
            ..IngestRequest::default()
        };
        let ingested = ingestor.prepare(bare).await.unwrap();
        assert_eq!(ingested.note.tags, Some(vec![]));
        assert_eq!(ingested.note.note_type, NoteType::Note);
    }

    #[tokio::test]
    async fn test_ingest_persists_note() {
        let db = create_test_note_pool().await.unwrap();
        let ingestor = Ingestor::new(MetadataClassifier::new(None), ClassifyMode::Full);

        let stored = ingestor.ingest(&db, request("eggs, milk")).await.unwrap();
        let fetched = db.get(&stored.note.id).await.unwrap();

        assert_eq!(fetched, stored.note);
        assert_eq!(fetched.summary.as_deref(), Some(FALLBACK_SUMMARY));
    }
}
