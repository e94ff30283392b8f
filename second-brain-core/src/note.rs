//! Note records and their projections.
//!
//! A [`Note`] is the only persistent entity. Its `summary`, `tags` and
//! `note_type` are derived at ingestion time; afterwards only `title` and
//! `content` can change (see [`NoteUpdate`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoteType {
    /// Factual information, meeting notes, code snippets.
    #[default]
    Note,
    /// Content with a URL or a reference to a specific article/video.
    Link,
    /// Personal realization or reflective thought.
    Insight,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Note => "NOTE",
            NoteType::Link => "LINK",
            NoteType::Insight => "INSIGHT",
        }
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NOTE" => Ok(NoteType::Note),
            "LINK" => Ok(NoteType::Link),
            "INSIGHT" => Ok(NoteType::Insight),
            _ => Err(format!("Unknown note type: {}", s)),
        }
    }
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// `None` until the note has been classified.
    pub summary: Option<String>,
    /// Display-oriented list; order is kept and duplicates are allowed.
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Tags as a slice, empty when the note was never tagged.
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Redacted view without the raw content.
    pub fn to_public(&self) -> PublicNote {
        PublicNote::from(self)
    }
}

/// A note that has not been persisted yet (no id, no timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type", default)]
    pub note_type: NoteType,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: None,
            tags: None,
            note_type: NoteType::Note,
        }
    }

    /// Reject notes that would violate the non-empty content invariant.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_content(&self.content)
    }
}

/// Edit of a persisted note.
///
/// Only `title` and `content` are editable. Derived metadata is not
/// recomputed, so `summary`/`tags`/`type` may describe an older revision
/// of the content after an edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        match &self.content {
            Some(content) => validate_content(content),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    #[error("Note content cannot be empty")]
    EmptyContent,
}

fn validate_content(content: &str) -> Result<(), NoteValidationError> {
    if content.trim().is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok(())
}

/// Public projection of a note, safe to expose through a shared listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicNote {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub created_at: DateTime<Utc>,
}

impl From<&Note> for PublicNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            summary: note.summary.clone(),
            tags: note.tags.clone(),
            note_type: note.note_type,
            created_at: note.created_at,
        }
    }
}

/// Envelope returned by the public listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicNoteListing {
    pub count: usize,
    pub generated_at: DateTime<Utc>,
    pub data: Vec<PublicNote>,
}

impl PublicNoteListing {
    pub fn from_notes(notes: &[Note]) -> Self {
        let data: Vec<PublicNote> = notes.iter().map(PublicNote::from).collect();
        Self {
            count: data.len(),
            generated_at: Utc::now(),
            data,
        }
    }
}
