//! Ingestion-time metadata derivation.
//!
//! The classifier asks the model for a summary, tags and a [`NoteType`] and
//! falls back to fixed metadata whenever that fails. It never returns an
//! error: callers get a [`Classification`] whose [`ClassificationOutcome`]
//! tells them whether the metadata came from the model.

use std::sync::Arc;

use second_brain_core::{ClassifierMode, NoteType};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::prompt::{self, TemplateError};
use crate::providers::Provider;

/// Summary stored when full classification falls back.
pub const FALLBACK_SUMMARY: &str = "AI processing skipped.";
/// Tag stored when full classification falls back.
pub const FALLBACK_TAG: &str = "Manual";
/// Default length of the content excerpt used as a fallback summary.
pub const DEFAULT_SUMMARY_FALLBACK_CHARS: usize = 100;

/// Which metadata the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Summary, tags and type.
    Full,
    /// A single-sentence summary only.
    SummaryOnly,
}

impl From<ClassifierMode> for ClassifyMode {
    fn from(mode: ClassifierMode) -> Self {
        match mode {
            ClassifierMode::Full => Self::Full,
            ClassifierMode::Summary => Self::SummaryOnly,
        }
    }
}

/// Derived metadata. `tags` and `note_type` are `None` when the mode did not
/// derive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub summary: String,
    pub tags: Option<Vec<String>>,
    pub note_type: Option<NoteType>,
}

/// Why the model output was not used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationFailure {
    #[error("no LLM provider configured")]
    NotConfigured,
    #[error("LLM request failed: {0}")]
    Upstream(String),
    #[error("malformed LLM response: {0}")]
    Malformed(String),
    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] TemplateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Generated,
    Fallback { reason: ClassificationFailure },
}

/// Metadata plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub metadata: NoteMetadata,
    pub outcome: ClassificationOutcome,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, ClassificationOutcome::Fallback { .. })
    }
}

/// JSON shape expected from the full classification prompt.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    summary: String,
    tags: Vec<String>,
    #[serde(rename = "type")]
    note_type: NoteType,
}

/// Derives note metadata with an optional model.
#[derive(Clone)]
pub struct MetadataClassifier {
    provider: Option<Arc<dyn Provider>>,
    summary_fallback_chars: usize,
}

impl MetadataClassifier {
    /// Create a classifier. Without a provider every call falls back.
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        Self {
            provider,
            summary_fallback_chars: DEFAULT_SUMMARY_FALLBACK_CHARS,
        }
    }

    /// Length of the content excerpt used when the summary-only path falls back.
    pub fn with_summary_fallback_chars(mut self, chars: usize) -> Self {
        self.summary_fallback_chars = chars;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Derive metadata for a note. Always returns usable metadata.
    pub async fn classify(&self, title: &str, content: &str, mode: ClassifyMode) -> Classification {
        match self.request_metadata(title, content, mode).await {
            Ok(metadata) => Classification {
                metadata,
                outcome: ClassificationOutcome::Generated,
            },
            Err(reason) => {
                warn!("Classification fell back ({:?}): {}", mode, reason);
                Classification {
                    metadata: self.fallback_metadata(content, mode),
                    outcome: ClassificationOutcome::Fallback { reason },
                }
            }
        }
    }

    async fn request_metadata(
        &self,
        title: &str,
        content: &str,
        mode: ClassifyMode,
    ) -> Result<NoteMetadata, ClassificationFailure> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ClassificationFailure::NotConfigured)?;

        let prompt = match mode {
            ClassifyMode::Full => prompt::classification_prompt(title, content)?,
            ClassifyMode::SummaryOnly => prompt::summary_prompt(title, content)?,
        };

        let response = provider
            .generate(&prompt)
            .await
            .map_err(|e| ClassificationFailure::Upstream(e.to_string()))?;
        debug!(
            "Classification response from {}/{}: {} chars",
            provider.name(),
            provider.model(),
            response.text.len()
        );

        match mode {
            ClassifyMode::Full => parse_metadata(&response.text),
            ClassifyMode::SummaryOnly => {
                let summary = response.non_empty_text().ok_or_else(|| {
                    ClassificationFailure::Malformed("empty summary".to_string())
                })?;
                Ok(NoteMetadata {
                    summary: summary.to_string(),
                    tags: None,
                    note_type: None,
                })
            }
        }
    }

    fn fallback_metadata(&self, content: &str, mode: ClassifyMode) -> NoteMetadata {
        match mode {
            ClassifyMode::Full => NoteMetadata {
                summary: FALLBACK_SUMMARY.to_string(),
                tags: Some(vec![FALLBACK_TAG.to_string()]),
                note_type: Some(NoteType::Note),
            },
            ClassifyMode::SummaryOnly => NoteMetadata {
                summary: format!("{}...", truncate_chars(content, self.summary_fallback_chars)),
                tags: None,
                note_type: None,
            },
        }
    }
}

/// Remove Markdown code fences the model may wrap its JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the full classification JSON.
pub fn parse_metadata(text: &str) -> Result<NoteMetadata, ClassificationFailure> {
    let cleaned = strip_code_fences(text);
    let raw: RawMetadata = serde_json::from_str(&cleaned)
        .map_err(|e| ClassificationFailure::Malformed(e.to_string()))?;

    Ok(NoteMetadata {
        summary: raw.summary,
        tags: Some(raw.tags),
        note_type: Some(raw.note_type),
    })
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
