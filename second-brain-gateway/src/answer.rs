//! Answering questions from the stored notes.
//!
//! Failures never escape as errors. They come back as an [`Answer`] whose
//! reply starts with `Error: ` and whose status is [`AnswerStatus::Failed`].

use std::sync::Arc;

use second_brain_db::{DbError, NoteStore};
use serde::Serialize;
use tracing::{info, warn};

use crate::context;
use crate::prompt::{self, TemplateError};
use crate::providers::{Provider, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Answered,
    Failed,
}

/// Reply text plus whether it is a real answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub reply: String,
    pub status: AnswerStatus,
}

impl Answer {
    pub fn answered(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            status: AnswerStatus::Answered,
        }
    }

    /// Soft failure; the reply carries `Error: <message>`.
    pub fn failed(error: &AnswerError) -> Self {
        Self {
            reply: format!("Error: {}", error),
            status: AnswerStatus::Failed,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.status == AnswerStatus::Answered
    }
}

/// Reasons a question could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("message is required")]
    EmptyQuestion,
    #[error("Missing API Keys (no LLM provider configured)")]
    NotConfigured,
    #[error("{0}")]
    Provider(#[from] ProviderError),
    #[error("model returned an empty reply")]
    EmptyReply,
    #[error("Note store error: {0}")]
    Store(#[from] DbError),
    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] TemplateError),
}

/// Answers natural-language questions grounded in note context.
#[derive(Clone)]
pub struct QueryAnswerer {
    provider: Option<Arc<dyn Provider>>,
}

impl QueryAnswerer {
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        Self { provider }
    }

    /// Answer `question` from an already assembled context.
    ///
    /// An empty context still reaches the model, with a marker saying there
    /// are no notes.
    pub async fn answer(&self, question: &str, context: &str) -> Answer {
        match self.try_answer(question, context).await {
            Ok(reply) => Answer::answered(reply),
            Err(e) => {
                warn!("Query soft-failed: {}", e);
                Answer::failed(&e)
            }
        }
    }

    /// Full query pipeline: list every note, assemble the context, answer.
    ///
    /// The note list is read once without a transaction; writes racing with
    /// the query may or may not be included.
    pub async fn ask(&self, store: &dyn NoteStore, question: &str) -> Answer {
        if question.trim().is_empty() {
            return Answer::failed(&AnswerError::EmptyQuestion);
        }

        let notes = match store.list().await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::error!("Failed to load notes for query: {}", e);
                return Answer::failed(&AnswerError::Store(e));
            }
        };
        info!("Answering question against {} notes", notes.len());

        self.answer(question, &context::assemble(&notes)).await
    }

    async fn try_answer(&self, question: &str, context: &str) -> Result<String, AnswerError> {
        if question.trim().is_empty() {
            return Err(AnswerError::EmptyQuestion);
        }
        let provider = self.provider.as_ref().ok_or(AnswerError::NotConfigured)?;

        let prompt = prompt::answer_prompt(context, question)?;
        let response = provider.generate(&prompt).await?;

        response
            .non_empty_text()
            .map(str::to_string)
            .ok_or(AnswerError::EmptyReply)
    }
}
