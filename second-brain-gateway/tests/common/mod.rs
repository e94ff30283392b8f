//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use second_brain_db::NoteDbPool;
use second_brain_db::test_helpers::create_test_note_pool;
use second_brain_gateway::providers::{Provider, ProviderError, ProviderResponse};

/// Replies with scripted texts in order, repeating the last one, and
/// records every prompt it receives.
#[derive(Clone)]
pub struct ScriptedProvider {
    replies: Arc<Vec<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn shared(&self) -> Option<Arc<dyn Provider>> {
        Some(Arc::new(self.clone()))
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        let index = (prompts.len() - 1).min(self.replies.len().saturating_sub(1));
        let text = self.replies.get(index).cloned().unwrap_or_default();

        Ok(ProviderResponse {
            id: format!("scripted_{}", prompts.len()),
            model: "scripted-model".to_string(),
            text,
            usage: None,
            stop_reason: Some("stop".to_string()),
        })
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}

/// Always fails with an HTTP error.
#[derive(Clone)]
pub struct FailingProvider;

#[async_trait::async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-model"
    }

    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::ApiError {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}

pub async fn test_db() -> NoteDbPool {
    create_test_note_pool()
        .await
        .expect("Failed to create in-memory note database")
}
