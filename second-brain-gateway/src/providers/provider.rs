//! Provider trait for abstracting different LLM providers.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::providers::query_dump::QueryDump;

/// Unified usage information across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Unified response type across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: String,
    pub model: String,
    /// Generated text, all text parts joined
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ProviderUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl ProviderResponse {
    /// Trimmed text, `None` when the model produced nothing.
    pub fn non_empty_text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No content in response")]
    NoContent,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

/// Text-completion capability of an LLM backend.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Send a single prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Clone the provider (boxed)
    fn clone_box(&self) -> Box<dyn Provider>;
}

impl Clone for Box<dyn Provider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Build the shared HTTP client used by all provider clients.
pub(crate) fn build_http_client(
    headers: reqwest::header::HeaderMap,
) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_secs(120))
        .build()?)
}

/// POST a JSON body and decode the JSON reply.
///
/// Non-2xx statuses become [`ProviderError::ApiError`] carrying a body preview.
/// When `dump_dir` is set the raw request and response are written there.
pub(crate) async fn post_json<B, R>(
    request: reqwest::RequestBuilder,
    body: &B,
    provider: &str,
    model: &str,
    dump_dir: Option<&Path>,
) -> Result<R, ProviderError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let dump = match dump_dir {
        Some(dir) => QueryDump::request(dir, provider, model, &serde_json::to_value(body)?).await,
        None => None,
    };

    let response = request.json(body).send().await?;
    let status = response.status();
    let response_text = response.text().await?;

    if let Some(dump) = dump {
        dump.response(&response_text).await;
    }

    if !status.is_success() {
        return Err(ProviderError::ApiError {
            status: status.as_u16(),
            message: body_preview(&response_text).to_string(),
        });
    }

    serde_json::from_str(&response_text).map_err(|e| {
        ProviderError::InvalidFormat(format!(
            "Failed to parse {provider} response: {e}\nBody preview: {}",
            body_preview(&response_text)
        ))
    })
}

/// Shorten a response body for error messages.
pub(crate) fn body_preview(body: &str) -> &str {
    if body.len() <= 500 {
        return body;
    }
    let mut end = 500;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
