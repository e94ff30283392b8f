//! Google Gemini API client.

use std::path::PathBuf;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::providers::provider::{
    Provider, ProviderError, ProviderResponse, ProviderUsage, build_http_client, post_json,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    dump_dir: Option<PathBuf>,
}

/// Request body for the Gemini generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A single turn of content
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Response from the generateContent API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// Candidate response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Candidate content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Candidate part; non-text parts are ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Usage metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http_client: build_http_client(headers)?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dump_dir: None,
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Dump raw requests and responses into `dir`
    pub fn with_query_dump(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send a single user prompt
    pub async fn generate_content(
        &self,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let request_body = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(8192),
            }),
        };

        let request = self
            .http_client
            .post(self.generate_content_url())
            .header("x-goog-api-key", &self.api_key);

        post_json(
            request,
            &request_body,
            "gemini",
            &self.model,
            self.dump_dir.as_deref(),
        )
        .await
    }

    fn to_provider_response(
        &self,
        response: GenerateContentResponse,
    ) -> Result<ProviderResponse, ProviderError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::NoContent)?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = response.usage_metadata.map(|u| ProviderUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        Ok(ProviderResponse {
            id: format!("gemini_{}", Uuid::new_v4()),
            model: self.model.clone(),
            text,
            usage,
            stop_reason: candidate.finish_reason,
        })
    }
}

#[async_trait::async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let response = self.generate_content(prompt).await?;
        self.to_provider_response(response)
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}
