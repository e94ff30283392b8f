//! Anthropic Messages API client.

use std::path::PathBuf;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::providers::provider::{
    Provider, ProviderError, ProviderResponse, ProviderUsage, build_http_client, post_json,
};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// Anthropic API client
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    dump_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Content block in the response; only text blocks carry output here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Token usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
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

    /// Send one user message and return the raw API response.
    pub async fn send_message(&self, prompt: &str) -> Result<MessagesResponse, ProviderError> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: 8192,
            messages: vec![UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .http_client
            .post(format!("{}/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key);

        post_json(
            request,
            &request_body,
            "anthropic",
            &self.model,
            self.dump_dir.as_deref(),
        )
        .await
    }

    /// Concatenate every text block of a response.
    pub fn extract_all_text(response: &MessagesResponse) -> String {
        response
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn to_provider_response(&self, response: MessagesResponse) -> ProviderResponse {
        ProviderResponse {
            text: Self::extract_all_text(&response),
            id: response.id,
            model: response.model,
            usage: response.usage.map(|u| ProviderUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
            stop_reason: response.stop_reason,
        }
    }
}

#[async_trait::async_trait]
impl Provider for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let response = self.send_message(prompt).await?;
        if response.content.is_empty() {
            return Err(ProviderError::NoContent);
        }
        Ok(self.to_provider_response(response))
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}
