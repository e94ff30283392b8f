//! OpenAI-compatible Chat Completions client.
//!
//! Works against OpenAI itself and local servers (llama.cpp, Ollama, vLLM)
//! that expose `/v1/chat/completions`.

use std::path::PathBuf;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::providers::provider::{
    Provider, ProviderError, ProviderResponse, ProviderUsage, build_http_client, post_json,
};

/// OpenAI-compatible API client.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    dump_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl OpenAiCompatibleClient {
    /// Create a new OpenAI-compatible client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http_client: build_http_client(headers)?,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            dump_dir: None,
        })
    }

    /// Dump raw requests and responses into `dir`
    pub fn with_query_dump(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    fn chat_completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn auth_header(&self) -> Option<HeaderValue> {
        let api_key = self.api_key.as_deref()?;
        HeaderValue::from_str(&format!("Bearer {}", api_key)).ok()
    }

    fn convert_response(
        &self,
        response: ChatCompletionsResponse,
    ) -> Result<ProviderResponse, ProviderError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::NoContent)?;

        Ok(ProviderResponse {
            id: response.id,
            model: if response.model.is_empty() {
                self.model.clone()
            } else {
                response.model
            },
            text: choice.message.content.unwrap_or_default(),
            usage: response.usage.map(|u| ProviderUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
            stop_reason: choice.finish_reason,
        })
    }
}

#[async_trait::async_trait]
impl Provider for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        "openai_compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let request_body = ChatCompletionsRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: 8192,
        };

        let mut request = self.http_client.post(self.chat_completions_url());
        if let Some(auth) = self.auth_header() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response: ChatCompletionsResponse = post_json(
            request,
            &request_body,
            self.name(),
            &self.model,
            self.dump_dir.as_deref(),
        )
        .await?;

        self.convert_response(response)
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}
