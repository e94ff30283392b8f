//! LLM provider identifiers shared by configuration and the gateway.

use serde::{Deserialize, Serialize};

/// Supported LLM provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Gemini,
    OpenAiCompatible,
    Anthropic,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAiCompatible => "openai_compatible",
            ProviderType::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding the provider's API key by default.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "GEMINI_API_KEY",
            ProviderType::OpenAiCompatible => "OPENAI_API_KEY",
            ProviderType::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderType::Gemini),
            "openai_compatible" | "openai-compatible" | "openaicompatible" | "openai" => {
                Ok(ProviderType::OpenAiCompatible)
            }
            "anthropic" => Ok(ProviderType::Anthropic),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}
