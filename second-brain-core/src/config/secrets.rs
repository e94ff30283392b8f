//! Secrets configuration loaded from environment variables only.
//!
//! API keys and the public listing key are never read from the TOML file.

use std::env;

use crate::provider::ProviderType;

/// Secrets loaded exclusively from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Google Gemini API key (env: GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,

    /// OpenAI-compatible API key (env: OPENAI_API_KEY)
    pub openai_api_key: Option<String>,

    /// Anthropic API key (env: ANTHROPIC_API_KEY)
    pub anthropic_api_key: Option<String>,

    /// Shared secret for the public notes listing (env: SECOND_BRAIN_PUBLIC_KEY)
    pub public_api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// Also loads a `.env` file if present (development convenience).
    /// Missing keys are not an error here; they surface when a request needs them.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Self {
        Self {
            gemini_api_key: read_var("GEMINI_API_KEY"),
            openai_api_key: read_var("OPENAI_API_KEY"),
            anthropic_api_key: read_var("ANTHROPIC_API_KEY"),
            public_api_key: read_var("SECOND_BRAIN_PUBLIC_KEY"),
        }
    }

    /// API key for a provider from its default environment variable.
    pub fn api_key_for(&self, provider: ProviderType) -> Option<&str> {
        match provider {
            ProviderType::Gemini => self.gemini_api_key.as_deref(),
            ProviderType::OpenAiCompatible => self.openai_api_key.as_deref(),
            ProviderType::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }

    /// Check if a specific provider has a key configured
    pub fn has_provider_type(&self, provider: ProviderType) -> bool {
        self.api_key_for(provider).is_some()
    }

    /// Get the providers with a configured key
    pub fn available_providers(&self) -> Vec<ProviderType> {
        [
            ProviderType::Gemini,
            ProviderType::OpenAiCompatible,
            ProviderType::Anthropic,
        ]
        .into_iter()
        .filter(|provider| self.has_provider_type(*provider))
        .collect()
    }
}

/// Read an environment variable, trimming whitespace; blank counts as unset.
pub(crate) fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENV_MUTEX;

    fn clear_env() {
        unsafe {
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("ANTHROPIC_API_KEY");
            env::remove_var("SECOND_BRAIN_PUBLIC_KEY");
        }
    }

    #[test]
    fn test_load_gemini_only() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe { env::set_var("GEMINI_API_KEY", "gm-test") }

        let secrets = Secrets::from_env_inner();
        assert_eq!(secrets.gemini_api_key, Some("gm-test".to_string()));
        assert!(secrets.anthropic_api_key.is_none());
        assert!(secrets.has_provider_type(ProviderType::Gemini));
        assert!(!secrets.has_provider_type(ProviderType::Anthropic));
        assert_eq!(secrets.available_providers(), vec![ProviderType::Gemini]);
    }

    #[test]
    fn test_values_are_trimmed_and_blank_is_unset() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("GEMINI_API_KEY", "  gm-padded \n");
            env::set_var("SECOND_BRAIN_PUBLIC_KEY", "   ");
        }

        let secrets = Secrets::from_env_inner();
        assert_eq!(secrets.gemini_api_key.as_deref(), Some("gm-padded"));
        assert!(secrets.public_api_key.is_none());
    }

    #[test]
    fn test_no_keys_is_not_an_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        let secrets = Secrets::from_env_inner();
        assert!(secrets.available_providers().is_empty());
    }
}
