//! Configuration management for second-brain.
//!
//! Secrets come from environment variables, settings from a TOML file.
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `GEMINI_API_KEY` - Google Gemini API key
//! - `OPENAI_API_KEY` - OpenAI-compatible API key
//! - `ANTHROPIC_API_KEY` - Anthropic API key
//! - `SECOND_BRAIN_PUBLIC_KEY` - shared secret of the public notes listing
//!
//! ## Settings (TOML File)
//! Located at `~/.config/second-brain/config.toml`:
//! ```toml
//! default_model = "flash"
//!
//! [models.flash]
//! provider = "gemini"
//! model = "gemini-2.5-flash"
//!
//! [gateway]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [classifier]
//! mode = "full"
//! ```
//!
//! A missing API key does not stop the gateway from starting. Requests that
//! need the model report the missing configuration instead.

mod secrets;
mod settings;

use crate::provider::ProviderType;

pub use secrets::Secrets;
pub use settings::{
    ClassifierMode, ClassifierSettings, DatabaseSettings, GatewaySettings, LoggingSettings,
    ModelConfig, Settings, SettingsError,
};

/// Combined configuration containing both secrets and settings.
///
/// Built once at process start and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Default model alias is not set")]
    DefaultModelNotSet,

    #[error("Default model alias '{0}' not found in config")]
    DefaultModelNotFound(String),

    #[error("Provider '{provider}' for model '{alias}' has no configured API key ({env})")]
    MissingApiKey {
        provider: String,
        alias: String,
        env: String,
    },

    #[error("Provider '{provider}' for model '{alias}' requires a base_url")]
    MissingBaseUrl { provider: String, alias: String },
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Only malformed settings are fatal here; model resolution is checked
    /// separately through [`Config::resolve_default_model`].
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env();
        let settings = Settings::load()?;

        Ok(Self { secrets, settings })
    }

    /// Get the default model alias.
    pub fn default_model_alias(&self) -> &str {
        self.settings.default_model.trim()
    }

    /// Get a model configuration by alias.
    pub fn model_config(&self, alias: &str) -> Option<&ModelConfig> {
        self.settings.models.get(alias)
    }

    /// Check if a provider is available (has API key configured).
    pub fn has_provider(&self, provider: ProviderType) -> bool {
        self.secrets.has_provider_type(provider)
    }

    /// API key for a model: `api_key_env` override first, then the provider default.
    pub fn api_key_for_model(&self, model: &ModelConfig) -> Option<String> {
        match model.api_key_env.as_deref() {
            Some(env_name) => secrets::read_var(env_name),
            None => self
                .secrets
                .api_key_for(model.provider)
                .map(str::to_string),
        }
    }

    /// Resolve the default model into everything needed to build a client.
    ///
    /// OpenAI-compatible endpoints may run without a key (local servers),
    /// every other provider requires one.
    pub fn resolve_default_model(&self) -> Result<ResolvedModel, ConfigError> {
        let alias = self.default_model_alias();
        if alias.is_empty() {
            return Err(ConfigError::DefaultModelNotSet);
        }

        let model = self
            .model_config(alias)
            .ok_or_else(|| ConfigError::DefaultModelNotFound(alias.to_string()))?;

        let api_key = self.api_key_for_model(model);

        match model.provider {
            ProviderType::OpenAiCompatible => {
                if model.base_url.is_none() {
                    return Err(ConfigError::MissingBaseUrl {
                        provider: model.provider.to_string(),
                        alias: alias.to_string(),
                    });
                }
            }
            ProviderType::Gemini | ProviderType::Anthropic => {
                if api_key.is_none() {
                    return Err(ConfigError::MissingApiKey {
                        provider: model.provider.to_string(),
                        alias: alias.to_string(),
                        env: model
                            .api_key_env
                            .clone()
                            .unwrap_or_else(|| model.provider.default_api_key_env().to_string()),
                    });
                }
            }
        }

        Ok(ResolvedModel {
            alias: alias.to_string(),
            provider: model.provider,
            model: model.model.clone(),
            base_url: model.base_url.clone(),
            api_key,
        })
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        self.settings.bind_addr()
    }

    /// Shared secret guarding the public listing, if any.
    pub fn public_api_key(&self) -> Option<&str> {
        self.secrets.public_api_key.as_deref()
    }
}

/// A model alias resolved against secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub alias: String,
    pub provider: ProviderType,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

/// Load .env file if it exists (for development convenience).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
