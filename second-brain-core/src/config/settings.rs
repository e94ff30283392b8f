//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/second-brain/config.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::provider::ProviderType;

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# second-brain configuration file
# Located at: ~/.config/second-brain/config.toml
#
# This file contains non-sensitive configuration.
# Secrets are loaded from environment variables:
#   - GEMINI_API_KEY
#   - OPENAI_API_KEY (optional, for openai_compatible models)
#   - ANTHROPIC_API_KEY
#   - SECOND_BRAIN_PUBLIC_KEY (optional, guards the public notes listing)

# Model alias used for classification and answering (must exist under [models])
default_model = "flash"

[models]
[models.flash]
provider = "gemini"
model = "gemini-2.5-flash"
# [models.local]
# provider = "openai_compatible"
# model = "llama3.1"
# base_url = "http://127.0.0.1:11434/v1"

[gateway]
host = "127.0.0.1"
port = 3000

[database]
# path = "/var/lib/second-brain/notes.sqlite3"

[classifier]
# "full" derives summary, tags and type; "summary" only derives the summary
mode = "full"
summary_fallback_chars = 100

[logging]
level = "info"
# dump_queries = true
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Configured models keyed by alias
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,

    /// Alias of the model used by the classifier and the answerer
    #[serde(default)]
    pub default_model: String,

    /// Gateway server configuration
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Note database configuration
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Ingestion-time classification settings
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Model configuration entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Provider type (e.g. "gemini", "openai_compatible", "anthropic")
    #[serde(
        deserialize_with = "deserialize_model_provider",
        serialize_with = "serialize_model_provider"
    )]
    pub provider: ProviderType,
    /// Model identifier
    pub model: String,
    /// Base URL override (required for OpenAI-compatible providers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional env var name used to resolve provider API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// Gateway server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySettings {
    /// Host to bind to
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

/// Database settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// SQLite file path (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Which classification path runs when a note is ingested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// Derive summary, tags and type.
    #[default]
    Full,
    /// Derive only a one-sentence summary; tags and type come from the caller.
    Summary,
}

/// Classifier settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub mode: ClassifierMode,

    /// Characters of content kept when the summary-only path falls back
    #[serde(default = "default_summary_fallback_chars")]
    pub summary_fallback_chars: usize,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Dump raw LLM request/response JSON to ./logs/queries/
    #[serde(default)]
    pub dump_queries: bool,
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}

fn default_summary_fallback_chars() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            mode: ClassifierMode::Full,
            summary_fallback_chars: default_summary_fallback_chars(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dump_queries: false,
        }
    }
}

fn deserialize_model_provider<'de, D>(deserializer: D) -> Result<ProviderType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}

fn serialize_model_provider<S>(provider: &ProviderType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(provider.as_str())
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Data directory not found")]
    DataDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/second-brain/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("SECOND_BRAIN_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("second-brain");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Resolve the default model config.
    pub fn default_model_config(&self) -> Option<&ModelConfig> {
        self.models.get(self.default_model.trim())
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }

    /// Database file path, configured or `<data_dir>/second-brain/notes.sqlite3`.
    pub fn database_path(&self) -> Result<PathBuf, SettingsError> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or(SettingsError::DataDirNotFound)?;
        Ok(data_dir.join("second-brain").join("notes.sqlite3"))
    }
}
