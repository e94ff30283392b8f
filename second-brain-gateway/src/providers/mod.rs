pub mod anthropic;
pub mod gemini;
pub mod openai_compatible;
pub mod provider;
pub mod query_dump;

use std::sync::Arc;

use second_brain_core::{Config, ConfigError, ProviderType, ResolvedModel};
use tracing::{info, warn};

use self::anthropic::AnthropicClient;
use self::gemini::GeminiClient;
use self::openai_compatible::OpenAiCompatibleClient;
use self::query_dump::DEFAULT_DUMP_DIR;

pub use provider::{Provider, ProviderError, ProviderResponse, ProviderUsage};

/// Errors raised while turning configuration into a provider client.
#[derive(Debug, thiserror::Error)]
pub enum ProviderSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build {provider} client: {source}")]
    Client {
        provider: ProviderType,
        #[source]
        source: ProviderError,
    },
}

/// Build the client for the configured default model.
///
/// Returns `Ok(None)` when no model is selected or its API key is absent, so
/// the gateway can still serve notes without a model. A model alias that
/// points nowhere, or an OpenAI-compatible model without `base_url`, is an
/// error.
pub fn build_provider(config: &Config) -> Result<Option<Arc<dyn Provider>>, ProviderSetupError> {
    let resolved = match config.resolve_default_model() {
        Ok(resolved) => resolved,
        Err(err @ (ConfigError::DefaultModelNotSet | ConfigError::MissingApiKey { .. })) => {
            warn!("LLM provider not configured: {}", err);
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let dump_dir = config
        .settings
        .logging
        .dump_queries
        .then_some(DEFAULT_DUMP_DIR);

    let provider = client_for(&resolved, dump_dir).map_err(|source| ProviderSetupError::Client {
        provider: resolved.provider,
        source,
    })?;

    info!(
        "Using model '{}' -> {}/{}",
        resolved.alias, resolved.provider, resolved.model
    );
    Ok(Some(provider))
}

fn client_for(
    resolved: &ResolvedModel,
    dump_dir: Option<&str>,
) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = resolved.api_key.clone().unwrap_or_default();

    Ok(match resolved.provider {
        ProviderType::Gemini => {
            let mut client = GeminiClient::new(api_key, &resolved.model)?;
            if let Some(base_url) = &resolved.base_url {
                client = client.with_base_url(base_url);
            }
            if let Some(dir) = dump_dir {
                client = client.with_query_dump(dir);
            }
            Arc::new(client)
        }
        ProviderType::Anthropic => {
            let mut client = AnthropicClient::new(api_key, &resolved.model)?;
            if let Some(base_url) = &resolved.base_url {
                client = client.with_base_url(base_url);
            }
            if let Some(dir) = dump_dir {
                client = client.with_query_dump(dir);
            }
            Arc::new(client)
        }
        ProviderType::OpenAiCompatible => {
            let base_url = resolved.base_url.clone().unwrap_or_default();
            let mut client =
                OpenAiCompatibleClient::new(base_url, resolved.api_key.clone(), &resolved.model)?;
            if let Some(dir) = dump_dir {
                client = client.with_query_dump(dir);
            }
            Arc::new(client)
        }
    })
}
