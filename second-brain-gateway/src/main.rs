use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use second_brain_db::{NoteDbPool, NoteStore};
use second_brain_gateway::server;
use second_brain_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration before tracing so the configured level can apply
    let config = second_brain_core::Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.logging.level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Configuration loaded (default model: '{}', classifier mode: {:?})",
        config.default_model_alias(),
        config.settings.classifier.mode
    );

    let db_path = config.settings.database_path()?;
    let note_db = NoteDbPool::open(&db_path).await?;
    info!("Note database opened at {}", db_path.display());

    let provider = second_brain_gateway::build_provider(&config)?;
    if provider.is_none() {
        info!("Running without an LLM: notes get fallback metadata and /chat soft-fails");
    }

    let store: Arc<dyn NoteStore> = Arc::new(note_db.clone());
    let state = Arc::new(AppState::from_config(&config, store, provider));

    if config.settings.gateway.host != "127.0.0.1" && config.settings.gateway.host != "localhost" {
        tracing::warn!(
            "Gateway binding to non-localhost address: {}. Notes become reachable remotely.",
            config.settings.gateway.host
        );
    }
    if state.public_key.is_none() {
        tracing::warn!("SECOND_BRAIN_PUBLIC_KEY is not set; /public/notes is open");
    }

    let bind_addr = config.bind_addr();
    info!("Starting second-brain gateway on {}", bind_addr);

    let server_result = server::run(state, &bind_addr).await;

    note_db.close().await;
    server_result
}
