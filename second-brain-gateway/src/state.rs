use std::sync::Arc;

use second_brain_core::Config;
use second_brain_db::NoteStore;

use crate::answer::QueryAnswerer;
use crate::classifier::MetadataClassifier;
use crate::ingest::Ingestor;
use crate::providers::Provider;

/// Shared application state, built once in `main` and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub ingestor: Ingestor,
    pub answerer: QueryAnswerer,
    /// Shared secret for `/public/notes`; `None` leaves it open
    pub public_key: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn NoteStore>,
        ingestor: Ingestor,
        answerer: QueryAnswerer,
        public_key: Option<String>,
    ) -> Self {
        Self {
            store,
            ingestor,
            answerer,
            public_key,
        }
    }

    /// Wire the pipelines from configuration around one provider.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn NoteStore>,
        provider: Option<Arc<dyn Provider>>,
    ) -> Self {
        let classifier = MetadataClassifier::new(provider.clone())
            .with_summary_fallback_chars(config.settings.classifier.summary_fallback_chars);
        let ingestor = Ingestor::new(classifier, config.settings.classifier.mode.into());

        Self::new(
            store,
            ingestor,
            QueryAnswerer::new(provider),
            config.public_api_key().map(str::to_string),
        )
    }

    /// Whether a public listing request carries the right key.
    pub fn public_key_matches(&self, key: Option<&str>) -> bool {
        match self.public_key.as_deref() {
            Some(expected) => key == Some(expected),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifyMode;
    use second_brain_core::{ClassifierMode, Secrets, Settings};
    use second_brain_db::test_helpers::create_test_note_pool;

    #[tokio::test]
    async fn test_from_config_uses_classifier_mode_and_key() {
        let mut settings = Settings::default();
        settings.classifier.mode = ClassifierMode::Summary;
        let config = Config {
            secrets: Secrets {
                public_api_key: Some("s3cret".to_string()),
                ..Secrets::default()
            },
            settings,
        };
        let store = Arc::new(create_test_note_pool().await.unwrap());

        let state = AppState::from_config(&config, store, None);

        assert_eq!(state.ingestor.mode(), ClassifyMode::SummaryOnly);
        assert!(state.public_key_matches(Some("s3cret")));
        assert!(!state.public_key_matches(Some("wrong")));
        assert!(!state.public_key_matches(None));
    }

    #[tokio::test]
    async fn test_open_listing_without_key() {
        let store = Arc::new(create_test_note_pool().await.unwrap());
        let state = AppState::new(
            store,
            Ingestor::new(MetadataClassifier::new(None), ClassifyMode::Full),
            QueryAnswerer::new(None),
            None,
        );
        assert!(state.public_key_matches(None));
        assert!(state.public_key_matches(Some("anything")));
    }
}
