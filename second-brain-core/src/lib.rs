//! second-brain-core: shared note types and configuration.

pub mod config;
pub mod note;
pub mod provider;

// Config re-exports
pub use config::{
    ClassifierMode, ClassifierSettings, Config, ConfigError, ModelConfig, ResolvedModel, Secrets,
    Settings, SettingsError, load_dotenv,
};

// Note re-exports
pub use note::{
    NewNote, Note, NoteType, NoteUpdate, NoteValidationError, PublicNote, PublicNoteListing,
};
pub use provider::ProviderType;

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
