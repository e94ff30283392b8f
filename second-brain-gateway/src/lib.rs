//! second-brain-gateway: classification, question answering and the HTTP API.

pub mod answer;
pub mod classifier;
pub mod context;
pub mod ingest;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod state;

pub use answer::{Answer, AnswerError, AnswerStatus, QueryAnswerer};
pub use classifier::{
    Classification, ClassificationFailure, ClassificationOutcome, ClassifyMode,
    MetadataClassifier, NoteMetadata,
};
pub use context::{RECORD_DELIMITER, assemble};
pub use ingest::{IngestError, IngestRequest, Ingested, Ingestor, Stored};
pub use providers::{
    Provider, ProviderError, ProviderResponse, ProviderSetupError, ProviderUsage, build_provider,
};
pub use state::AppState;
