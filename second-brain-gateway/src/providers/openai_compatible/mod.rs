//! OpenAI-compatible provider for hosted and local endpoints.

pub mod client;

pub use client::OpenAiCompatibleClient;
