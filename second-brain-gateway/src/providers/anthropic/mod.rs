//! Anthropic provider.

pub mod client;

pub use client::{AnthropicClient, ContentBlock, MessagesResponse, Usage};
