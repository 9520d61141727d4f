//! LLM API client and types
//!
//! Talks to OpenAI-compatible `/chat/completions` endpoints.

mod client;
mod types;

pub use client::{CompletionProvider, OpenAiClient};
pub use types::*;
