//! relay-core: LINE to LLM relay core library
//!
//! Configuration loading and the OpenAI-compatible chat completion client
//! shared by the gateway crates.

pub mod config;
pub mod error;
pub mod llm;

pub use config::{Config, LineConfig, OpenAiConfig, ServerConfig};
pub use error::{Error, Result};
pub use llm::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionProvider, OpenAiClient,
};
