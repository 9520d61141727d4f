//! relay-line: LINE webhook bridge
//!
//! Receives LINE Messaging API webhooks, asks an OpenAI-compatible model for a
//! reply to each text message and sends it back through the reply API.

pub mod api;
pub mod bot;
pub mod error;
pub mod handler;
pub mod types;
pub mod webhook;

#[cfg(test)]
mod testing;

pub use api::{LineApiClient, ReplySender};
pub use bot::LineBot;
pub use error::{LineError, Result};
pub use handler::MessageHandler;
pub use webhook::{create_webhook_router, WebhookState};
