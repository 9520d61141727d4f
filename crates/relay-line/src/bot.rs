//! LINE Bot implementation
//!
//! Wires the completion client, the reply client and the webhook router
//! together and serves them.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tracing::info;

use relay_core::{Config, OpenAiClient};

use crate::api::LineApiClient;
use crate::error::{LineError, Result};
use crate::handler::MessageHandler;
use crate::webhook::{create_webhook_router, WebhookState};

/// LINE to LLM bridge
pub struct LineBot {
    config: Config,
    handler: Arc<MessageHandler>,
}

impl LineBot {
    /// Create a new LINE bot, rejecting incomplete configuration
    pub fn new(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| LineError::Config(e.to_string()))?;

        let completion = Arc::new(OpenAiClient::new(&config.openai)?);
        let replier = Arc::new(LineApiClient::new(&config.line)?);
        let handler = Arc::new(MessageHandler::new(completion, replier));

        Ok(Self { config, handler })
    }

    /// Build the webhook router
    pub fn router(&self) -> Router {
        create_webhook_router(WebhookState {
            channel_secret: self.config.line.channel_secret.clone(),
            handler: self.handler.clone(),
        })
    }

    /// Serve the webhook until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| LineError::Webhook(e.to_string()))?;

        info!("LINE webhook server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("LINE bot shutting down");
            })
            .await
            .map_err(|e| LineError::Webhook(e.to_string()))?;

        Ok(())
    }
}
