//! Webhook server for LINE Bot
//!
//! Handles incoming webhooks from LINE Messaging API

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::error::{LineError, Result};
use crate::handler::MessageHandler;
use crate::types::WebhookBody;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 HMAC-SHA256 of the request body
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub channel_secret: String,
    pub handler: Arc<MessageHandler>,
}

/// Create webhook router
pub fn create_webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/callback", post(handle_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Handle incoming webhook
async fn handle_callback(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str> {
    let body = std::str::from_utf8(&body).map_err(|_| LineError::InvalidEncoding)?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing x-line-signature header");
            LineError::MissingSignature
        })?;

    verify_signature(&state.channel_secret, body, signature).inspect_err(|_| {
        warn!("Invalid signature");
    })?;

    let webhook: WebhookBody = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse webhook body: {:?}", e);
        LineError::InvalidBody(e.to_string())
    })?;

    debug!(
        "Received {} event(s) for destination: {}",
        webhook.events.len(),
        webhook.destination
    );

    for event in &webhook.events {
        state.handler.process_event(event).await.inspect_err(|e| {
            error!("Error processing event: {}", e);
        })?;
    }

    Ok("OK")
}

/// Verify LINE signature
///
/// The signature is the base64 HMAC-SHA256 of the raw body keyed with the
/// channel secret. Comparison is constant time.
pub fn verify_signature(channel_secret: &str, body: &str, signature: &str) -> Result<()> {
    let invalid = || LineError::InvalidSignature(signature.to_string());

    let provided = STANDARD.decode(signature).map_err(|_| invalid())?;

    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| LineError::Config(e.to_string()))?;
    mac.update(body.as_bytes());

    mac.verify_slice(&provided).map_err(|_| invalid())
}
