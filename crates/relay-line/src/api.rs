//! LINE Messaging API client
//!
//! Communicates with LINE Messaging API

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use relay_core::LineConfig;

use crate::error::{LineError, Result};
use crate::types::*;

/// Sends a text reply addressed by a reply token
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()>;
}

/// LINE Messaging API client
#[derive(Clone)]
pub struct LineApiClient {
    client: Client,
    channel_access_token: String,
    base_url: String,
}

impl LineApiClient {
    /// Create a new LINE API client
    pub fn new(config: &LineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LineError::HttpError)?;

        Ok(Self {
            client,
            channel_access_token: config.channel_access_token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Add authorization header
    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.channel_access_token)
    }

    /// Reply to a message
    pub async fn reply_message(&self, reply_token: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot/message/reply", self.base_url);

        let body = ReplyMessage {
            reply_token: reply_token.to_string(),
            messages: vec![MessageContent::Text { text: text.to_string() }],
        };

        debug!("Replying to message");

        let response = self
            .add_auth(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(LineError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Reply message failed: {} - {}", status, error_text);
            return Err(LineError::ApiError(format!(
                "{}: {}",
                status,
                describe_error(&error_text)
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ReplySender for LineApiClient {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        self.reply_message(reply_token, text).await
    }
}

/// Prefer the API's own error message over the raw body
fn describe_error(body: &str) -> String {
    match serde_json::from_str::<LineApiResponse>(body) {
        Ok(LineApiResponse {
            message: Some(message),
            details,
        }) => {
            let details = details
                .unwrap_or_default()
                .into_iter()
                .map(|d| match d.property {
                    Some(property) => format!("{} ({})", d.message, property),
                    None => d.message,
                })
                .collect::<Vec<_>>();

            if details.is_empty() {
                message
            } else {
                format!("{} [{}]", message, details.join(", "))
            }
        }
        _ => body.to_string(),
    }
}
