//! LINE message handler implementation

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use relay_core::llm::{ChatChoice, ChatCompletionRequestBuilder};
use relay_core::CompletionProvider;

use crate::api::ReplySender;
use crate::error::Result;
use crate::types::{EventKind, LineEvent};

/// System prompt sent ahead of every user message
pub const SYSTEM_PROMPT: &str = "You are a assistant.";

/// Message handler for LINE
pub struct MessageHandler {
    completion: Arc<dyn CompletionProvider>,
    replier: Arc<dyn ReplySender>,
}

impl MessageHandler {
    /// Create a new message handler
    pub fn new(completion: Arc<dyn CompletionProvider>, replier: Arc<dyn ReplySender>) -> Self {
        Self { completion, replier }
    }

    /// Process an incoming event
    pub async fn process_event(&self, event: &LineEvent) -> Result<()> {
        match event.kind() {
            EventKind::Text { text, reply_token } => self.handle_text(text, reply_token).await,
            EventKind::Sticker | EventKind::Image | EventKind::Other => {
                debug!("Ignoring {} event: {:?}", event.event_type, event.kind());
                Ok(())
            }
        }
    }

    /// Ask the model for a reply and send it back
    async fn handle_text(&self, text: &str, reply_token: Option<&str>) -> Result<()> {
        let Some(reply_token) = reply_token else {
            warn!("Text message without reply token, skipping");
            return Ok(());
        };

        info!("Processing text message ({} chars)", text.chars().count());

        let request = ChatCompletionRequestBuilder::new(self.completion.model())
            .system(SYSTEM_PROMPT)
            .user(text)
            .build();

        let response = self.completion.chat_completion(request).await?;

        if response.choices.is_empty() {
            warn!("Completion returned no choices");
            return Err(relay_core::Error::CompletionApi(
                "Completion response contained no choices".to_string(),
            )
            .into());
        }

        // Emptiness is judged before trimming; whitespace-only content is still sent.
        let reply = select_candidate(&response.choices, &mut rand::thread_rng())
            .and_then(ChatChoice::content)
            .filter(|content| !content.is_empty())
            .map(|content| content.trim().to_string());

        let Some(reply) = reply else {
            debug!("Selected candidate has no content, not replying");
            return Ok(());
        };

        self.replier.reply_text(reply_token, &reply).await
    }
}

/// Pick one candidate uniformly at random
pub fn select_candidate<'a, R: Rng + ?Sized>(
    choices: &'a [ChatChoice],
    rng: &mut R,
) -> Option<&'a ChatChoice> {
    choices.choose(rng)
}
