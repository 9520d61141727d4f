//! Recording fakes for the completion and reply services

use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::llm::{ChatChoice, ChatMessageResponse};
use relay_core::{ChatCompletionRequest, ChatCompletionResponse, CompletionProvider};

use crate::api::ReplySender;
use crate::error::{LineError, Result};

pub const TEST_MODEL: &str = "test-model";

/// Answers every request with a fixed set of candidates
pub struct FakeCompletion {
    candidates: Vec<Option<String>>,
    fail: bool,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl FakeCompletion {
    pub fn with_candidates(candidates: &[Option<&str>]) -> Self {
        Self {
            candidates: candidates.iter().map(|c| c.map(str::to_string)).collect(),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            candidates: Vec::new(),
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    fn model(&self) -> &str {
        TEST_MODEL
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> relay_core::Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(relay_core::Error::CompletionApi(
                "503 Service Unavailable: upstream down".to_string(),
            ));
        }

        let choices = self
            .candidates
            .iter()
            .enumerate()
            .map(|(index, content)| ChatChoice {
                index: index as u32,
                message: ChatMessageResponse {
                    role: "assistant".to_string(),
                    content: content.clone(),
                },
                finish_reason: Some("stop".to_string()),
            })
            .collect();

        Ok(ChatCompletionResponse {
            id: "chatcmpl-test".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: TEST_MODEL.to_string(),
            choices,
            usage: None,
        })
    }
}

/// Records every reply instead of sending it
#[derive(Default)]
pub struct FakeReplier {
    fail: bool,
    replies: Mutex<Vec<(String, String)>>,
}

impl FakeReplier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for FakeReplier {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));

        if self.fail {
            return Err(LineError::ApiError("400: Invalid reply token".to_string()));
        }
        Ok(())
    }
}
