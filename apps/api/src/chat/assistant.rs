//! Chat Assistant — one provider call per visitor message.
//!
//! The history comes from the client; only the most recent turns are forwarded
//! so a long conversation cannot grow the request without bound.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::chat::prompts::chat_system;
use crate::llm_client::{CompletionProvider, CompletionRequest, KeyRotator, LlmError, Turn};

pub const MAX_MESSAGE_CHARS: usize = 4000;
pub const MAX_HISTORY_TURNS: usize = 20;
pub const GENERIC_FAILURE_MESSAGE: &str = "The assistant is unavailable right now. Please try again.";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), String> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err("Message cannot be empty".to_string());
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!(
                "Message is too long (max {MAX_MESSAGE_CHARS} characters)"
            ));
        }
        Ok(())
    }

    /// Recent non-empty history followed by the new user message.
    fn to_turns(&self) -> Vec<Turn> {
        let history: Vec<&Turn> = self
            .history
            .iter()
            .filter(|t| !t.text.trim().is_empty())
            .collect();
        let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);

        history
            .into_iter()
            .skip(skip)
            .cloned()
            .chain(std::iter::once(Turn::user(self.message.trim())))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatResult {
    Success { reply: String },
    Failure { message: String },
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("no API key available")]
    MissingCredential,

    #[error("provider call failed: {0}")]
    Provider(#[from] LlmError),
}

#[derive(Clone)]
pub struct ChatAssistant {
    rotator: Arc<KeyRotator>,
    provider: Arc<dyn CompletionProvider>,
}

impl ChatAssistant {
    pub fn new(rotator: Arc<KeyRotator>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { rotator, provider }
    }

    pub async fn reply(&self, request: &ChatRequest) -> ChatResult {
        let request_id = Uuid::new_v4();

        match self.converse(request).await {
            Ok(reply) => {
                info!(%request_id, history = request.history.len(), "Chat reply generated");
                ChatResult::Success { reply }
            }
            Err(ChatError::Validation(message)) => {
                info!(%request_id, "Chat message rejected: {message}");
                ChatResult::Failure { message }
            }
            Err(e) => {
                error!(%request_id, "Chat request failed: {e}");
                ChatResult::Failure {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn converse(&self, request: &ChatRequest) -> Result<String, ChatError> {
        request.validate().map_err(ChatError::Validation)?;

        let api_key = self.rotator.next_key();
        if api_key.is_empty() {
            warn!("Chat message received but no API key is configured");
            return Err(ChatError::MissingCredential);
        }

        let completion = CompletionRequest {
            system: chat_system(),
            turns: request.to_turns(),
        };

        Ok(self.provider.complete(&api_key, &completion).await?)
    }
}
