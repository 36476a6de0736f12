//! Chat backend abstraction.

use async_trait::async_trait;
use chatpression_core::Result;
use chatpression_core::transcript::{Message, MessageRole};
use futures::stream::BoxStream;
use serde::Serialize;

/// Reply text chunks in arrival order. An `Err` item ends the reply.
pub type TokenStream = BoxStream<'static, Result<String>>;

/// One prior message as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Body of `POST /api/chat/stream`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Conversation so far, excluding `message`.
    pub history: Vec<HistoryEntry>,
    pub user_age: u32,
    /// Korean gender label of the bot (`여성`/`남성`).
    pub bot_gender: String,
    pub bot_name: String,
}

/// A streaming chat backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one message and returns the reply as a stream of text chunks.
    ///
    /// # Errors
    ///
    /// Returns `ChatpressionError::Network` when the request cannot be sent
    /// or the server rejects it.
    async fn stream_reply(&self, request: &ChatRequest) -> Result<TokenStream>;
}
