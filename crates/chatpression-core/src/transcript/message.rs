//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the author of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message written by the user.
    User,
    /// Message produced by the chat bot.
    Assistant,
}

/// A single message in a conversation transcript.
///
/// Messages are immutable once appended to a [`Transcript`](super::Transcript).
/// The timestamp is optional: transcripts stored by older clients carry only
/// role and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The author of the message.
    pub role: MessageRole,
    /// The message text.
    pub content: String,
    /// When the message was completed (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Creates a user message without a timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Creates an assistant message without a timestamp.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Attaches a completion timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns true when the user wrote this message.
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Number of characters (Unicode scalar values) in the content.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
