//! Error types for the ChatPression workspace.

use thiserror::Error;

/// Generic message shown to the user when the analysis cannot be produced.
pub const ANALYSIS_ERROR_MESSAGE: &str = "분석 중 오류가 발생했습니다. 다시 시도해주세요.";

/// Generic message shown inline when a chat message could not be delivered.
pub const SEND_FAILURE_MESSAGE: &str = "메시지 전송에 실패했습니다. 다시 시도해주세요.";

/// A shared error type for the entire ChatPression workspace.
///
/// Variants are typed and structured; common library errors convert
/// automatically through the `From` implementations below.
#[derive(Error, Debug, Clone)]
pub enum ChatpressionError {
    /// Reference data is missing, malformed or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// The chat backend could not be reached or the stream broke off.
    #[error("Network error: {0}")]
    Network(String),

    /// Session storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatpressionError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns the end-user message for this error.
    ///
    /// The text never contains raw error detail; the full error is meant for
    /// the log only.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => SEND_FAILURE_MESSAGE,
            _ => ANALYSIS_ERROR_MESSAGE,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChatpressionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatpressionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChatpressionError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ChatpressionError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<regex::Error> for ChatpressionError {
    fn from(err: regex::Error) -> Self {
        Self::Configuration(format!("invalid lexicon pattern: {}", err))
    }
}

/// A type alias for `Result<T, ChatpressionError>`.
pub type Result<T> = std::result::Result<T, ChatpressionError>;
