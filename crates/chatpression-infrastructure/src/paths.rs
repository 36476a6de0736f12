//! Unified path management for chatpression files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/chatpression/      # Config directory
//! ├── config.toml              # Application configuration
//! ├── sessions/                # One TOML file per chat session
//! │   └── default.toml
//! └── logs/                    # Application logs
//!     └── chatpression.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "chatpression";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for chatpression_core::ChatpressionError {
    fn from(e: PathError) -> Self {
        chatpression_core::ChatpressionError::configuration(e.to_string())
    }
}

/// Unified path management for chatpression.
pub struct ChatpressionPaths;

impl ChatpressionPaths {
    /// Returns the chatpression configuration directory
    /// (e.g. `~/.config/chatpression/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory for session files.
    pub fn sessions_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("sessions"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = ChatpressionPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("chatpression"));
    }

    #[test]
    fn test_config_file() {
        let config_file = ChatpressionPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = ChatpressionPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_sessions_and_logs_dirs() {
        let config_dir = ChatpressionPaths::config_dir().unwrap();
        let sessions_dir = ChatpressionPaths::sessions_dir().unwrap();
        let logs_dir = ChatpressionPaths::logs_dir().unwrap();
        assert!(sessions_dir.ends_with("sessions"));
        assert!(logs_dir.ends_with("logs"));
        assert!(sessions_dir.starts_with(&config_dir));
        assert!(logs_dir.starts_with(&config_dir));
    }
}
