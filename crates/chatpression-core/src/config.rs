//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section and
//! field has a default so a partial file is valid.

use crate::unlock::REWARD_DURATION_TICKS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:8000/api/chat/stream";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub unlock: UnlockConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// URL of the streaming chat endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Optional catalog files; the embedded copies are used when unset.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReferenceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_types: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicators: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UnlockConfig {
    #[serde(default = "default_reward_ticks")]
    pub reward_ticks: u32,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for UnlockConfig {
    fn default() -> Self {
        Self {
            reward_ticks: default_reward_ticks(),
            tick_millis: default_tick_millis(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Directory holding session files; `sessions/` under the config
    /// directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_dir: None,
            session_id: default_session_id(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Also write a daily log file under `logs/`.
    #[serde(default)]
    pub file: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            level: default_log_level(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

fn default_reward_ticks() -> u32 {
    REWARD_DURATION_TICKS
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_session_id() -> String {
    "default".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
