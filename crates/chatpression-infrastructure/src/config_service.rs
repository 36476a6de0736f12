//! Configuration service implementation.
//!
//! Loads `AppConfig` from `~/.config/chatpression/config.toml`, writing a
//! default file on first use, and caches the result.

use crate::paths::ChatpressionPaths;
use crate::storage::AtomicTomlFile;
use chatpression_core::Result;
use chatpression_core::config::AppConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable overriding `[chat] endpoint`.
pub const CHAT_ENDPOINT_ENV: &str = "CHATPRESSION_CHAT_ENDPOINT";

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// A missing or unreadable file yields the defaults; the failure is
    /// logged, never returned.
    pub fn get_config(&self) -> AppConfig {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref config) = *cached {
                return config.clone();
            }
        }

        let mut loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });
        apply_env_overrides(&mut loaded, |name| std::env::var(name).ok());

        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }

    /// Path of the config file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(ChatpressionPaths::config_file()?),
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let file = AtomicTomlFile::<AppConfig>::new(self.config_path()?);
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = AppConfig::default();
                file.save(&config)?;
                tracing::info!("Created default config at {:?}", file.path());
                Ok(config)
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = var(CHAT_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("Chat endpoint overridden by {}", CHAT_ENDPOINT_ENV);
        config.chat.endpoint = endpoint;
    }
}
