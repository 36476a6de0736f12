//! Wiring shared by every command.

use anyhow::{Context, Result};
use chatpression_core::config::AppConfig;
use chatpression_core::storage::SessionStorage;
use chatpression_infrastructure::{
    ChatpressionPaths, ConfigService, JsonReferenceRepository, TomlSessionStorage,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AppContext {
    pub config: AppConfig,
    pub config_path: Option<PathBuf>,
    pub session_id: String,
    pub storage: Arc<dyn SessionStorage>,
    pub reference: Arc<JsonReferenceRepository>,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, session: Option<&str>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let config = service.get_config();

        let session_id = session
            .map(str::to_string)
            .unwrap_or_else(|| config.storage.session_id.clone());
        let sessions_dir = match &config.storage.session_dir {
            Some(dir) => dir.clone(),
            None => ChatpressionPaths::sessions_dir()?,
        };
        let storage = TomlSessionStorage::new(&sessions_dir, &session_id)
            .with_context(|| format!("Cannot open session '{}'", session_id))?;

        Ok(Self {
            reference: Arc::new(JsonReferenceRepository::from_config(&config.reference)),
            config_path: service.config_path().ok(),
            session_id,
            storage: Arc::new(storage),
            config,
        })
    }
}
