//! TOML-file backed `SessionStorage`.

use crate::paths::ChatpressionPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use chatpression_core::storage::SessionStorage;
use chatpression_core::{ChatpressionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk shape of one session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Stores each session as `<sessions_dir>/<session_id>.toml`.
///
/// Every write is a locked read-modify-write through [`AtomicTomlFile`]; the
/// blocking file work runs on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct TomlSessionStorage {
    file: AtomicTomlFile<SessionDocument>,
}

impl TomlSessionStorage {
    /// Creates a storage for one session inside `sessions_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ChatpressionError::Storage` when the session id is not a
    /// plain file name.
    pub fn new(sessions_dir: impl AsRef<Path>, session_id: &str) -> Result<Self> {
        if session_id.is_empty()
            || session_id
                .chars()
                .any(|c| !(c.is_alphanumeric() || c == '-' || c == '_'))
        {
            return Err(ChatpressionError::storage(format!(
                "invalid session id '{}'",
                session_id
            )));
        }

        let path = sessions_dir
            .as_ref()
            .join(format!("{}.toml", session_id));
        Ok(Self {
            file: AtomicTomlFile::new(path),
        })
    }

    /// Creates a storage under the default sessions directory.
    pub fn default_location(session_id: &str) -> Result<Self> {
        Self::new(ChatpressionPaths::sessions_dir()?, session_id)
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AtomicTomlFile<SessionDocument>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| ChatpressionError::internal(format!("session storage task failed: {}", e)))?
    }
}

#[async_trait]
impl SessionStorage for TomlSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            Ok(file
                .load()?
                .and_then(|mut doc| doc.entries.remove(&key)))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        tracing::debug!(key = %key, "Writing session entry");
        self.blocking(move |file| {
            file.update(SessionDocument::default(), |doc| {
                doc.entries.insert(key, value);
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            file.update(SessionDocument::default(), |doc| {
                doc.entries.remove(&key);
            })
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| file.delete()).await
    }
}
