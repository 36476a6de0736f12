//! Session storage trait.
//!
//! A session store is a flat string key/value map scoped to one chat
//! session. The well-known keys are listed below; values are opaque strings
//! (JSON for structured data).

use crate::error::Result;
use async_trait::async_trait;

/// Transcript as a JSON array of messages.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";

/// User profile as JSON `{name, age, gender}`.
pub const USER_DATA_KEY: &str = "userData";

/// `"true"` once the detailed report was unlocked.
pub const ANALYSIS_UNLOCKED_KEY: &str = "analysisUnlocked";

/// An abstract per-session key/value store.
///
/// Implementations decide where the data lives (memory, a file per
/// session, ...). Absent keys are not an error.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: The store could not be read
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Removes every key of the session.
    async fn clear(&self) -> Result<()>;
}
