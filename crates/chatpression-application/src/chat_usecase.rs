//! Chat use case.
//!
//! Opens a chat session for the stored user profile and writes the
//! transcript back to session storage after every exchange, so the analysis
//! reads the conversation that actually happened.

use anyhow::{Context, Result};
use chatpression_core::storage::{CHAT_HISTORY_KEY, SessionStorage, USER_DATA_KEY};
use chatpression_core::user::UserProfile;
use chatpression_interaction::{ChatBackend, ChatSession, SendOutcome};
use std::sync::Arc;

pub struct ChatUseCase {
    storage: Arc<dyn SessionStorage>,
    backend: Arc<dyn ChatBackend>,
}

impl ChatUseCase {
    pub fn new(storage: Arc<dyn SessionStorage>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { storage, backend }
    }

    /// Reads the user profile, falling back to defaults.
    pub async fn load_profile(&self) -> UserProfile {
        match self.storage.get(USER_DATA_KEY).await {
            Ok(Some(json)) => match UserProfile::from_json(&json) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Stored user profile is malformed, using defaults: {}", e);
                    UserProfile::default()
                }
            },
            Ok(None) => {
                tracing::debug!("No user profile stored, using defaults");
                UserProfile::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read user profile, using defaults: {}", e);
                UserProfile::default()
            }
        }
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let json = profile.to_json()?;
        self.storage
            .set(USER_DATA_KEY, &json)
            .await
            .context("Failed to save user profile")
    }

    /// Starts a fresh conversation with the greeting already in place.
    pub async fn open(&self) -> ChatSession {
        let profile = self.load_profile().await;
        let session = ChatSession::new(self.backend.clone(), profile);
        session.greet().await;
        self.persist(&session).await;
        tracing::info!(bot = %session.persona().name, "Chat session opened");
        session
    }

    /// Sends one message through `session` and stores the updated transcript.
    pub async fn send<F>(&self, session: &ChatSession, message: &str, on_token: F) -> SendOutcome
    where
        F: FnMut(&str) + Send,
    {
        let outcome = session.send(message, on_token).await;
        if matches!(outcome, SendOutcome::Replied(_) | SendOutcome::Failed { .. }) {
            self.persist(session).await;
        }
        outcome
    }

    async fn persist(&self, session: &ChatSession) {
        let transcript = session.transcript().await;
        let result = match transcript.to_json() {
            Ok(json) => self.storage.set(CHAT_HISTORY_KEY, &json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to store chat history: {}", e);
        }
    }
}
