//! Chat session state.
//!
//! A `ChatSession` owns the transcript of one conversation and guarantees
//! at most one outbound request at a time.

use crate::backend::{ChatBackend, ChatRequest, HistoryEntry};
use chatpression_core::error::SEND_FAILURE_MESSAGE;
use chatpression_core::transcript::{Message, Transcript};
use chatpression_core::user::{BotPersona, UserProfile};
use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Mutex;

/// Result of [`ChatSession::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The full reply was received and appended to the transcript.
    Replied(String),
    /// The message was empty after trimming; nothing happened.
    Empty,
    /// Another send is in flight; the message was dropped.
    Busy,
    /// The request or the stream failed. The partial reply was discarded;
    /// `notice` is the text to show the user.
    Failed { notice: &'static str },
}

/// Clears the sending flag when dropped, including on early return.
struct SendingGuard<'a>(&'a AtomicBool);

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    profile: UserProfile,
    persona: BotPersona,
    transcript: Mutex<Transcript>,
    sending: AtomicBool,
    exchanges: AtomicU32,
}

impl ChatSession {
    /// Starts a session with an empty transcript.
    pub fn new(backend: Arc<dyn ChatBackend>, profile: UserProfile) -> Self {
        Self::resume(backend, profile, Transcript::new())
    }

    /// Continues a session from a stored transcript.
    pub fn resume(
        backend: Arc<dyn ChatBackend>,
        profile: UserProfile,
        transcript: Transcript,
    ) -> Self {
        let persona = BotPersona::for_user(&profile);
        Self {
            backend,
            profile,
            persona,
            transcript: Mutex::new(transcript),
            sending: AtomicBool::new(false),
            exchanges: AtomicU32::new(0),
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn persona(&self) -> &BotPersona {
        &self.persona
    }

    /// Appends the bot's greeting and returns it.
    pub async fn greet(&self) -> String {
        let greeting = self.persona.greeting(&self.profile);
        self.transcript
            .lock()
            .await
            .push(Message::assistant(greeting.clone()).at(Utc::now()));
        greeting
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Transcript {
        self.transcript.lock().await.clone()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// Number of completed user/bot exchanges in this session.
    pub fn exchange_count(&self) -> u32 {
        self.exchanges.load(Ordering::Relaxed)
    }

    /// Sends a user message and streams the reply.
    ///
    /// `on_token` is called with each text chunk as soon as it arrives. The
    /// user message stays in the transcript even when the send fails.
    pub async fn send<F>(&self, message: &str, mut on_token: F) -> SendOutcome
    where
        F: FnMut(&str) + Send,
    {
        let message = message.trim();
        if message.is_empty() {
            return SendOutcome::Empty;
        }

        if self
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Send already in flight, dropping message");
            return SendOutcome::Busy;
        }
        let _guard = SendingGuard(&self.sending);

        let request = {
            let mut transcript = self.transcript.lock().await;
            let history = transcript.messages().iter().map(HistoryEntry::from).collect();
            transcript.push(Message::user(message).at(Utc::now()));
            ChatRequest {
                message: message.to_string(),
                history,
                user_age: self.profile.age,
                bot_gender: self.persona.gender.label().to_string(),
                bot_name: self.persona.name.clone(),
            }
        };

        let mut stream = match self.backend.stream_reply(&request).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                return SendOutcome::Failed {
                    notice: SEND_FAILURE_MESSAGE,
                };
            }
        };

        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(token) => {
                    on_token(&token);
                    reply.push_str(&token);
                }
                Err(e) => {
                    tracing::warn!(
                        received = reply.chars().count(),
                        "Chat stream failed, discarding partial reply: {}",
                        e
                    );
                    return SendOutcome::Failed {
                        notice: SEND_FAILURE_MESSAGE,
                    };
                }
            }
        }

        self.transcript
            .lock()
            .await
            .push(Message::assistant(reply.clone()).at(Utc::now()));
        let exchanges = self.exchanges.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(exchanges, "Reply complete");

        SendOutcome::Replied(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TokenStream;
    use async_trait::async_trait;
    use chatpression_core::transcript::MessageRole;
    use chatpression_core::user::Gender;
    use chatpression_core::{ChatpressionError, Result};
    use futures::stream;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Replies with fixed chunks and records every request.
    #[derive(Default)]
    struct ScriptedBackend {
        chunks: Vec<Result<String>>,
        fail_request: bool,
        requests: StdMutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn stream_reply(&self, request: &ChatRequest) -> Result<TokenStream> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_request {
                return Err(ChatpressionError::network("connection refused"));
            }
            Ok(stream::iter(self.chunks.clone()).boxed())
        }
    }

    /// Holds every request open until `release` is notified.
    #[derive(Default)]
    struct HeldBackend {
        release: Notify,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl ChatBackend for HeldBackend {
        async fn stream_reply(&self, _request: &ChatRequest) -> Result<TokenStream> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(stream::iter(vec![Ok("응".to_string())]).boxed())
        }
    }

    fn backend(chunks: &[&str]) -> Arc<ScriptedBackend> {
        Arc::new(ScriptedBackend {
            chunks: chunks.iter().map(|c| Ok(c.to_string())).collect(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_send_while_reply_in_flight_is_busy() {
        let backend = Arc::new(HeldBackend::default());
        let session = Arc::new(ChatSession::new(backend.clone(), UserProfile::default()));

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.send("첫 번째", |_| {}).await }
        });
        while backend.requests.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(session.is_sending());
        assert_eq!(session.send("두 번째", |_| {}).await, SendOutcome::Busy);
        assert_eq!(session.transcript().await.messages().len(), 1);
        assert_eq!(backend.requests.load(Ordering::SeqCst), 1);

        backend.release.notify_one();
        assert_eq!(first.await.unwrap(), SendOutcome::Replied("응".into()));
        assert!(!session.is_sending());
        assert_eq!(session.transcript().await.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_send_streams_and_appends_reply() {
        let backend = backend(&["안녕", "하세요", "!"]);
        let session = ChatSession::new(backend.clone(), UserProfile::default());
        session.greet().await;

        let mut seen = Vec::new();
        let outcome = session.send("  반가워요  ", |t| seen.push(t.to_string())).await;

        assert_eq!(outcome, SendOutcome::Replied("안녕하세요!".into()));
        assert_eq!(seen, vec!["안녕", "하세요", "!"]);
        assert_eq!(session.exchange_count(), 1);
        assert!(!session.is_sending());

        let transcript = session.transcript().await;
        let roles: Vec<MessageRole> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(transcript.messages()[1].content, "반가워요");
        assert!(transcript.messages().iter().all(|m| m.timestamp.is_some()));
    }

    #[tokio::test]
    async fn test_request_excludes_current_message() {
        let backend = backend(&["응"]);
        let session = ChatSession::new(backend.clone(), UserProfile::default());
        session.greet().await;
        session.send("첫 번째", |_| {}).await;
        session.send("두 번째", |_| {}).await;

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].message, "첫 번째");
        assert_eq!(requests[0].history.len(), 1);
        assert_eq!(requests[1].history.len(), 3);
        assert_eq!(requests[1].history[2].content, "응");
        assert_eq!(requests[1].bot_name, "민지");
        assert_eq!(requests[1].bot_gender, "여성");
        assert_eq!(requests[1].user_age, 25);
    }

    #[tokio::test]
    async fn test_female_user_talks_to_male_bot() {
        let backend = backend(&["네"]);
        let profile = UserProfile {
            name: "지수".into(),
            age: 31,
            gender: Gender::Female,
        };
        let session = ChatSession::new(backend.clone(), profile);
        assert_eq!(session.greet().await, "지수씨 안녕하세요 😊");
        session.send("안녕", |_| {}).await;

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].bot_name, "철수");
        assert_eq!(requests[0].bot_gender, "남성");
        assert_eq!(requests[0].user_age, 31);
    }

    #[tokio::test]
    async fn test_empty_message_is_ignored() {
        let backend = backend(&["x"]);
        let session = ChatSession::new(backend.clone(), UserProfile::default());
        assert_eq!(session.send("   ", |_| {}).await, SendOutcome::Empty);
        assert!(backend.requests.lock().unwrap().is_empty());
        assert!(session.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_failure_discards_reply() {
        let backend = Arc::new(ScriptedBackend {
            fail_request: true,
            ..Default::default()
        });
        let session = ChatSession::new(backend, UserProfile::default());

        let outcome = session.send("안녕", |_| {}).await;
        assert_eq!(
            outcome,
            SendOutcome::Failed {
                notice: SEND_FAILURE_MESSAGE
            }
        );
        assert!(!session.is_sending());
        assert_eq!(session.exchange_count(), 0);

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert!(transcript.messages()[0].is_user());
    }

    #[tokio::test]
    async fn test_mid_stream_failure_discards_partial_reply() {
        let backend = Arc::new(ScriptedBackend {
            chunks: vec![
                Ok("부분".to_string()),
                Err(ChatpressionError::network("reset")),
                Ok("무시됨".to_string()),
            ],
            ..Default::default()
        });
        let session = ChatSession::new(backend, UserProfile::default());

        let mut seen = String::new();
        let outcome = session.send("안녕", |t| seen.push_str(t)).await;
        assert!(matches!(outcome, SendOutcome::Failed { .. }));
        assert_eq!(seen, "부분");
        assert!(
            session
                .transcript()
                .await
                .messages()
                .iter()
                .all(|m| m.is_user())
        );

        // The guard is released: the next send goes out.
        assert!(matches!(
            session.send("다시", |_| {}).await,
            SendOutcome::Failed { .. }
        ));
    }
}
