//! Interaction layer: the streaming chat client and chat sessions.

pub mod backend;
pub mod http_backend;
pub mod session;
pub mod sse;

pub use backend::{ChatBackend, ChatRequest, HistoryEntry, TokenStream};
pub use http_backend::HttpChatBackend;
pub use session::{ChatSession, SendOutcome};
pub use sse::{SseDecoder, SseEvent};
