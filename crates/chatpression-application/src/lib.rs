//! Application layer for ChatPression.
//!
//! Use cases that tie the analysis core to session storage, the reference
//! catalogs and the chat backend.

pub mod analysis_usecase;
pub mod chat_usecase;
pub mod unlock_usecase;

pub use analysis_usecase::{AnalysisOutcome, AnalysisReport, AnalysisUseCase, TranscriptSource};
pub use chat_usecase::ChatUseCase;
pub use unlock_usecase::{CountdownHandle, UnlockUseCase};
