//! Transcript domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `model`: The append-only `Transcript`
//! - `sample`: Built-in demo conversation used when no transcript is stored

mod message;
mod model;
mod sample;

pub use message::{Message, MessageRole};
pub use model::Transcript;
pub use sample::sample_transcript;
