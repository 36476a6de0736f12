//! Domain core of ChatPression.
//!
//! Pure conversation analysis plus the traits the outer layers implement.
//! Nothing in this crate performs I/O.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod reference;
pub mod storage;
pub mod transcript;
pub mod unlock;
pub mod user;

pub use error::{ChatpressionError, Result};
