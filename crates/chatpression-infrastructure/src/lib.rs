//! Infrastructure layer: files, paths and configuration.

pub mod config_service;
pub mod json_reference_repository;
pub mod memory_session_storage;
pub mod paths;
pub mod storage;
pub mod toml_session_storage;

pub use crate::config_service::ConfigService;
pub use crate::json_reference_repository::{JsonReferenceRepository, ReferenceSource};
pub use crate::memory_session_storage::MemorySessionStorage;
pub use crate::paths::ChatpressionPaths;
pub use crate::toml_session_storage::TomlSessionStorage;
