pub mod analyze;
pub mod chat;
pub mod show_config;
pub mod unlock;
