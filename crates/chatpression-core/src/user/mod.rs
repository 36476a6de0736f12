//! User profile and the bot persona derived from it.

mod persona;
mod profile;

pub use persona::BotPersona;
pub use profile::{Gender, UserProfile};
