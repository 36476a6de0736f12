use super::profile::{Gender, UserProfile};
use serde::Serialize;

/// The chat partner presented to the user.
///
/// Always the opposite gender of the user: `민지` for a female bot, `철수`
/// for a male bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotPersona {
    pub name: String,
    pub gender: Gender,
}

impl BotPersona {
    pub fn for_user(profile: &UserProfile) -> Self {
        let gender = profile.gender.opposite();
        let name = match gender {
            Gender::Female => "민지",
            Gender::Male => "철수",
        };
        Self {
            name: name.to_string(),
            gender,
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self.gender {
            Gender::Female => "👩",
            Gender::Male => "👨",
        }
    }

    /// First bot message of a session.
    pub fn greeting(&self, profile: &UserProfile) -> String {
        format!("{}씨 안녕하세요 😊", profile.name)
    }

    /// System notice shown when the chat opens.
    pub fn join_notice(&self) -> String {
        format!("{}님이 접속했습니다", self.name)
    }

    /// Header status line, e.g. `25살 · 여성`.
    pub fn status_line(&self, profile: &UserProfile) -> String {
        format!("{}살 · {}", profile.age, self.gender.label())
    }
}
