use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Gender as entered during onboarding.
///
/// Stored as `male`/`female`; the Korean labels are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    #[serde(alias = "남성")]
    Male,
    #[serde(alias = "여성")]
    Female,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    /// Korean label sent to the chat backend.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
        }
    }
}

/// Profile kept under the `userData` session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "사용자".to_string(),
            age: 25,
            gender: Gender::Male,
        }
    }
}

impl UserProfile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
