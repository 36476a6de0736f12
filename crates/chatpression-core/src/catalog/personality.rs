//! Personality type records.

use super::indicator::{IndicatorKey, TraitLevel};
use crate::error::{ChatpressionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One suggested improvement of a personality type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub title: String,
    pub description: String,
}

/// A personality archetype the conversation is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityType {
    /// Unique type code, also the catalog key.
    pub code: String,
    pub name: String,
    pub emoji: String,
    /// Badge color as `#RRGGBB`.
    pub color: String,
    pub description: String,
    /// Expected level per indicator.
    #[serde(default)]
    pub traits: BTreeMap<IndicatorKey, TraitLevel>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Deserialize)]
struct PersonalityCatalogDocument {
    types: BTreeMap<String, PersonalityType>,
}

/// Personality types keyed by code, iterated in lexicographic code order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonalityCatalog {
    types: BTreeMap<String, PersonalityType>,
}

impl PersonalityCatalog {
    /// Builds a catalog from type records.
    ///
    /// # Errors
    ///
    /// Returns `ChatpressionError::Configuration` when two records share a code.
    pub fn new(types: impl IntoIterator<Item = PersonalityType>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for personality in types {
            let code = personality.code.clone();
            if map.insert(code.clone(), personality).is_some() {
                return Err(ChatpressionError::configuration(format!(
                    "duplicate personality type code '{}'",
                    code
                )));
            }
        }
        Ok(Self { types: map })
    }

    /// Parses `personality-types.json` (`{"types": {CODE: {...}}}`).
    ///
    /// # Errors
    ///
    /// Returns `ChatpressionError::Configuration` when the document is
    /// malformed, empty, or a record's `code` differs from its key.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: PersonalityCatalogDocument = serde_json::from_str(json).map_err(|e| {
            ChatpressionError::configuration(format!("personality catalog: {}", e))
        })?;

        if doc.types.is_empty() {
            return Err(ChatpressionError::configuration(
                "personality catalog contains no types",
            ));
        }

        if let Some((key, record)) = doc.types.iter().find(|(key, t)| **key != t.code) {
            return Err(ChatpressionError::configuration(format!(
                "personality type keyed '{}' declares code '{}'",
                key, record.code
            )));
        }

        Ok(Self { types: doc.types })
    }

    /// Looks up a type by code.
    pub fn get(&self, code: &str) -> Option<&PersonalityType> {
        self.types.get(code)
    }

    /// Iterates types in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PersonalityType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
