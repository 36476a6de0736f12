//! JSON-backed `ReferenceDataRepository`.
//!
//! Each catalog comes either from a file named in the configuration or from
//! the copy embedded at build time.

use async_trait::async_trait;
use chatpression_core::catalog::{IndicatorCatalog, PersonalityCatalog};
use chatpression_core::config::ReferenceConfig;
use chatpression_core::reference::ReferenceDataRepository;
use chatpression_core::{ChatpressionError, Result};
use std::borrow::Cow;
use std::path::PathBuf;

const EMBEDDED_PERSONALITY_TYPES: &str = include_str!("../../../data/personality-types.json");
const EMBEDDED_INDICATORS: &str = include_str!("../../../data/indicators.json");

/// Where one catalog document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    Embedded(&'static str),
    File(PathBuf),
}

impl ReferenceSource {
    async fn read(&self) -> Result<Cow<'static, str>> {
        match self {
            ReferenceSource::Embedded(text) => Ok(Cow::Borrowed(*text)),
            ReferenceSource::File(path) => {
                tracing::debug!("Loading reference data from {:?}", path);
                tokio::fs::read_to_string(path)
                    .await
                    .map(Cow::Owned)
                    .map_err(|e| {
                        ChatpressionError::configuration(format!(
                            "cannot read {}: {}",
                            path.display(),
                            e
                        ))
                    })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonReferenceRepository {
    personality_types: ReferenceSource,
    indicators: ReferenceSource,
}

impl JsonReferenceRepository {
    pub fn new(personality_types: ReferenceSource, indicators: ReferenceSource) -> Self {
        Self {
            personality_types,
            indicators,
        }
    }

    /// Uses the catalogs compiled into the binary.
    pub fn embedded() -> Self {
        Self::new(
            ReferenceSource::Embedded(EMBEDDED_PERSONALITY_TYPES),
            ReferenceSource::Embedded(EMBEDDED_INDICATORS),
        )
    }

    /// Uses configured file paths, falling back to the embedded copy for
    /// each catalog without one.
    pub fn from_config(config: &ReferenceConfig) -> Self {
        let personality_types = config
            .personality_types
            .clone()
            .map(ReferenceSource::File)
            .unwrap_or(ReferenceSource::Embedded(EMBEDDED_PERSONALITY_TYPES));
        let indicators = config
            .indicators
            .clone()
            .map(ReferenceSource::File)
            .unwrap_or(ReferenceSource::Embedded(EMBEDDED_INDICATORS));
        Self::new(personality_types, indicators)
    }
}

impl Default for JsonReferenceRepository {
    fn default() -> Self {
        Self::embedded()
    }
}

#[async_trait]
impl ReferenceDataRepository for JsonReferenceRepository {
    async fn load_personality_types(&self) -> Result<PersonalityCatalog> {
        let text = self.personality_types.read().await?;
        PersonalityCatalog::from_json(&text)
    }

    async fn load_indicators(&self) -> Result<IndicatorCatalog> {
        let text = self.indicators.read().await?;
        IndicatorCatalog::from_json(&text)
    }
}
