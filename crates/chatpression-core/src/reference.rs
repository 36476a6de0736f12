//! Reference data repository trait.

use crate::catalog::{IndicatorCatalog, PersonalityCatalog};
use crate::error::Result;
use async_trait::async_trait;

/// Source of the two read-only catalogs.
///
/// # Errors
///
/// Both methods return `ChatpressionError::Configuration` when the document
/// is missing or malformed.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    async fn load_personality_types(&self) -> Result<PersonalityCatalog>;

    async fn load_indicators(&self) -> Result<IndicatorCatalog>;
}
