//! Reference-data catalogs.
//!
//! Both catalogs are loaded once per analysis and never mutated afterwards.
//!
//! - `indicator`: indicator keys, threshold bands, definitions and lexicons
//! - `personality`: personality type records keyed by code

mod indicator;
mod personality;

pub use indicator::{
    EmotionKeywords, IndicatorCatalog, IndicatorDefinition, IndicatorKey, StructurePatterns,
    ThresholdBand, TraitLevel,
};
pub use personality::{Improvement, PersonalityCatalog, PersonalityType};
