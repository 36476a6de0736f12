//! Conversation-analysis engine.
//!
//! Data flows one way: transcript → [`IndicatorSet`] → type code →
//! [`AnalysisResult`]. Every function here is pure; reference data is only
//! read.
//!
//! # Module Structure
//!
//! - `indicators`: the clamped five-score `IndicatorSet`
//! - `extractor`: derives indicators and raw statistics from a transcript
//! - `matcher`: scores personality types against indicators
//! - `feedback`: per-indicator feedback templates
//! - `tips`: personal improvement/strength tips
//! - `personal`: conversation statistics and trait phrases
//! - `report`: assembles the `AnalysisResult`

mod extractor;
mod feedback;
mod indicators;
mod matcher;
mod personal;
mod report;
mod tips;

pub use extractor::{
    ConversationStats, MESSAGE_LENGTH_DOMAIN, RESPONSE_LATENCY_DOMAIN_SECS,
    UNMEASURED_RESPONSE_TIME, conversation_stats, extract_indicators,
};
pub use feedback::{IndicatorFeedback, feedback_level, indicator_feedback};
pub use indicators::IndicatorSet;
pub use matcher::{
    EXACT_MATCH_POINTS, PARTIAL_MATCH_POINTS, TypeScore, match_type, score_types,
    trait_match_points,
};
pub use personal::{PersonalAnalysis, personal_analysis};
pub use report::{AnalysisResult, generate_report, score_color, share_text};
pub use tips::{MAX_TIPS, MIN_TIPS, Tip, TipKind, generate_tips};

use crate::catalog::{IndicatorCatalog, PersonalityCatalog};
use crate::error::Result;
use crate::transcript::Transcript;

/// Runs the whole pipeline over one transcript.
///
/// # Errors
///
/// Returns `ChatpressionError::Configuration` when the personality catalog is
/// empty.
pub fn analyze(
    transcript: &Transcript,
    types: &PersonalityCatalog,
    catalog: &IndicatorCatalog,
) -> Result<AnalysisResult> {
    let indicators = extract_indicators(transcript, catalog);
    let code = match_type(&indicators, types, catalog)?;
    generate_report(&code, indicators, types, catalog)
}
