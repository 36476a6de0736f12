//! Analysis report assembly.

use super::feedback::{IndicatorFeedback, indicator_feedback};
use super::indicators::IndicatorSet;
use super::tips::{Tip, generate_tips};
use crate::catalog::{Improvement, IndicatorCatalog, PersonalityCatalog, PersonalityType};
use crate::error::{ChatpressionError, Result};
use serde::Serialize;

/// Outcome of one analysis pass.
///
/// Created once by [`generate_report`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Winning personality type code.
    #[serde(rename = "type")]
    pub type_code: String,
    pub type_data: PersonalityType,
    pub indicators: IndicatorSet,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvements: Vec<Improvement>,
    /// Feedback per indicator in encounter order.
    pub details: Vec<IndicatorFeedback>,
    pub tips: Vec<Tip>,
}

/// Assembles the report for a matched type.
///
/// # Errors
///
/// Returns `ChatpressionError::Configuration` when `code` is not in the
/// catalog.
pub fn generate_report(
    code: &str,
    indicators: IndicatorSet,
    types: &PersonalityCatalog,
    catalog: &IndicatorCatalog,
) -> Result<AnalysisResult> {
    let type_data = types.get(code).cloned().ok_or_else(|| {
        ChatpressionError::configuration(format!("unknown personality type code '{}'", code))
    })?;

    let details = indicators
        .iter()
        .map(|(key, score)| indicator_feedback(key, score, catalog))
        .collect();

    Ok(AnalysisResult {
        type_code: type_data.code.clone(),
        strengths: type_data.strengths.clone(),
        weaknesses: type_data.weaknesses.clone(),
        improvements: type_data.improvements.clone(),
        details,
        tips: generate_tips(&indicators),
        indicators,
        type_data,
    })
}

/// Display color of a score: green from 70, amber from 40, red below.
pub fn score_color(score: u8) -> &'static str {
    if score >= 70 {
        "#10B981"
    } else if score >= 40 {
        "#F59E0B"
    } else {
        "#EF4444"
    }
}

/// One-line text for sharing a result.
pub fn share_text(result: &AnalysisResult) -> String {
    format!(
        "나의 대화 첫인상 유형은 \"{} - {}\"이에요! ChatPression에서 확인해 보세요.",
        result.type_data.code, result.type_data.name
    )
}
