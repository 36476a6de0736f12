//! Personality type matching.

use super::indicators::IndicatorSet;
use crate::catalog::{IndicatorCatalog, PersonalityCatalog, PersonalityType, TraitLevel};
use crate::error::{ChatpressionError, Result};
use serde::Serialize;

/// Points for a trait whose expected level equals the observed level.
pub const EXACT_MATCH_POINTS: u32 = 20;

/// Points when either the expected or the observed level is `medium`.
pub const PARTIAL_MATCH_POINTS: u32 = 10;

/// Total match score of one personality type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeScore {
    pub code: String,
    pub score: u32,
}

/// Points one trait contributes for an observed level.
pub fn trait_match_points(expected: TraitLevel, observed: TraitLevel) -> u32 {
    if expected == observed {
        EXACT_MATCH_POINTS
    } else if expected == TraitLevel::Medium || observed == TraitLevel::Medium {
        PARTIAL_MATCH_POINTS
    } else {
        0
    }
}

/// Scores every type in catalog order.
pub fn score_types(
    indicators: &IndicatorSet,
    types: &PersonalityCatalog,
    catalog: &IndicatorCatalog,
) -> Vec<TypeScore> {
    types
        .iter()
        .map(|personality| TypeScore {
            code: personality.code.clone(),
            score: type_score(personality, indicators, catalog),
        })
        .collect()
}

/// Returns the code of the best-matching personality type.
///
/// The strictly highest total wins; ties keep the type that comes first in
/// catalog order.
///
/// # Errors
///
/// Returns `ChatpressionError::Configuration` when the catalog is empty.
pub fn match_type(
    indicators: &IndicatorSet,
    types: &PersonalityCatalog,
    catalog: &IndicatorCatalog,
) -> Result<String> {
    let scores = score_types(indicators, types, catalog);

    let mut best: Option<&TypeScore> = None;
    for candidate in &scores {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or_else(|| {
        ChatpressionError::configuration("personality catalog contains no types")
    })?;
    tracing::debug!(code = %best.code, score = best.score, "Matched personality type");
    Ok(best.code.clone())
}

fn type_score(
    personality: &PersonalityType,
    indicators: &IndicatorSet,
    catalog: &IndicatorCatalog,
) -> u32 {
    personality
        .traits
        .iter()
        .map(|(&key, &expected)| {
            let observed = catalog
                .definition(key)
                .and_then(|def| def.classify(key, indicators.get(key)));
            match observed {
                Some(observed) => trait_match_points(expected, observed),
                None => {
                    tracing::debug!(indicator = %key, "No thresholds configured, trait scores 0");
                    0
                }
            }
        })
        .sum()
}
