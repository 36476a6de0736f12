//! Indicator definitions and lexicons.

use crate::error::{ChatpressionError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter};

/// Emoji ranges plus repeated Korean laughter/crying jamo.
const DEFAULT_EXPRESSIVE_PATTERN: &str =
    r"[\x{1F300}-\x{1F9FF}]|[\x{2600}-\x{26FF}]|[\x{2700}-\x{27BF}]|[ㅋㅎㅠㅜ]{2,}";

const DEFAULT_QUESTION_MARKERS: &[&str] = &[
    "뭐", "어디", "언제", "왜", "어떻게", "누구", "할까", "일까", "인가",
];

static DEFAULT_EXPRESSIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_EXPRESSIVE_PATTERN).expect("built-in pattern compiles"));

/// The five behavioural indicators.
///
/// Declaration order is the canonical "encounter order" used for display and
/// tie-breaking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum IndicatorKey {
    MessageLength,
    ResponseTime,
    QuestionRatio,
    EmotionDensity,
    StructureScore,
}

impl IndicatorKey {
    /// Response time uses the fast/medium/slow scale instead of low/medium/high.
    pub fn is_speed_scale(self) -> bool {
        self == IndicatorKey::ResponseTime
    }
}

/// Qualitative level of an indicator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TraitLevel {
    Low,
    Medium,
    High,
    Fast,
    Slow,
}

/// Numeric range of one qualitative level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Static metadata for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDefinition {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thresholds: BTreeMap<TraitLevel, ThresholdBand>,
    /// Feedback templates per level; overrides the built-in texts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub feedback: BTreeMap<TraitLevel, String>,
}

impl IndicatorDefinition {
    /// Classifies a score with this definition's threshold bands.
    ///
    /// Returns `None` when the bands needed for the classification are not
    /// configured.
    pub fn classify(&self, key: IndicatorKey, value: u8) -> Option<TraitLevel> {
        let value = f64::from(value);
        let (lower, upper) = if key.is_speed_scale() {
            (TraitLevel::Fast, TraitLevel::Slow)
        } else {
            (TraitLevel::Low, TraitLevel::High)
        };
        let lower_max = self.thresholds.get(&lower)?.max?;
        let upper_min = self.thresholds.get(&upper)?.min?;

        if value <= lower_max {
            Some(lower)
        } else if value >= upper_min {
            Some(upper)
        } else {
            Some(TraitLevel::Medium)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionKeywords {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub exclamations: Vec<String>,
}

impl EmotionKeywords {
    /// All keywords of the three parts in order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.positive
            .iter()
            .chain(&self.negative)
            .chain(&self.exclamations)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructurePatterns {
    #[serde(default)]
    pub numbering: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub summary: Vec<String>,
}

/// On-disk shape of `indicators.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorCatalogDocument {
    indicators: BTreeMap<IndicatorKey, IndicatorDefinition>,
    emotion_keywords: EmotionKeywords,
    structure_patterns: StructurePatterns,
    #[serde(default)]
    question_markers: Option<Vec<String>>,
    #[serde(default)]
    expressive_pattern: Option<String>,
}

/// Indicator definitions plus the lexicons consumed by the extractor.
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    pub indicators: BTreeMap<IndicatorKey, IndicatorDefinition>,
    pub emotion_keywords: EmotionKeywords,
    pub structure_patterns: StructurePatterns,
    pub question_markers: Vec<String>,
    expressive: Regex,
}

impl IndicatorCatalog {
    /// Builds a catalog with the built-in question markers and glyph pattern.
    pub fn new(
        indicators: BTreeMap<IndicatorKey, IndicatorDefinition>,
        emotion_keywords: EmotionKeywords,
        structure_patterns: StructurePatterns,
    ) -> Self {
        Self {
            indicators,
            emotion_keywords,
            structure_patterns,
            question_markers: DEFAULT_QUESTION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            expressive: DEFAULT_EXPRESSIVE.clone(),
        }
    }

    /// Parses `indicators.json`.
    ///
    /// # Errors
    ///
    /// Returns `ChatpressionError::Configuration` when the document is not
    /// valid JSON of the expected shape or the glyph pattern does not compile.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: IndicatorCatalogDocument = serde_json::from_str(json)
            .map_err(|e| ChatpressionError::configuration(format!("indicator catalog: {}", e)))?;

        let mut catalog = Self::new(doc.indicators, doc.emotion_keywords, doc.structure_patterns);
        if let Some(markers) = doc.question_markers {
            catalog.question_markers = markers;
        }
        if let Some(pattern) = doc.expressive_pattern {
            catalog.expressive = Regex::new(&pattern)?;
        }
        Ok(catalog)
    }

    /// Definition for one indicator, if configured.
    pub fn definition(&self, key: IndicatorKey) -> Option<&IndicatorDefinition> {
        self.indicators.get(&key)
    }

    /// Pattern matching emoji and expressive glyph runs.
    pub fn expressive_pattern(&self) -> &Regex {
        &self.expressive
    }

    /// Returns true when the text reads as a question.
    pub fn is_question(&self, text: &str) -> bool {
        text.contains('?') || self.question_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(pairs: &[(TraitLevel, Option<f64>, Option<f64>)]) -> IndicatorDefinition {
        IndicatorDefinition {
            name: "n".into(),
            icon: String::new(),
            short_name: "s".into(),
            description: String::new(),
            thresholds: pairs
                .iter()
                .map(|(level, min, max)| (*level, ThresholdBand { min: *min, max: *max }))
                .collect(),
            feedback: BTreeMap::new(),
        }
    }

    #[test]
    fn test_classify_low_medium_high() {
        let def = bands(&[
            (TraitLevel::Low, None, Some(30.0)),
            (TraitLevel::High, Some(70.0), None),
        ]);
        let key = IndicatorKey::EmotionDensity;
        assert_eq!(def.classify(key, 30), Some(TraitLevel::Low));
        assert_eq!(def.classify(key, 31), Some(TraitLevel::Medium));
        assert_eq!(def.classify(key, 70), Some(TraitLevel::High));
    }

    #[test]
    fn test_classify_speed_scale() {
        let def = bands(&[
            (TraitLevel::Fast, None, Some(30.0)),
            (TraitLevel::Slow, Some(70.0), None),
        ]);
        let key = IndicatorKey::ResponseTime;
        assert_eq!(def.classify(key, 10), Some(TraitLevel::Fast));
        assert_eq!(def.classify(key, 50), Some(TraitLevel::Medium));
        assert_eq!(def.classify(key, 90), Some(TraitLevel::Slow));
    }

    #[test]
    fn test_classify_missing_band() {
        let def = bands(&[(TraitLevel::Low, None, Some(30.0))]);
        assert_eq!(def.classify(IndicatorKey::MessageLength, 10), None);
    }

    #[test]
    fn test_key_wire_names() {
        assert_eq!(IndicatorKey::MessageLength.to_string(), "messageLength");
        let key: IndicatorKey = serde_json::from_str(r#""structureScore""#).unwrap();
        assert_eq!(key, IndicatorKey::StructureScore);
    }

    #[test]
    fn test_from_json_defaults_lexicon_extras() {
        let catalog = IndicatorCatalog::from_json(
            r#"{"indicators": {}, "emotionKeywords": {}, "structurePatterns": {}}"#,
        )
        .unwrap();
        assert!(catalog.is_question("어디 갈까"));
        assert!(catalog.is_question("really?"));
        assert!(!catalog.is_question("좋아요"));
        assert_eq!(catalog.expressive_pattern().find_iter("ㅋㅋㅋ 😊").count(), 2);
    }

    #[test]
    fn test_from_json_rejects_bad_pattern() {
        let err = IndicatorCatalog::from_json(
            r#"{"indicators": {}, "emotionKeywords": {}, "structurePatterns": {}, "expressivePattern": "("}"#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = IndicatorCatalog::from_json("{\"indicators\": [").unwrap_err();
        assert!(err.is_configuration());
    }
}
