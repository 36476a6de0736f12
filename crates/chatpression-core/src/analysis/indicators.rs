use crate::catalog::IndicatorKey;
use serde::Serialize;
use strum::IntoEnumIterator;

/// Five behavioural scores, each an integer in `[0, 100]`.
///
/// Fields are private so every value passes through the clamping
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    message_length: u8,
    response_time: u8,
    question_ratio: u8,
    emotion_density: u8,
    structure_score: u8,
}

impl IndicatorSet {
    /// Creates a set, clamping each value to 100.
    pub fn new(
        message_length: u8,
        response_time: u8,
        question_ratio: u8,
        emotion_density: u8,
        structure_score: u8,
    ) -> Self {
        Self {
            message_length: message_length.min(100),
            response_time: response_time.min(100),
            question_ratio: question_ratio.min(100),
            emotion_density: emotion_density.min(100),
            structure_score: structure_score.min(100),
        }
    }

    /// Creates a set from raw scores, rounding to the nearest integer and
    /// clamping to `[0, 100]`. NaN becomes 0.
    pub fn from_raw(
        message_length: f64,
        response_time: f64,
        question_ratio: f64,
        emotion_density: f64,
        structure_score: f64,
    ) -> Self {
        Self::new(
            to_score(message_length),
            to_score(response_time),
            to_score(question_ratio),
            to_score(emotion_density),
            to_score(structure_score),
        )
    }

    /// Score of one indicator.
    pub fn get(&self, key: IndicatorKey) -> u8 {
        match key {
            IndicatorKey::MessageLength => self.message_length,
            IndicatorKey::ResponseTime => self.response_time,
            IndicatorKey::QuestionRatio => self.question_ratio,
            IndicatorKey::EmotionDensity => self.emotion_density,
            IndicatorKey::StructureScore => self.structure_score,
        }
    }

    /// All scores in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, u8)> + '_ {
        IndicatorKey::iter().map(move |key| (key, self.get(key)))
    }
}

/// Used when the transcript holds no user messages.
impl Default for IndicatorSet {
    fn default() -> Self {
        Self::new(50, 50, 25, 40, 30)
    }
}

fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let set = IndicatorSet::default();
        assert_eq!(set, IndicatorSet::new(50, 50, 25, 40, 30));
    }

    #[test]
    fn test_new_clamps() {
        let set = IndicatorSet::new(200, 0, 101, 100, 255);
        assert!(set.iter().all(|(_, v)| v <= 100));
        assert_eq!(set.get(IndicatorKey::MessageLength), 100);
    }

    #[test]
    fn test_from_raw_rounds_and_clamps() {
        let set = IndicatorSet::from_raw(-5.0, 49.5, 33.3, 140.0, f64::NAN);
        assert_eq!(set, IndicatorSet::new(0, 50, 33, 100, 0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(IndicatorSet::default()).unwrap();
        assert_eq!(json["questionRatio"], 25);
        assert_eq!(json["structureScore"], 30);
    }
}
