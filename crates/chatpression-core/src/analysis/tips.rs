//! Personal improvement tips.

use super::indicators::IndicatorSet;
use crate::catalog::IndicatorKey;
use serde::Serialize;

/// Minimum number of tips in a report.
pub const MIN_TIPS: usize = 2;

/// Maximum number of tips in a report.
pub const MAX_TIPS: usize = 3;

const IMPROVEMENT_CUTOFF: u8 = 50;
const STRENGTH_CUTOFF: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    /// Addresses a low indicator.
    Improvement,
    /// Builds on the highest indicator.
    Strength,
    /// Padding when too few indicator tips apply.
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub kind: TipKind,
    /// Source indicator; `None` for generic tips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<IndicatorKey>,
    pub title: String,
    pub description: String,
}

impl Tip {
    fn new(kind: TipKind, indicator: Option<IndicatorKey>, (title, description): (&str, &str)) -> Self {
        Self {
            kind,
            indicator,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Generates between [`MIN_TIPS`] and [`MAX_TIPS`] tips.
///
/// The two lowest indicators below 50 each add an improvement tip; the
/// highest indicator adds a strength tip when it reaches 70 and one exists
/// for it. Ties are broken by encounter order.
pub fn generate_tips(indicators: &IndicatorSet) -> Vec<Tip> {
    // Stable sorts keep encounter order among equal scores.
    let mut ascending: Vec<(IndicatorKey, u8)> = indicators.iter().collect();
    ascending.sort_by_key(|&(_, score)| score);
    let mut descending: Vec<(IndicatorKey, u8)> = indicators.iter().collect();
    descending.sort_by_key(|&(_, score)| std::cmp::Reverse(score));

    let mut tips: Vec<Tip> = ascending
        .iter()
        .take(2)
        .filter(|&&(_, score)| score < IMPROVEMENT_CUTOFF)
        .map(|&(key, _)| Tip::new(TipKind::Improvement, Some(key), improvement_tip(key)))
        .collect();

    if let Some(&(key, score)) = descending.first() {
        let already_listed = tips.iter().any(|t| t.indicator == Some(key));
        if score >= STRENGTH_CUTOFF && !already_listed {
            if let Some(text) = strength_tip(key) {
                tips.push(Tip::new(TipKind::Strength, Some(key), text));
            }
        }
    }

    for text in GENERIC_TIPS {
        if tips.len() >= MIN_TIPS {
            break;
        }
        tips.push(Tip::new(TipKind::Generic, None, text));
    }

    tips.truncate(MAX_TIPS);
    tips
}

const GENERIC_TIPS: [(&str, &str); 2] = [
    (
        "대화 연습하기",
        "다양한 주제로 대화해 보세요. 연습할수록 자신만의 대화 스타일이 더 발전해요.",
    ),
    (
        "상대방 이야기에 반응하기",
        "상대방의 말에 짧게라도 리액션해 보세요. 잘 듣고 있다는 신호가 좋은 첫인상을 만들어요.",
    ),
];

fn improvement_tip(key: IndicatorKey) -> (&'static str, &'static str) {
    match key {
        IndicatorKey::MessageLength => (
            "표현 풍부하게 하기",
            "간결한 것도 좋지만, 가끔은 자신의 생각이나 경험을 더 자세히 나눠보세요. 상대방이 당신을 더 잘 이해할 수 있어요.",
        ),
        IndicatorKey::ResponseTime => (
            "적극적으로 반응하기",
            "완벽한 답변이 아니어도 괜찮아요. 먼저 간단히 반응하고, 이어서 생각을 덧붙여 보세요.",
        ),
        IndicatorKey::QuestionRatio => (
            "질문으로 관심 표현하기",
            "상대방에게 질문을 던져보세요. \"그래서 어떻게 됐어요?\", \"그건 어떤 느낌이었어요?\" 같은 질문이 대화를 풍성하게 만들어요.",
        ),
        IndicatorKey::EmotionDensity => (
            "감정 표현 더하기",
            "가끔은 이모지나 감탄사를 사용해 보세요. \"와 정말요?\" 같은 표현이 상대방에게 관심을 전달해요.",
        ),
        IndicatorKey::StructureScore => (
            "생각 정리해서 전달하기",
            "여러 가지를 말할 때는 번호를 붙이거나 줄을 나눠보세요. 상대방이 이해하기 쉬워져요.",
        ),
    }
}

fn strength_tip(key: IndicatorKey) -> Option<(&'static str, &'static str)> {
    const TITLE: &str = "당신의 강점 활용하기";
    let description = match key {
        IndicatorKey::MessageLength => {
            "풍부한 표현력이 장점이에요. 다만 상대방도 말할 기회를 주는 것을 잊지 마세요."
        }
        IndicatorKey::QuestionRatio => {
            "질문을 잘 하는 것이 장점이에요. 상대방의 답변에 대한 리액션도 함께 해주면 더 좋아요."
        }
        IndicatorKey::EmotionDensity => {
            "감정 표현이 풍부한 것이 장점이에요. 진심이 느껴지는 표현을 계속 유지해 주세요."
        }
        IndicatorKey::ResponseTime | IndicatorKey::StructureScore => return None,
    };
    Some((TITLE, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator_tips(tips: &[Tip]) -> Vec<IndicatorKey> {
        tips.iter().filter_map(|t| t.indicator).collect()
    }

    #[test]
    fn test_two_lowest_below_cutoff_then_strength() {
        let set = IndicatorSet::new(90, 50, 10, 60, 20);
        let tips = generate_tips(&set);
        assert_eq!(tips.len(), 3);
        assert_eq!(
            indicator_tips(&tips),
            vec![
                IndicatorKey::QuestionRatio,
                IndicatorKey::StructureScore,
                IndicatorKey::MessageLength
            ]
        );
        assert_eq!(tips[2].kind, TipKind::Strength);
    }

    #[test]
    fn test_padding_with_generic_tips() {
        let tips = generate_tips(&IndicatorSet::new(60, 60, 60, 60, 60));
        assert_eq!(tips.len(), 2);
        assert!(tips.iter().all(|t| t.kind == TipKind::Generic));
        assert_ne!(tips[0].title, tips[1].title);
    }

    #[test]
    fn test_single_improvement_padded_once() {
        let tips = generate_tips(&IndicatorSet::new(60, 60, 40, 60, 60));
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].indicator, Some(IndicatorKey::QuestionRatio));
        assert_eq!(tips[1].kind, TipKind::Generic);
        assert_eq!(tips[1].title, "대화 연습하기");
    }

    #[test]
    fn test_ties_use_encounter_order() {
        let tips = generate_tips(&IndicatorSet::new(10, 10, 10, 80, 80));
        assert_eq!(
            indicator_tips(&tips),
            vec![
                IndicatorKey::MessageLength,
                IndicatorKey::ResponseTime,
                IndicatorKey::EmotionDensity
            ]
        );
    }

    #[test]
    fn test_highest_without_strength_tip() {
        // structureScore is highest but has no strength tip.
        let tips = generate_tips(&IndicatorSet::new(60, 60, 60, 60, 95));
        assert_eq!(tips.len(), 2);
        assert!(tips.iter().all(|t| t.kind == TipKind::Generic));
    }

    #[test]
    fn test_tip_count_and_uniqueness_over_grid() {
        let values = [0u8, 29, 49, 50, 69, 70, 100];
        for &a in &values {
            for &b in &values {
                for &c in &values {
                    let set = IndicatorSet::new(a, b, c, b, a);
                    let tips = generate_tips(&set);
                    assert!((MIN_TIPS..=MAX_TIPS).contains(&tips.len()), "{:?}", set);
                    let keys = indicator_tips(&tips);
                    let mut deduped = keys.clone();
                    deduped.sort();
                    deduped.dedup();
                    assert_eq!(keys.len(), deduped.len(), "{:?}", set);
                }
            }
        }
    }
}
