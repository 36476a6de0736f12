//! Per-indicator feedback.
//!
//! Feedback texts are minijinja templates rendered with two variables:
//! `score` (the indicator value) and `approx_length` (`round(score × 1.5)`).
//! A catalog definition may override any built-in template.

use crate::catalog::{IndicatorCatalog, IndicatorKey, TraitLevel};
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::Serialize;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(Environment::new);

/// Feedback for one indicator, as shown in the detail list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorFeedback {
    pub key: IndicatorKey,
    pub name: String,
    pub icon: String,
    pub score: u8,
    pub level: TraitLevel,
    pub text: String,
}

/// Qualitative level used for feedback texts.
///
/// Fixed cutoffs independent of the catalog bands: `high` ≥ 70, `low` ≤ 30;
/// response time is `fast` ≤ 30, `slow` ≥ 70.
pub fn feedback_level(key: IndicatorKey, score: u8) -> TraitLevel {
    if key.is_speed_scale() {
        if score <= 30 {
            TraitLevel::Fast
        } else if score >= 70 {
            TraitLevel::Slow
        } else {
            TraitLevel::Medium
        }
    } else if score >= 70 {
        TraitLevel::High
    } else if score <= 30 {
        TraitLevel::Low
    } else {
        TraitLevel::Medium
    }
}

/// Builds the feedback entry of one indicator.
///
/// Falls back to the indicator description when no template exists or the
/// template fails to render.
pub fn indicator_feedback(
    key: IndicatorKey,
    score: u8,
    catalog: &IndicatorCatalog,
) -> IndicatorFeedback {
    let level = feedback_level(key, score);
    let definition = catalog.definition(key);

    let template = definition
        .and_then(|def| def.feedback.get(&level).map(String::as_str))
        .or_else(|| builtin_template(key, level));

    let rendered = template.and_then(|source| {
        TEMPLATES
            .render_str(
                source,
                context! { score => score, approx_length => approx_length(score) },
            )
            .map_err(|e| tracing::warn!(indicator = %key, "Feedback template failed: {}", e))
            .ok()
    });

    let text = rendered
        .or_else(|| definition.map(|def| def.description.clone()))
        .unwrap_or_default();

    IndicatorFeedback {
        key,
        name: definition.map(|d| d.name.clone()).unwrap_or_else(|| key.to_string()),
        icon: definition.map(|d| d.icon.clone()).unwrap_or_default(),
        score,
        level,
        text,
    }
}

fn approx_length(score: u8) -> u32 {
    (f64::from(score) * 1.5).round() as u32
}

fn builtin_template(key: IndicatorKey, level: TraitLevel) -> Option<&'static str> {
    use IndicatorKey::*;
    use TraitLevel::*;

    let text = match (key, level) {
        (MessageLength, High) => {
            "평균 {{ approx_length }}자의 메시지를 작성했어요. 풍부한 표현으로 생각을 잘 전달하는 편이에요."
        }
        (MessageLength, Medium) => {
            "적절한 길이의 메시지를 작성했어요. 상황에 따라 유연하게 표현하는 스타일이에요."
        }
        (MessageLength, Low) => {
            "간결하고 핵심적인 메시지를 작성했어요. 효율적인 소통을 선호하는 스타일이에요."
        }
        (ResponseTime, Fast) => {
            "빠르게 응답하는 편이에요. 즉각적인 반응으로 대화가 활발하게 진행됩니다."
        }
        (ResponseTime, Medium) => {
            "적절한 속도로 응답했어요. 생각을 정리한 후 답변하는 균형잡힌 스타일이에요."
        }
        (ResponseTime, Slow) => {
            "신중하게 응답하는 편이에요. 깊이 있는 답변을 준비하는 스타일이에요."
        }
        (QuestionRatio, High) => {
            "전체 대화의 {{ score }}%가 질문이었어요. 상대방에게 관심을 표현하고 대화를 이끌어가는 스타일이에요."
        }
        (QuestionRatio, Medium) => "질문과 답변의 균형이 좋아요. 자연스러운 대화 흐름을 만들어요.",
        (QuestionRatio, Low) => {
            "자신의 이야기를 주로 전달했어요. 명확한 의사 표현을 하는 스타일이에요."
        }
        (EmotionDensity, High) => {
            "감정 표현이 풍부해요! 이모지와 감탄사를 활용해 따뜻한 분위기를 만들었어요."
        }
        (EmotionDensity, Medium) => {
            "적절한 감정 표현을 했어요. 상황에 맞게 리액션하는 스타일이에요."
        }
        (EmotionDensity, Low) => {
            "차분하고 담백한 표현을 했어요. 내용 중심의 대화를 선호하는 스타일이에요."
        }
        (StructureScore, High) => {
            "체계적으로 메시지를 구성했어요. 정리된 표현으로 명확하게 전달해요."
        }
        (StructureScore, Medium) => {
            "자연스러운 구조로 메시지를 작성했어요. 읽기 편한 대화를 만들어요."
        }
        (StructureScore, Low) => "자유로운 형식으로 표현했어요. 편안하고 친근한 대화 스타일이에요.",
        _ => return None,
    };
    Some(text)
}
