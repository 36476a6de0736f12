//! Personal analysis: conversation statistics and trait phrases.

use super::extractor::conversation_stats;
use crate::catalog::IndicatorCatalog;
use crate::transcript::Transcript;
use serde::Serialize;

const MAX_TRAITS: usize = 4;
const MIN_TRAITS: usize = 2;

const POSITIVE_WORDS: &[&str] = &[
    "좋아", "좋은", "좋네", "좋겠", "감사", "고마", "기쁘", "행복", "최고",
];
const EMPATHY_WORDS: &[&str] = &["그렇구나", "알겠", "이해", "맞아", "진짜", "정말"];

const FREQUENT_QUESTIONS: &str = "상대방에게 질문을 자주 하며 관심을 표현했어요";
const SELF_CENTERED: &str = "자신의 이야기를 중심으로 대화를 이끌었어요";
const POSITIVE: &str = "긍정적인 표현을 사용해 밝은 분위기를 만들었어요";
const EMPATHY: &str = "공감 표현을 통해 상대방의 말에 반응했어요";
const EXPRESSIVE: &str = "이모지와 감탄사로 감정을 적극적으로 표현했어요";
const DETAILED: &str = "자세하고 풍부한 표현으로 생각을 전달했어요";
const CONCISE: &str = "간결하고 핵심적인 메시지로 소통했어요";
const NATURAL: &str = "자연스럽고 편안한 대화 스타일을 보여줬어요";

/// Statistics and up to four trait phrases about the user's side of the
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAnalysis {
    pub message_count: usize,
    /// Mean message length in characters, rounded.
    pub average_length: u32,
    pub question_count: usize,
    pub expressive_count: usize,
    pub traits: Vec<String>,
}

pub fn personal_analysis(transcript: &Transcript, catalog: &IndicatorCatalog) -> PersonalAnalysis {
    let stats = conversation_stats(transcript, catalog);
    let count = stats.user_message_count as f64;
    let mut traits: Vec<&str> = Vec::new();

    if stats.user_message_count > 0 {
        let questions = stats.question_count as f64;
        if questions > count * 0.3 {
            traits.push(FREQUENT_QUESTIONS);
        } else if questions < count * 0.1 {
            traits.push(SELF_CENTERED);
        }

        let contains_any = |words: &[&str]| {
            transcript
                .user_messages()
                .any(|m| words.iter().any(|w| m.content.contains(w)))
        };
        if contains_any(POSITIVE_WORDS) {
            traits.push(POSITIVE);
        }
        if contains_any(EMPATHY_WORDS) {
            traits.push(EMPATHY);
        }

        if stats.expressive_count as f64 > count * 0.5 {
            traits.push(EXPRESSIVE);
        }

        if stats.average_length > 50.0 {
            traits.push(DETAILED);
        } else if stats.average_length < 20.0 {
            traits.push(CONCISE);
        }
    }

    if traits.len() < MIN_TRAITS {
        traits.push(NATURAL);
    }
    traits.truncate(MAX_TRAITS);

    PersonalAnalysis {
        message_count: stats.user_message_count,
        average_length: stats.average_length.round() as u32,
        question_count: stats.question_count,
        expressive_count: stats.expressive_count,
        traits: traits.into_iter().map(str::to_string).collect(),
    }
}
