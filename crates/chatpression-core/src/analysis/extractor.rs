//! Indicator extraction.
//!
//! Every score is computed over user-authored messages only.

use super::indicators::IndicatorSet;
use crate::catalog::IndicatorCatalog;
use crate::transcript::{Message, MessageRole, Transcript};
use serde::Serialize;

/// Average message length (characters) mapped onto `[0, 100]`.
pub const MESSAGE_LENGTH_DOMAIN: (f64, f64) = (10.0, 150.0);

/// Mean reply latency (seconds) mapped onto `[0, 100]`.
pub const RESPONSE_LATENCY_DOMAIN_SECS: (f64, f64) = (2.0, 60.0);

/// Response time when the transcript carries no usable timestamps.
pub const UNMEASURED_RESPONSE_TIME: u8 = 50;

const NUMBERING_WEIGHT: f64 = 2.0;
const BULLET_WEIGHT: f64 = 1.0;
const SUMMARY_WEIGHT: f64 = 1.5;
const NEWLINE_WEIGHT: f64 = 0.5;
const STRUCTURE_SCALE: f64 = 25.0;

const KEYWORD_WEIGHT: f64 = 1.0;
const GLYPH_WEIGHT: f64 = 2.0;
const EXCLAMATION_WEIGHT: f64 = 0.5;
const EMOTION_SCALE: f64 = 20.0;

/// Raw statistics over the user's side of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub user_message_count: usize,
    /// Mean character count of user messages (0 when there are none).
    pub average_length: f64,
    /// User messages containing a literal `?`.
    pub question_count: usize,
    /// Emoji and expressive glyph runs across user messages.
    pub expressive_count: usize,
    /// Mean seconds between a bot message and the user's reply, when the
    /// transcript carries timestamps.
    pub response_latency_secs: Option<f64>,
}

/// Derives the five indicator scores from a transcript.
///
/// A transcript without user messages yields [`IndicatorSet::default`].
pub fn extract_indicators(transcript: &Transcript, catalog: &IndicatorCatalog) -> IndicatorSet {
    let user_messages: Vec<&Message> = transcript.user_messages().collect();
    if user_messages.is_empty() {
        tracing::debug!("No user messages in transcript, using default indicators");
        return IndicatorSet::default();
    }

    let count = user_messages.len() as f64;

    let average_length = mean_length(&user_messages);
    let message_length = rescale(average_length, MESSAGE_LENGTH_DOMAIN);

    let response_time = match mean_response_latency(transcript) {
        Some(latency) => rescale(latency, RESPONSE_LATENCY_DOMAIN_SECS),
        None => {
            tracing::debug!("Response time unmeasured, using constant placeholder");
            f64::from(UNMEASURED_RESPONSE_TIME)
        }
    };

    let questions = user_messages
        .iter()
        .filter(|m| catalog.is_question(&m.content))
        .count() as f64;
    let question_ratio = questions / count * 100.0;

    let emotion_density = (emotion_weight(&user_messages, catalog) / count * EMOTION_SCALE).min(100.0);
    let structure_score =
        (structure_weight(&user_messages, catalog) / count * STRUCTURE_SCALE).min(100.0);

    IndicatorSet::from_raw(
        message_length,
        response_time,
        question_ratio,
        emotion_density,
        structure_score,
    )
}

/// Collects the raw statistics shown in the personal analysis.
pub fn conversation_stats(transcript: &Transcript, catalog: &IndicatorCatalog) -> ConversationStats {
    let user_messages: Vec<&Message> = transcript.user_messages().collect();
    let expressive = catalog.expressive_pattern();

    ConversationStats {
        user_message_count: user_messages.len(),
        average_length: mean_length(&user_messages),
        question_count: user_messages.iter().filter(|m| m.content.contains('?')).count(),
        expressive_count: user_messages
            .iter()
            .map(|m| expressive.find_iter(&m.content).count())
            .sum(),
        response_latency_secs: mean_response_latency(transcript),
    }
}

fn mean_length(messages: &[&Message]) -> f64 {
    if messages.is_empty() {
        return 0.0;
    }
    let total: usize = messages.iter().map(|m| m.char_len()).sum();
    total as f64 / messages.len() as f64
}

/// Linear map of `value` from `domain` onto `[0, 100]`, clamped.
fn rescale(value: f64, (min, max): (f64, f64)) -> f64 {
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// Mean latency of user replies that directly follow a timestamped bot
/// message. `None` when no such pair exists.
fn mean_response_latency(transcript: &Transcript) -> Option<f64> {
    let latencies: Vec<f64> = transcript
        .messages()
        .windows(2)
        .filter_map(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.role != MessageRole::Assistant || next.role != MessageRole::User {
                return None;
            }
            let elapsed = next.timestamp? - prev.timestamp?;
            Some((elapsed.num_milliseconds().max(0) as f64) / 1000.0)
        })
        .collect();

    if latencies.is_empty() {
        None
    } else {
        Some(latencies.iter().sum::<f64>() / latencies.len() as f64)
    }
}

fn emotion_weight(messages: &[&Message], catalog: &IndicatorCatalog) -> f64 {
    let expressive = catalog.expressive_pattern();
    messages
        .iter()
        .map(|m| {
            let content = m.content.as_str();
            let keywords = catalog
                .emotion_keywords
                .all()
                .filter(|k| !k.is_empty() && content.contains(k))
                .count() as f64;
            let glyphs = expressive.find_iter(content).count() as f64;
            let exclamations = content.matches('!').count() as f64;

            keywords * KEYWORD_WEIGHT + glyphs * GLYPH_WEIGHT + exclamations * EXCLAMATION_WEIGHT
        })
        .sum()
}

fn structure_weight(messages: &[&Message], catalog: &IndicatorCatalog) -> f64 {
    let patterns = &catalog.structure_patterns;
    let present = |list: &[String], content: &str| {
        list.iter()
            .filter(|p| !p.is_empty() && content.contains(p.as_str()))
            .count() as f64
    };

    messages
        .iter()
        .map(|m| {
            let content = m.content.as_str();
            present(&patterns.numbering, content) * NUMBERING_WEIGHT
                + present(&patterns.bullets, content) * BULLET_WEIGHT
                + present(&patterns.summary, content) * SUMMARY_WEIGHT
                + content.matches('\n').count() as f64 * NEWLINE_WEIGHT
        })
        .sum()
}
