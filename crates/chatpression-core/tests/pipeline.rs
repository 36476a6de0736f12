//! End-to-end analysis over the bundled reference data.

use chatpression_core::analysis::{
    IndicatorSet, TipKind, analyze, extract_indicators, match_type, personal_analysis, score_types,
};
use chatpression_core::catalog::{IndicatorCatalog, IndicatorKey, PersonalityCatalog, TraitLevel};
use chatpression_core::transcript::{Message, Transcript, sample_transcript};

const PERSONALITY_TYPES: &str = include_str!("../../../data/personality-types.json");
const INDICATORS: &str = include_str!("../../../data/indicators.json");

fn catalogs() -> (PersonalityCatalog, IndicatorCatalog) {
    (
        PersonalityCatalog::from_json(PERSONALITY_TYPES).unwrap(),
        IndicatorCatalog::from_json(INDICATORS).unwrap(),
    )
}

#[test]
fn test_bundled_catalogs_parse() {
    let (types, indicators) = catalogs();
    assert_eq!(types.len(), 8);
    for key in [
        IndicatorKey::MessageLength,
        IndicatorKey::ResponseTime,
        IndicatorKey::QuestionRatio,
        IndicatorKey::EmotionDensity,
        IndicatorKey::StructureScore,
    ] {
        assert!(indicators.definition(key).is_some(), "{} missing", key);
    }
}

#[test]
fn test_sample_transcript_snapshot() {
    let (types, catalog) = catalogs();
    let transcript = sample_transcript();

    let indicators = extract_indicators(&transcript, &catalog);
    assert_eq!(indicators, IndicatorSet::new(14, 50, 40, 16, 0));

    let scores: Vec<(String, u32)> = score_types(&indicators, &types, &catalog)
        .into_iter()
        .map(|s| (s.code, s.score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("BALA".to_string(), 50),
            ("CALM".to_string(), 40),
            ("CURI".to_string(), 30),
            ("DEEP".to_string(), 20),
            ("EMPA".to_string(), 30),
            ("LOGI".to_string(), 20),
            ("QUIK".to_string(), 50),
            ("STOR".to_string(), 10),
        ]
    );

    // BALA and QUIK tie; the earlier code wins.
    assert_eq!(match_type(&indicators, &types, &catalog).unwrap(), "BALA");
}

#[test]
fn test_sample_transcript_report() {
    let (types, catalog) = catalogs();
    let result = analyze(&sample_transcript(), &types, &catalog).unwrap();

    assert_eq!(result.type_code, "BALA");
    assert_eq!(result.type_data.name, "균형 잡힌 대화가");
    assert_eq!(result.strengths.len(), 3);

    let levels: Vec<TraitLevel> = result.details.iter().map(|d| d.level).collect();
    assert_eq!(
        levels,
        vec![
            TraitLevel::Low,
            TraitLevel::Medium,
            TraitLevel::Medium,
            TraitLevel::Low,
            TraitLevel::Low
        ]
    );

    let tip_titles: Vec<&str> = result.tips.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(tip_titles, vec!["생각 정리해서 전달하기", "표현 풍부하게 하기"]);
    assert!(result.tips.iter().all(|t| t.kind == TipKind::Improvement));
}

#[test]
fn test_sample_personal_analysis() {
    let (_, catalog) = catalogs();
    let personal = personal_analysis(&sample_transcript(), &catalog);
    assert_eq!(personal.message_count, 5);
    assert_eq!(personal.average_length, 29);
    assert_eq!(personal.question_count, 2);
    assert_eq!(personal.expressive_count, 1);
    assert_eq!(
        personal.traits,
        vec![
            "상대방에게 질문을 자주 하며 관심을 표현했어요",
            "자연스럽고 편안한 대화 스타일을 보여줬어요"
        ]
    );
}

#[test]
fn test_assistant_only_transcript_uses_defaults() {
    let (types, catalog) = catalogs();
    let transcript: Transcript = vec![Message::assistant("안녕하세요!")].into();
    let result = analyze(&transcript, &types, &catalog).unwrap();
    assert_eq!(result.indicators, IndicatorSet::default());
}

#[test]
fn test_structured_writer_matches_logical_type() {
    let (types, catalog) = catalogs();
    let text = "정리하면 이번 여행 준비는 세 단계로 나눌 수 있습니다.\n\
                1. 먼저 각자 가능한 일정을 확인하고\n\
                2. 이동 시간을 고려해서 장소를 정한 다음\n\
                3. 숙소와 교통편 예약을 진행하면 됩니다. 결론적으로 이번 주 안에 모든 준비를 끝낼 수 있어요.";
    let transcript: Transcript = vec![
        Message::assistant("계획 있어요?"),
        Message::user(text),
        Message::assistant("좋네요"),
        Message::user(text),
    ]
    .into();
    let result = analyze(&transcript, &types, &catalog).unwrap();
    assert_eq!(result.indicators, IndicatorSet::new(89, 50, 0, 0, 100));
    assert_eq!(result.type_code, "LOGI");
}

#[test]
fn test_analysis_is_deterministic() {
    let (types, catalog) = catalogs();
    let first = analyze(&sample_transcript(), &types, &catalog).unwrap();
    for _ in 0..5 {
        assert_eq!(analyze(&sample_transcript(), &types, &catalog).unwrap(), first);
    }
}
