//! Chat → analysis → unlock over one file-backed session.

use async_trait::async_trait;
use chatpression_application::{AnalysisUseCase, ChatUseCase, TranscriptSource, UnlockUseCase};
use chatpression_core::Result;
use chatpression_core::config::UnlockConfig;
use chatpression_core::unlock::{ClaimOutcome, ReportSection};
use chatpression_infrastructure::{JsonReferenceRepository, TomlSessionStorage};
use chatpression_interaction::{ChatBackend, ChatRequest, TokenStream};
use futures::StreamExt;
use std::sync::Arc;
use tempfile::TempDir;

struct CannedBackend;

#[async_trait]
impl ChatBackend for CannedBackend {
    async fn stream_reply(&self, _request: &ChatRequest) -> Result<TokenStream> {
        let chunks = ["재밌네요", "! 더 ", "얘기해 주세요?"];
        Ok(futures::stream::iter(chunks.map(|c| Ok(c.to_string()))).boxed())
    }
}

#[tokio::test(start_paused = true)]
async fn test_chat_then_analyze_then_unlock() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(TomlSessionStorage::new(dir.path(), "flow").unwrap());

    let chat = ChatUseCase::new(storage.clone(), Arc::new(CannedBackend));
    let session = chat.open().await;
    for message in [
        "안녕하세요! 주말에 등산 다녀왔어요",
        "정상에서 본 풍경이 정말 대박이었어요 😊",
        "혹시 등산 좋아하세요?",
    ] {
        chat.send(&session, message, |_| {}).await;
    }
    assert_eq!(session.exchange_count(), 3);

    let analysis = AnalysisUseCase::new(Arc::new(JsonReferenceRepository::embedded()), storage.clone());
    let report = analysis.run().await.report().cloned().unwrap();
    assert_eq!(report.source, TranscriptSource::Stored);
    assert_eq!(report.personal.message_count, 3);
    assert!(!report.gate.is_unlocked());
    assert!(!report.visible_sections().contains(&ReportSection::Tips));

    let unlock = UnlockUseCase::new(
        storage.clone(),
        &UnlockConfig {
            reward_ticks: 15,
            tick_millis: 1000,
        },
    );
    let handle = unlock.start_countdown();
    handle.finished().await;
    let mut gate = report.gate.clone();
    assert_eq!(
        unlock.claim(&mut gate, &handle).await.unwrap(),
        ClaimOutcome::Unlocked
    );

    // A later analysis of the same session starts unlocked.
    let reloaded = analysis.run().await.report().cloned().unwrap();
    assert!(reloaded.gate.is_unlocked());
    assert!(reloaded.visible_sections().contains(&ReportSection::Tips));
    assert_eq!(reloaded.result.type_code, report.result.type_code);
}
