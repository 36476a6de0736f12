//! Analysis use case.
//!
//! Loads both catalogs and the stored transcript, runs the analysis pipeline
//! and restores the unlock gate for the report.

use chatpression_core::analysis::{
    AnalysisResult, PersonalAnalysis, TypeScore, analyze, personal_analysis, score_types,
};
use chatpression_core::reference::ReferenceDataRepository;
use chatpression_core::storage::{ANALYSIS_UNLOCKED_KEY, CHAT_HISTORY_KEY, SessionStorage};
use chatpression_core::transcript::{Transcript, sample_transcript};
use chatpression_core::unlock::{ReportSection, UnlockGate};
use serde::Serialize;
use std::sync::Arc;

/// Where the analysed transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSource {
    /// The session's stored chat history.
    Stored,
    /// The built-in sample conversation.
    Sample,
    /// Supplied by the caller.
    Provided,
}

/// Everything the report view needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub personal: PersonalAnalysis,
    /// Match totals of every type in catalog order.
    pub scores: Vec<TypeScore>,
    pub source: TranscriptSource,
    #[serde(skip)]
    pub gate: UnlockGate,
}

impl AnalysisReport {
    /// Sections visible under the current gate state, in display order.
    pub fn visible_sections(&self) -> Vec<ReportSection> {
        use strum::IntoEnumIterator;
        ReportSection::iter()
            .filter(|section| self.gate.can_view(*section))
            .collect()
    }
}

/// Outcome of one analysis pass.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Ready(Box<AnalysisReport>),
    /// Analysis failed; `message` is the generic text shown instead of a
    /// partial report. The cause is logged.
    Failed { message: &'static str },
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Ready(report) => Some(report),
            AnalysisOutcome::Failed { .. } => None,
        }
    }
}

pub struct AnalysisUseCase {
    reference: Arc<dyn ReferenceDataRepository>,
    storage: Arc<dyn SessionStorage>,
}

impl AnalysisUseCase {
    pub fn new(
        reference: Arc<dyn ReferenceDataRepository>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self { reference, storage }
    }

    /// Analyses the session's stored chat history, or the sample
    /// conversation when none is stored.
    pub async fn run(&self) -> AnalysisOutcome {
        let (transcript, source) = self.load_transcript().await;
        self.finish(transcript, source).await
    }

    /// Analyses a caller-supplied transcript.
    pub async fn run_on(&self, transcript: Transcript) -> AnalysisOutcome {
        self.finish(transcript, TranscriptSource::Provided).await
    }

    async fn finish(&self, transcript: Transcript, source: TranscriptSource) -> AnalysisOutcome {
        match self.build_report(&transcript, source).await {
            Ok(report) => AnalysisOutcome::Ready(Box::new(report)),
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                AnalysisOutcome::Failed {
                    message: e.user_message(),
                }
            }
        }
    }

    async fn build_report(
        &self,
        transcript: &Transcript,
        source: TranscriptSource,
    ) -> chatpression_core::Result<AnalysisReport> {
        let (types, catalog) = tokio::try_join!(
            self.reference.load_personality_types(),
            self.reference.load_indicators(),
        )?;

        let result = analyze(transcript, &types, &catalog)?;
        let scores = score_types(&result.indicators, &types, &catalog);
        tracing::debug!(
            winner = %result.type_code,
            scores = ?scores.iter().map(|s| (s.code.as_str(), s.score)).collect::<Vec<_>>(),
            "Type match complete"
        );
        let personal = personal_analysis(transcript, &catalog);
        let gate = self.restore_gate().await;

        Ok(AnalysisReport {
            result,
            personal,
            scores,
            source,
            gate,
        })
    }

    async fn load_transcript(&self) -> (Transcript, TranscriptSource) {
        match self.storage.get(CHAT_HISTORY_KEY).await {
            Ok(Some(json)) => match Transcript::from_json(&json) {
                Ok(transcript) => return (transcript, TranscriptSource::Stored),
                Err(e) => tracing::warn!("Stored chat history is malformed, using sample: {}", e),
            },
            Ok(None) => tracing::debug!("No stored chat history, using sample"),
            Err(e) => tracing::warn!("Failed to read chat history, using sample: {}", e),
        }
        (sample_transcript(), TranscriptSource::Sample)
    }

    async fn restore_gate(&self) -> UnlockGate {
        let flag = match self.storage.get(ANALYSIS_UNLOCKED_KEY).await {
            Ok(flag) => flag,
            Err(e) => {
                tracing::warn!("Failed to read unlock flag: {}", e);
                None
            }
        };
        UnlockGate::restore(flag.as_deref())
    }
}
