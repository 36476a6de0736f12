use crate::context::AppContext;
use crate::render::{render_report, report_json};
use anyhow::{Context, Result};
use chatpression_application::{AnalysisOutcome, AnalysisUseCase};
use chatpression_core::transcript::Transcript;
use colored::Colorize;
use std::path::Path;

pub async fn run(ctx: &AppContext, transcript: Option<&Path>, json: bool) -> Result<()> {
    let usecase = AnalysisUseCase::new(ctx.reference.clone(), ctx.storage.clone());

    let outcome = match transcript {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read transcript {}", path.display()))?;
            let transcript = Transcript::from_json(&text)
                .with_context(|| format!("Invalid transcript {}", path.display()))?;
            usecase.run_on(transcript).await
        }
        None => usecase.run().await,
    };

    match outcome {
        AnalysisOutcome::Ready(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report_json(&report)?)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        AnalysisOutcome::Failed { message } => {
            eprintln!("{}", message.red());
            anyhow::bail!("analysis failed");
        }
    }
    Ok(())
}
