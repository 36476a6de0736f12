use crate::context::AppContext;
use anyhow::Result;
use chatpression_application::UnlockUseCase;
use chatpression_core::unlock::ClaimOutcome;
use colored::Colorize;
use std::io::Write;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let usecase = UnlockUseCase::new(ctx.storage.clone(), &ctx.config.unlock);

    let mut gate = usecase.restore_gate().await?;
    if gate.is_unlocked() {
        println!("{}", "상세 분석이 이미 열려 있어요.".bright_green());
        return Ok(());
    }

    let handle = usecase.start_countdown();
    let mut progress = handle.subscribe();
    loop {
        let countdown = *progress.borrow_and_update();
        print!(
            "\r{} {}",
            format!("[{:>3}%]", countdown.progress_percent()).bright_black(),
            countdown.label()
        );
        std::io::stdout().flush()?;
        if countdown.is_complete() {
            println!();
            break;
        }

        tokio::select! {
            changed = progress.changed() => {
                if changed.is_err() {
                    println!();
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "건너뛰기를 취소했어요.".yellow());
                return Ok(());
            }
        }
    }

    match usecase.claim(&mut gate, &handle).await? {
        ClaimOutcome::Unlocked | ClaimOutcome::AlreadyUnlocked => {
            println!("{}", "상세 분석이 열렸어요! `chatpression analyze`로 확인해 보세요.".bright_green());
        }
        ClaimOutcome::NotReady { remaining } => {
            println!("{}", format!("아직 {}초 남았어요.", remaining).yellow());
        }
    }
    Ok(())
}
