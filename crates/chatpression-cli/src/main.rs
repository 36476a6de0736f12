use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod render;

use commands::chat::ProfileArgs;
use context::AppContext;

#[derive(Parser)]
#[command(name = "chatpression")]
#[command(about = "ChatPression - find out the first impression your chat style makes", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session to read and write (overrides `storage.session_id`)
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse the session's conversation and print the report
    Analyze {
        /// Analyse a transcript JSON file instead of the stored session
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chat with the bot; the conversation is stored in the session
    Chat {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Run the reward countdown that unlocks the detailed report
    Unlock,
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config.as_deref(), cli.session.as_deref())?;
    let _log_guard = logging::init(cli.verbose, &ctx.config.logging)?;
    tracing::debug!(session = %ctx.session_id, "Starting");

    match cli.command {
        Commands::Analyze { transcript, json } => {
            commands::analyze::run(&ctx, transcript.as_deref(), json).await?
        }
        Commands::Chat { profile } => commands::chat::run(&ctx, profile).await?,
        Commands::Unlock => commands::unlock::run(&ctx).await?,
        Commands::ShowConfig => commands::show_config::run(&ctx)?,
    }

    Ok(())
}
