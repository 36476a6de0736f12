use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::context::AppContext;
use chatpression_application::ChatUseCase;
use chatpression_core::transcript::MessageRole;
use chatpression_core::user::{Gender, UserProfile};
use chatpression_interaction::{ChatSession, HttpChatBackend, SendOutcome};

const COMMANDS: [&str; 3] = ["/history", "/profile", "/quit"];

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

/// Profile fields; any given value is saved to the session first.
#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }

    fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender.into();
        }
    }
}

/// Completion and hints for slash commands.
#[derive(Clone)]
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ChatHelper {}

async fn print_history(session: &ChatSession) {
    for message in session.transcript().await.messages() {
        let line = match message.role {
            MessageRole::User => format!("나: {}", message.content).green(),
            MessageRole::Assistant => {
                format!("{}: {}", session.persona().name, message.content).bright_blue()
            }
        };
        println!("{}", line);
    }
}

pub async fn run(ctx: &AppContext, profile_args: ProfileArgs) -> Result<()> {
    let backend = Arc::new(HttpChatBackend::new(ctx.config.chat.endpoint.clone()));
    let usecase = ChatUseCase::new(ctx.storage.clone(), backend);

    if !profile_args.is_empty() {
        let mut profile = usecase.load_profile().await;
        profile_args.apply(&mut profile);
        usecase.save_profile(&profile).await?;
    }

    let session = usecase.open().await;
    let persona = session.persona().clone();
    let profile = session.profile().clone();

    println!("{}", persona.join_notice().bright_black());
    println!(
        "{}",
        format!("{} {} · {}", persona.avatar(), persona.name, persona.status_line(&profile))
            .bright_magenta()
            .bold()
    );
    println!("{}", "'/quit'으로 종료, '/history'로 지금까지의 대화를 볼 수 있어요.".bright_black());
    if let Some(greeting) = session.transcript().await.messages().last() {
        println!("{}", greeting.content.bright_blue());
    }
    println!();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/history" => {
                        print_history(&session).await;
                        continue;
                    }
                    "/profile" => {
                        println!("{} ({})", profile.name, persona.status_line(&profile));
                        continue;
                    }
                    _ => {}
                }

                print!("{} ", format!("{}:", persona.name).bright_blue().bold());
                std::io::stdout().flush()?;
                let outcome = usecase
                    .send(&session, trimmed, |token| {
                        print!("{}", token.bright_blue());
                        let _ = std::io::stdout().flush();
                    })
                    .await;
                println!();

                match outcome {
                    SendOutcome::Failed { notice } => println!("{}", notice.red()),
                    SendOutcome::Busy => println!("{}", "잠시만 기다려 주세요.".yellow()),
                    SendOutcome::Replied(_) | SendOutcome::Empty => {}
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "종료하려면 '/quit'을 입력하세요.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    println!(
        "{}",
        format!(
            "대화 {}회 완료. `chatpression analyze`로 첫인상을 확인해 보세요!",
            session.exchange_count()
        )
        .bright_green()
    );
    Ok(())
}
