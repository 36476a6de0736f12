use crate::context::AppContext;
use anyhow::Result;
use colored::Colorize;

pub fn run(ctx: &AppContext) -> Result<()> {
    if let Some(path) = &ctx.config_path {
        println!("{}", format!("# {}", path.display()).bright_black());
    }
    println!("{}", format!("# session: {}", ctx.session_id).bright_black());
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
