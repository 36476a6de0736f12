//! Tracing subscriber setup.

use anyhow::Result;
use chatpression_core::config::LoggingConfig;
use chatpression_infrastructure::ChatpressionPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 5] = [
    "chatpression_core",
    "chatpression_infrastructure",
    "chatpression_interaction",
    "chatpression_application",
    "chatpression",
];

/// Directives enabling `level` for our crates and `warn` for dependencies.
fn directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
/// The returned guard must live until exit so the file writer flushes.
pub fn init(verbose: bool, config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = if verbose {
        EnvFilter::new(directives("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(&config.level)))
    };

    let (file_layer, guard) = if config.file {
        let appender = tracing_appender::rolling::daily(ChatpressionPaths::logs_dir()?, "chatpression.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_quiet_dependencies() {
        let d = directives("info");
        assert!(d.starts_with("warn,"));
        assert!(d.contains("chatpression_core=info"));
        assert!(d.contains("chatpression=info"));
        assert!(EnvFilter::try_new(&d).is_ok());
    }
}
