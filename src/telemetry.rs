use anyhow::Context;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Logs to stdout and to a daily rolling `app.log` under the configured directory.
///
/// Keep the returned guard alive for the life of the process, dropping it
/// flushes and stops the file writer.
pub fn init_tracing(config: &Config) -> anyhow::Result<WorkerGuard> {
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid LOG_LEVEL {:?}", config.log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false), // removes module path
        )
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
