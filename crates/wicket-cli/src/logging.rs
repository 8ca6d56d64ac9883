//! File logging setup.
//!
//! Logs go to ${WICKET_HOME}/logs only. Writing to the terminal would
//! fight the alternate screen, so there is no console fallback; when the
//! log directory cannot be created, logging is simply disabled.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use wicket_core::config::paths;

/// Initializes logging with daily file rotation.
///
/// Returns a guard that flushes buffered lines; the caller must keep it
/// alive for the duration of the program.
pub fn init(log_level: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wicket={log_level},warn")));

    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    // Rotates daily, keeps the last few files
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("wicket")
        .filename_suffix("log")
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!(dir = %log_dir.display(), "logging to file");
    Some(guard)
}
