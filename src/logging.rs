//! Logging setup.
//!
//! The terminal is in raw mode on the alternate screen while the app runs, so
//! diagnostics go to a log file instead of stderr. The log level is controlled
//! via `RUST_LOG` and defaults to `info`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides the directory the log file is written to.
pub const LOG_DIR_ENV: &str = "MAZEWALK_LOG_DIR";
pub const LOG_FILE_NAME: &str = "mazewalk.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file in `{}`: {source}", dir.display())]
    CreateAppender {
        dir: PathBuf,
        #[source]
        source: InitError,
    },
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Directory to write the log file to: `MAZEWALK_LOG_DIR` if set, the system
/// temp directory otherwise.
pub fn log_dir() -> PathBuf {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::temp_dir(),
    }
}

/// Install a global subscriber writing to `dir/mazewalk.log`.
///
/// The returned guard flushes the background writer when dropped; keep it
/// alive for as long as the program should log.
pub fn init_logging(dir: &Path) -> Result<WorkerGuard, LoggingError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .map_err(|source| LoggingError::CreateAppender {
            dir: dir.to_path_buf(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })?;
    Ok(guard)
}
