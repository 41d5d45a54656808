//! File logging. The terminal belongs to the TUI, so nothing is ever written to
//! stdout or stderr from here.

use crate::error::{DoomtypeError, Result};
use std::path::Path;
use tracing::{debug, info};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "doomtype";

/// Builds the subscriber without installing it. Keep the guard alive for as
/// long as logs should be flushed.
pub fn subscriber(
    dir: &Path,
) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, WorkerGuard)> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| DoomtypeError::Logging(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    // Set different log levels based on build type
    let env_filter = if cfg!(debug_assertions) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    Ok((subscriber, guard))
}

/// Installs the global subscriber writing into `dir`.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let (subscriber, guard) = subscriber(dir)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| DoomtypeError::Logging(e.to_string()))?;

    info!(dir = %dir.display(), "Logging system initialized");
    debug!(
        "Debug logging {}",
        if cfg!(debug_assertions) { "enabled" } else { "disabled" }
    );

    Ok(guard)
}
