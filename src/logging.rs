//! Logging setup
//!
//! Installs a tracing subscriber with a colored console layer and an
//! optional line-oriented log file. Operators see error/warn/info/debug
//! lines on the console; the file sink carries the same entries without
//! ANSI colors.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes console-only logging
///
/// The level is taken from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once is a no-op.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_ansi(true))
        .try_init();
}

/// Initializes logging with an additional append-mode log file
///
/// Returns the worker guard of the non-blocking file writer; dropping it
/// flushes and stops the file sink, so hold it for the program's lifetime.
pub fn init_with_file(path: &Path) -> std::io::Result<WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_ansi(true))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();
    Ok(guard)
}
