//! Logging setup.
//!
//! [`init`] is called once, explicitly, at process start. Components log through the `tracing`
//! macros; nothing is configured at module load.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::SetupError;

/// Install the global subscriber: timestamped lines to stdout and appended to `log_path`.
///
/// The level defaults to `info` and can be changed with `RUST_LOG`. Keep the returned guard alive
/// until the process exits; dropping it flushes buffered file output.
pub fn init(log_path: impl AsRef<Path>) -> Result<WorkerGuard, SetupError> {
    let log_path = log_path.as_ref();
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SetupError::Logging(format!("not a file path: {}", log_path.display())))?;

    // Rotation::NEVER with only a prefix writes to exactly `file_name`, appending.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| SetupError::Logging(e.to_string()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| SetupError::Logging(e.to_string()))?;

    Ok(guard)
}
