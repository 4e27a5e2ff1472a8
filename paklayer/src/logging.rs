//! Logging setup.
//!
//! Installs a `tracing` subscriber writing to a log file through a
//! non-blocking appender, plus an optional stderr layer for interactive use.
//! `RUST_LOG` overrides the configured filter.

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The filter directive does not parse.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive as configured.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the file writer alive. Log lines still buffered are flushed when
/// this is dropped, so hold it until the program exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: WorkerGuard,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

/// Install the global subscriber.
///
/// `stderr` adds a compact human-readable layer on standard error alongside
/// the log file.
pub fn init_logging(config: &LoggingConfig, stderr: bool) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(&config.directory).map_err(|source| LoggingError::CreateDir {
        path: config.directory.clone(),
        source,
    })?;

    let filter = build_filter(&config.filter)?;

    let appender = tracing_appender::rolling::never(&config.directory, &config.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(LocalTime::rfc_3339())
        .with_target(true);

    let stderr_layer = stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(LocalTime::rfc_3339())
            .with_target(false)
            .compact()
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { _file: guard })
}

/// `RUST_LOG` when set, the configured directive otherwise.
fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}
