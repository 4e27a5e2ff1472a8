//! CLI error type.

use std::path::PathBuf;

use paklayer::app::AppError;
use paklayer::config::ConfigError;
use paklayer::logging::LoggingError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded, validated or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// The loader failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// The pack root could not be searched.
    #[error("pack discovery failed: {0}")]
    Discovery(#[from] std::io::Error),

    /// A config file already exists where one would be created.
    #[error("config file already exists at {0} (use --force to overwrite)")]
    ConfigExists(PathBuf),

    /// No mounted pack provides the requested path.
    #[error("no mounted pack provides {0}")]
    NotFound(String),
}
