//! Application error types.

use std::fmt;

use crate::config::ConfigError;

/// Errors raised while building or driving a [`PakLayer`](super::PakLayer).
#[derive(Debug)]
pub enum AppError {
    /// Configuration failed to validate.
    Config(ConfigError),

    /// The pack root could not be searched.
    Discovery(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Discovery(e) => write!(f, "Pack discovery failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Discovery(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Discovery(e)
    }
}
