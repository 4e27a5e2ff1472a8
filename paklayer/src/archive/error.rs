//! Archive error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors surfaced by archive codecs.
///
/// All of these are fatal for the one pack involved and nothing else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("failed to open archive {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// The archive opened but its contents are unreadable.
    #[error("archive {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The requested entry is not in the archive.
    #[error("entry {entry} not found in {path}")]
    EntryNotFound { path: PathBuf, entry: String },
}

impl ArchiveError {
    /// Path of the archive the error relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::OpenFailed { path, .. }
            | Self::Corrupt { path, .. }
            | Self::EntryNotFound { path, .. } => path,
        }
    }
}
