//! VFS error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;

/// Result type for VFS operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors returned by a [`Vfs`](super::Vfs).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// The pack's archive could not be opened or indexed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The pack is already mounted.
    #[error("{0} is already mounted")]
    AlreadyMounted(PathBuf),

    /// The pack is not mounted.
    #[error("{0} is not mounted")]
    NotMounted(PathBuf),

    /// No mounted pack provides the virtual path.
    #[error("no mounted pack provides {0}")]
    NotFound(String),
}
