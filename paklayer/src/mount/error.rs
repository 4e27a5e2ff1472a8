//! Mount error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::vfs::VfsError;

/// Result type for mount operations.
pub type MountResult<T> = Result<T, MountError>;

/// Errors from the mount table and mount manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MountError {
    /// The pack is already registered in the mount table.
    #[error("pack already mounted: {0}")]
    AlreadyMounted(PathBuf),

    /// The pack is not registered in the mount table.
    #[error("pack not mounted: {0}")]
    NotMounted(PathBuf),

    /// The VFS refused to mount the pack.
    #[error("failed to mount {path} at priority {priority}: {source}")]
    MountFailed {
        path: PathBuf,
        priority: i32,
        #[source]
        source: VfsError,
    },

    /// The VFS refused to unmount the pack.
    #[error("failed to unmount {path}: {source}")]
    UnmountFailed {
        path: PathBuf,
        #[source]
        source: VfsError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveError;

    #[test]
    fn test_mount_failed_display() {
        let err = MountError::MountFailed {
            path: PathBuf::from("/dlc/a.pak"),
            priority: 3,
            source: VfsError::Archive(ArchiveError::Corrupt {
                path: PathBuf::from("/dlc/a.pak"),
                reason: "bad footer".to_string(),
            }),
        };
        let message = err.to_string();
        assert!(message.contains("failed to mount /dlc/a.pak at priority 3"));
        assert!(message.contains("bad footer"));
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let err = MountError::UnmountFailed {
            path: PathBuf::from("/dlc/a.pak"),
            source: VfsError::NotMounted(PathBuf::from("/dlc/a.pak")),
        };
        assert!(err.source().is_some());
    }
}
