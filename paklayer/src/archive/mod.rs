//! Archive capability.
//!
//! The loader never decodes pack files itself. It talks to an [`Archive`]
//! handle obtained from an [`ArchiveOpener`], which hides the container
//! format entirely.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryArchive`]: entries held in memory, for embedding and tests
//! - [`TarArchive`]: gzip tarballs read through the system `tar` tool
//!
//! # Entry Paths
//!
//! Entry names returned by [`Archive::list_entries`] are full virtual paths:
//! the archive's mount point followed by the entry's path inside the
//! container, e.g. `/Game/Maps/BP_Harbor.uasset`.

mod error;
mod memory;
mod tar;

pub use error::{ArchiveError, ArchiveResult};
pub use memory::{MemoryArchive, MemoryArchiveOpener};
pub use tar::{TarArchive, TarArchiveOpener};

use std::path::Path;

/// An opened pack.
pub trait Archive: Send + Sync {
    /// Filesystem path the archive was opened from.
    fn path(&self) -> &Path;

    /// Virtual directory the archive's entries live under. Always ends in `/`.
    fn mount_point(&self) -> &str;

    /// List files (never directories) whose virtual path starts with `prefix`.
    fn list_entries(&self, prefix: &str) -> ArchiveResult<Vec<String>>;

    /// Read an entry by its full virtual path.
    fn read_entry(&self, entry: &str) -> ArchiveResult<Vec<u8>>;

    /// Base file name of the archive without extension (e.g. `region1`).
    fn short_name(&self) -> String {
        short_name(self.path())
    }
}

/// Opens archives from disk.
pub trait ArchiveOpener: Send + Sync {
    /// Open the archive at `path`.
    fn open(&self, path: &Path) -> ArchiveResult<Box<dyn Archive>>;
}

/// Base file name of a pack path without its extension.
pub fn short_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Ensure a mount point starts and ends with `/`.
pub(crate) fn normalize_mount_point(mount_point: &str) -> String {
    let trimmed = mount_point.trim().replace('\\', "/");
    let mut normalized = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('/') && !trimmed.starts_with("..") {
        normalized.push('/');
    }
    normalized.push_str(&trimmed);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Join a mount point and a container-relative entry path.
pub(crate) fn virtual_path(mount_point: &str, entry: &str) -> String {
    format!(
        "{}{}",
        mount_point,
        entry.trim_start_matches("./").trim_start_matches('/')
    )
}
