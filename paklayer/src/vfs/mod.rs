//! Virtual filesystem capability.
//!
//! The [`Vfs`] trait is the mount target for packs. Mounting registers a
//! pack's entries in a shared namespace with a priority; when several packs
//! expose the same virtual path, the one with the highest priority serves it,
//! and among equal priorities the one mounted last.
//!
//! [`OverlayVfs`] is the in-process implementation. It keeps a merged index
//! of every mounted pack, similar to an overlay filesystem:
//!
//! ```text
//! region1.pak (tier 2)      region2.pak (tier 4)       overlay view
//! /Game/x.uasset      ─┐    /Game/x.uasset     ─┐
//! /Game/a.uasset       │    /Game/b.uasset      │    /Game/x.uasset → region2
//!                      └────────────────────────┴──▶ /Game/a.uasset → region1
//!                                                    /Game/b.uasset → region2
//! ```
//!
//! Implementations take `&self` and synchronize internally so a single
//! handle can be shared between the mount manager and readers.

mod error;
mod overlay;

pub use error::{VfsError, VfsResult};
pub use overlay::{FileSource, OverlayVfs};

use std::path::{Path, PathBuf};

/// A virtual filesystem packs can be mounted into.
pub trait Vfs: Send + Sync {
    /// Mount the pack at `pack` with the given priority.
    ///
    /// Returns the mount point the pack's entries were placed under.
    fn mount(&self, pack: &Path, priority: i32) -> VfsResult<String>;

    /// Unmount a previously mounted pack.
    fn unmount(&self, pack: &Path) -> VfsResult<()>;

    /// Paths of all mounted packs, in mount order.
    fn mounted_points(&self) -> Vec<PathBuf>;

    /// Files directly inside a virtual directory (not recursive, no
    /// directories), as full virtual paths.
    fn iterate_directory(&self, directory: &str) -> Vec<String>;
}
