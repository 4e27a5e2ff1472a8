//! Mount orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use super::{MountEntry, MountError, MountResult, MountState, MountTable};
use crate::priority::PriorityClassifier;
use crate::vfs::Vfs;

/// Mounts and unmounts packs against a [`Vfs`], keeping a [`MountTable`]
/// consistent with what is actually mounted.
///
/// The manager only ever unmounts packs it registered itself. VFS failures
/// are returned to the caller and never retried.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use std::sync::Arc;
/// use paklayer::archive::{MemoryArchive, MemoryArchiveOpener};
/// use paklayer::mount::MountManager;
/// use paklayer::priority::PriorityClassifier;
/// use paklayer::vfs::OverlayVfs;
///
/// let opener = MemoryArchiveOpener::new()
///     .with_archive(MemoryArchive::new("/game/Content/DLC/a.pak", "/Game/"));
/// let vfs = Arc::new(OverlayVfs::new(Arc::new(opener)));
/// let classifier = PriorityClassifier::new("/game/Content", "Game", "/engine/Content", "/game/Saved");
/// let mut manager = MountManager::new(vfs, classifier);
///
/// assert!(manager.mount(Path::new("/game/Content/DLC/a.pak")).unwrap());
/// // Second mount is a no-op success
/// assert!(manager.mount(Path::new("/game/Content/DLC/a.pak")).unwrap());
/// assert_eq!(manager.list_mounted().len(), 1);
/// ```
pub struct MountManager {
    vfs: Arc<dyn Vfs>,
    classifier: PriorityClassifier,
    table: MountTable,
}

impl MountManager {
    /// Create a manager mounting into `vfs`.
    pub fn new(vfs: Arc<dyn Vfs>, classifier: PriorityClassifier) -> Self {
        Self {
            vfs,
            classifier,
            table: MountTable::new(),
        }
    }

    /// Mount a pack at the priority its path classifies to.
    ///
    /// Returns `Ok(true)` once the pack is mounted. A pack that is already
    /// mounted succeeds without touching the VFS. A VFS failure returns
    /// [`MountError::MountFailed`] and leaves the table unchanged.
    pub fn mount(&mut self, path: &Path) -> MountResult<bool> {
        let path = pack_identity(path);
        let priority = self.classifier.classify(&path);

        if self.table.contains(&path) {
            debug!(pack = %path.display(), "Pack already mounted, skipping");
            return Ok(true);
        }

        match self.vfs.mount(&path, priority) {
            Ok(mount_point) => {
                info!(
                    pack = %path.display(),
                    priority,
                    mount_point = %mount_point,
                    "Pack mounted"
                );
                self.table.register(path, priority, mount_point)?;
                Ok(true)
            }
            Err(source) => {
                error!(pack = %path.display(), priority, error = %source, "Pack mount failed");
                Err(MountError::MountFailed {
                    path,
                    priority,
                    source,
                })
            }
        }
    }

    /// Unmount a pack.
    ///
    /// Returns `Ok(true)` once the pack is no longer mounted, including when
    /// it never was. A VFS failure returns [`MountError::UnmountFailed`] and
    /// keeps the pack registered, since it is still mounted.
    pub fn unmount(&mut self, path: &Path) -> MountResult<bool> {
        let path = pack_identity(path);

        if !self.table.contains(&path) {
            debug!(pack = %path.display(), "Pack not mounted, nothing to unmount");
            return Ok(true);
        }

        match self.vfs.unmount(&path) {
            Ok(()) => {
                self.table.unregister(&path)?;
                info!(pack = %path.display(), "Pack unmounted");
                Ok(true)
            }
            Err(source) => {
                error!(pack = %path.display(), error = %source, "Pack unmount failed");
                Err(MountError::UnmountFailed { path, source })
            }
        }
    }

    /// Paths of mounted packs in registration order.
    pub fn list_mounted(&self) -> Vec<PathBuf> {
        self.table.paths()
    }

    /// Mount state of a pack.
    pub fn mount_state(&self, path: &Path) -> MountState {
        self.table.state(&pack_identity(path))
    }

    /// Mounted packs in overlay application order.
    pub fn ordered_view(&self) -> Vec<(&Path, i32)> {
        self.table.ordered_view()
    }

    /// Table entry for a mounted pack.
    pub fn entry(&self, path: &Path) -> Option<&MountEntry> {
        self.table.get(&pack_identity(path))
    }

    /// Files directly inside a virtual directory.
    pub fn files_in(&self, directory: &str) -> Vec<String> {
        self.vfs.iterate_directory(directory)
    }

    /// Priority tier a pack would be mounted at.
    pub fn priority_of(&self, path: &Path) -> i32 {
        self.classifier.classify(pack_identity(path))
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &PriorityClassifier {
        &self.classifier
    }
}

impl std::fmt::Debug for MountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountManager")
            .field("classifier", &self.classifier)
            .field("table", &self.table)
            .finish()
    }
}

/// Packs are identified by absolute path.
fn pack_identity(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
