//! Priority-ordered overlay of mounted packs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Vfs, VfsError, VfsResult};
use crate::archive::{Archive, ArchiveOpener};

/// Where a virtual path is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    /// Path of the pack providing the file.
    pub pack: PathBuf,

    /// Priority the pack was mounted with.
    pub priority: i32,

    /// Mount order; later mounts win ties.
    sequence: u64,
}

impl FileSource {
    fn rank(&self) -> (i32, u64) {
        (self.priority, self.sequence)
    }
}

struct MountedPack {
    path: PathBuf,
    short_name: String,
    rank: (i32, u64),
    entries: Vec<String>,
    archive: Box<dyn Archive>,
}

#[derive(Default)]
struct OverlayState {
    /// Mounted packs in mount order.
    packs: Vec<MountedPack>,

    /// Virtual path → every pack providing it.
    files: HashMap<String, Vec<FileSource>>,

    /// Content root name (`/<name>/`) → every pack registered under it.
    content_roots: HashMap<String, Vec<PathBuf>>,

    next_sequence: u64,
}

impl OverlayState {
    fn pack(&self, path: &Path) -> Option<&MountedPack> {
        self.packs.iter().find(|p| p.path == path)
    }

    fn resolve(&self, virtual_path: &str) -> Option<&FileSource> {
        self.files
            .get(virtual_path)
            .and_then(|sources| sources.iter().max_by_key(|s| s.rank()))
    }
}

/// In-process overlay filesystem over mounted archives.
///
/// Archives are opened through the [`ArchiveOpener`] at mount time and kept
/// open until unmounted.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use std::sync::Arc;
/// use paklayer::archive::{MemoryArchive, MemoryArchiveOpener};
/// use paklayer::vfs::{OverlayVfs, Vfs};
///
/// let opener = MemoryArchiveOpener::new()
///     .with_archive(MemoryArchive::new("/dlc/a.pak", "/Game/").with_entry("x", b"a".to_vec()))
///     .with_archive(MemoryArchive::new("/dlc/b.pak", "/Game/").with_entry("x", b"b".to_vec()));
/// let vfs = OverlayVfs::new(Arc::new(opener));
///
/// vfs.mount(Path::new("/dlc/b.pak"), 4).unwrap();
/// vfs.mount(Path::new("/dlc/a.pak"), 2).unwrap();
///
/// assert_eq!(vfs.read("/Game/x").unwrap(), b"b");
/// ```
pub struct OverlayVfs {
    opener: Arc<dyn ArchiveOpener>,
    state: RwLock<OverlayState>,
}

impl OverlayVfs {
    /// Create an empty overlay that opens packs with `opener`.
    pub fn new(opener: Arc<dyn ArchiveOpener>) -> Self {
        Self {
            opener,
            state: RwLock::new(OverlayState::default()),
        }
    }

    /// Find which pack serves a virtual path.
    pub fn resolve(&self, virtual_path: &str) -> Option<FileSource> {
        self.state.read().resolve(virtual_path).cloned()
    }

    /// Check whether any mounted pack provides a virtual path.
    pub fn contains(&self, virtual_path: &str) -> bool {
        self.state.read().files.contains_key(virtual_path)
    }

    /// Read a virtual path from the pack that serves it.
    pub fn read(&self, virtual_path: &str) -> VfsResult<Vec<u8>> {
        let state = self.state.read();
        let source = state
            .resolve(virtual_path)
            .ok_or_else(|| VfsError::NotFound(virtual_path.to_string()))?;
        let pack = state
            .pack(&source.pack)
            .ok_or_else(|| VfsError::NotFound(virtual_path.to_string()))?;

        Ok(pack.archive.read_entry(virtual_path)?)
    }

    /// Packs registered under the content root `/<name>/`, highest ranked
    /// first.
    ///
    /// Packs in different directories can share a file stem and therefore a
    /// root name.
    pub fn content_roots(&self, name: &str) -> Vec<PathBuf> {
        let state = self.state.read();
        let Some(paths) = state.content_roots.get(name) else {
            return Vec::new();
        };

        let mut ranked: Vec<&MountedPack> =
            paths.iter().filter_map(|path| state.pack(path)).collect();
        ranked.sort_by_key(|pack| std::cmp::Reverse(pack.rank));
        ranked.into_iter().map(|pack| pack.path.clone()).collect()
    }

    /// Entries a mounted pack contributed, whether or not they are shadowed.
    pub fn pack_entries(&self, pack: &Path) -> Vec<String> {
        self.state
            .read()
            .pack(pack)
            .map(|p| p.entries.clone())
            .unwrap_or_default()
    }

    /// Number of distinct virtual files.
    pub fn file_count(&self) -> usize {
        self.state.read().files.len()
    }
}

impl Vfs for OverlayVfs {
    fn mount(&self, pack: &Path, priority: i32) -> VfsResult<String> {
        if self.state.read().pack(pack).is_some() {
            return Err(VfsError::AlreadyMounted(pack.to_path_buf()));
        }

        // Open outside the lock; archive indexing may hit the disk
        let archive = self.opener.open(pack)?;
        let entries = archive.list_entries(archive.mount_point())?;
        let short_name = archive.short_name();
        let mount_point = archive.mount_point().to_string();

        let mut state = self.state.write();
        if state.pack(pack).is_some() {
            return Err(VfsError::AlreadyMounted(pack.to_path_buf()));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;

        for entry in &entries {
            state
                .files
                .entry(entry.clone())
                .or_default()
                .push(FileSource {
                    pack: pack.to_path_buf(),
                    priority,
                    sequence,
                });
        }
        state
            .content_roots
            .entry(short_name.clone())
            .or_default()
            .push(pack.to_path_buf());

        debug!(
            pack = %pack.display(),
            priority,
            entries = entries.len(),
            root = %short_name,
            "Pack mounted into overlay"
        );

        state.packs.push(MountedPack {
            path: pack.to_path_buf(),
            short_name,
            rank: (priority, sequence),
            entries,
            archive,
        });

        Ok(mount_point)
    }

    fn unmount(&self, pack: &Path) -> VfsResult<()> {
        let mut state = self.state.write();
        let position = state
            .packs
            .iter()
            .position(|p| p.path == pack)
            .ok_or_else(|| VfsError::NotMounted(pack.to_path_buf()))?;
        let removed = state.packs.remove(position);

        for entry in &removed.entries {
            if let Some(sources) = state.files.get_mut(entry) {
                sources.retain(|s| s.pack != pack);
                if sources.is_empty() {
                    state.files.remove(entry);
                }
            }
        }

        if let Some(paths) = state.content_roots.get_mut(&removed.short_name) {
            paths.retain(|p| p != pack);
            if paths.is_empty() {
                state.content_roots.remove(&removed.short_name);
            }
        }

        debug!(pack = %pack.display(), "Pack removed from overlay");
        Ok(())
    }

    fn mounted_points(&self) -> Vec<PathBuf> {
        self.state.read().packs.iter().map(|p| p.path.clone()).collect()
    }

    fn iterate_directory(&self, directory: &str) -> Vec<String> {
        let mut dir = directory.replace('\\', "/");
        if !dir.ends_with('/') {
            dir.push('/');
        }

        let state = self.state.read();
        let mut files: Vec<String> = state
            .files
            .keys()
            .filter(|path| {
                path.strip_prefix(dir.as_str())
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .cloned()
            .collect();
        files.sort();
        files
    }
}

impl std::fmt::Debug for OverlayVfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("OverlayVfs")
            .field("packs", &state.packs.len())
            .field("files", &state.files.len())
            .finish()
    }
}
