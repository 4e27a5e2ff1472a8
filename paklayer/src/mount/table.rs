//! Registry of mounted packs.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{MountError, MountResult};

/// Whether a pack is currently mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountState {
    /// Not registered in the mount table.
    Unmounted,
    /// Registered and mounted into the VFS.
    Mounted,
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountState::Unmounted => write!(f, "unmounted"),
            MountState::Mounted => write!(f, "mounted"),
        }
    }
}

/// One mounted pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Absolute path of the pack; its identity.
    pub path: PathBuf,

    /// Priority tier the pack was mounted with.
    pub priority: i32,

    /// Virtual directory the pack's entries live under.
    pub mount_point: String,

    /// Registration order, used to break priority ties.
    sequence: u64,
}

impl MountEntry {
    /// Registration order of this entry.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// In-memory registry of mounted packs.
///
/// Holds at most one entry per path. The table is plain data with no
/// internal locking; share it behind a mutex if several threads mount.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    /// Entries in registration order.
    entries: Vec<MountEntry>,
    next_sequence: u64,
}

impl MountTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a pack is registered.
    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Look up a registered pack.
    pub fn get(&self, path: &Path) -> Option<&MountEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Mount state of a pack.
    pub fn state(&self, path: &Path) -> MountState {
        if self.contains(path) {
            MountState::Mounted
        } else {
            MountState::Unmounted
        }
    }

    /// Register a pack as mounted.
    ///
    /// Fails with [`MountError::AlreadyMounted`] if the path is present.
    pub fn register(
        &mut self,
        path: impl Into<PathBuf>,
        priority: i32,
        mount_point: impl Into<String>,
    ) -> MountResult<&MountEntry> {
        let path = path.into();
        if self.contains(&path) {
            return Err(MountError::AlreadyMounted(path));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(MountEntry {
            path,
            priority,
            mount_point: mount_point.into(),
            sequence,
        });

        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove a pack.
    ///
    /// Fails with [`MountError::NotMounted`] if the path is absent.
    pub fn unregister(&mut self, path: &Path) -> MountResult<MountEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.path == path)
            .ok_or_else(|| MountError::NotMounted(path.to_path_buf()))?;
        Ok(self.entries.remove(position))
    }

    /// Packs in overlay application order: priority ascending, ties in
    /// registration order.
    ///
    /// Replaying this sequence against a last-write-wins VFS reproduces the
    /// effective overlay.
    pub fn ordered_view(&self) -> Vec<(&Path, i32)> {
        let mut view: Vec<&MountEntry> = self.entries.iter().collect();
        view.sort_by_key(|e| (e.priority, e.sequence));
        view.into_iter()
            .map(|e| (e.path.as_path(), e.priority))
            .collect()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    /// Paths in registration order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Number of mounted packs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no packs are mounted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
