//! In-memory archives.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{normalize_mount_point, virtual_path, Archive, ArchiveError, ArchiveOpener, ArchiveResult};

/// An archive whose entries live in memory.
///
/// Cloning is cheap; clones share entry data.
///
/// # Example
///
/// ```
/// use paklayer::archive::{Archive, MemoryArchive};
///
/// let archive = MemoryArchive::new("/dlc/region1.pak", "/Game/")
///     .with_entry("Maps/BP_Harbor.uasset", b"{}".to_vec());
///
/// assert_eq!(archive.short_name(), "region1");
/// assert_eq!(
///     archive.list_entries("/Game/").unwrap(),
///     vec!["/Game/Maps/BP_Harbor.uasset".to_string()]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    path: PathBuf,
    mount_point: String,
    /// Keyed by full virtual path.
    entries: Arc<BTreeMap<String, Vec<u8>>>,
}

impl MemoryArchive {
    /// Create an empty archive for `path` mounted at `mount_point`.
    pub fn new(path: impl Into<PathBuf>, mount_point: &str) -> Self {
        Self {
            path: path.into(),
            mount_point: normalize_mount_point(mount_point),
            entries: Arc::new(BTreeMap::new()),
        }
    }

    /// Add an entry, given its path relative to the mount point.
    pub fn with_entry(mut self, entry: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.add_entry(entry, contents);
        self
    }

    /// Add an entry in place.
    pub fn add_entry(&mut self, entry: &str, contents: impl Into<Vec<u8>>) {
        let key = virtual_path(&self.mount_point, entry);
        Arc::make_mut(&mut self.entries).insert(key, contents.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Archive for MemoryArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn mount_point(&self) -> &str {
        &self.mount_point
    }

    fn list_entries(&self, prefix: &str) -> ArchiveResult<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn read_entry(&self, entry: &str) -> ArchiveResult<Vec<u8>> {
        self.entries
            .get(entry)
            .cloned()
            .ok_or_else(|| ArchiveError::EntryNotFound {
                path: self.path.clone(),
                entry: entry.to_string(),
            })
    }
}

/// Opens [`MemoryArchive`]s registered by path.
///
/// Paths without a registered archive fail with
/// [`ArchiveError::OpenFailed`]; paths marked with
/// [`fail`](Self::fail) return the given error instead, which lets callers
/// simulate corrupt packs.
#[derive(Debug, Default)]
pub struct MemoryArchiveOpener {
    archives: RwLock<HashMap<PathBuf, MemoryArchive>>,
    failures: RwLock<HashMap<PathBuf, ArchiveError>>,
}

impl MemoryArchiveOpener {
    /// Create an opener with no archives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an archive under its own path.
    pub fn insert(&self, archive: MemoryArchive) {
        self.archives
            .write()
            .insert(archive.path().to_path_buf(), archive);
    }

    /// Register an archive (builder form).
    pub fn with_archive(self, archive: MemoryArchive) -> Self {
        self.insert(archive);
        self
    }

    /// Make opening `path` fail with `ArchiveError::Corrupt`.
    pub fn fail(&self, path: impl Into<PathBuf>, reason: &str) {
        let path = path.into();
        self.failures.write().insert(
            path.clone(),
            ArchiveError::Corrupt {
                path,
                reason: reason.to_string(),
            },
        );
    }

    /// Stop failing `path`.
    pub fn heal(&self, path: &Path) {
        self.failures.write().remove(path);
    }
}

impl ArchiveOpener for MemoryArchiveOpener {
    fn open(&self, path: &Path) -> ArchiveResult<Box<dyn Archive>> {
        if let Some(err) = self.failures.read().get(path) {
            return Err(err.clone());
        }

        self.archives
            .read()
            .get(path)
            .cloned()
            .map(|archive| Box::new(archive) as Box<dyn Archive>)
            .ok_or_else(|| ArchiveError::OpenFailed {
                path: path.to_path_buf(),
                reason: "no such archive".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive() -> MemoryArchive {
        MemoryArchive::new("/dlc/region2.pak", "/Game")
            .with_entry("Maps/BP_Map2.uasset", b"map2".to_vec())
            .with_entry("readme.txt", b"hello".to_vec())
    }

    #[test]
    fn test_mount_point_is_normalized() {
        assert_eq!(archive().mount_point(), "/Game/");
    }

    #[test]
    fn test_list_entries_filters_by_prefix() {
        let archive = archive();
        let all = archive.list_entries("/Game/").unwrap();
        assert_eq!(all.len(), 2);

        let maps = archive.list_entries("/Game/Maps/").unwrap();
        assert_eq!(maps, vec!["/Game/Maps/BP_Map2.uasset".to_string()]);

        assert!(archive.list_entries("/Other/").unwrap().is_empty());
    }

    #[test]
    fn test_read_entry() {
        let archive = archive();
        assert_eq!(archive.read_entry("/Game/readme.txt").unwrap(), b"hello");
        assert!(matches!(
            archive.read_entry("/Game/missing"),
            Err(ArchiveError::EntryNotFound { .. })
        ));
    }

    #[test]
    fn test_clones_share_entries_until_modified() {
        let original = archive();
        let mut copy = original.clone();
        copy.add_entry("extra.bin", vec![1, 2, 3]);

        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_opener_opens_registered_archive() {
        let opener = MemoryArchiveOpener::new().with_archive(archive());
        let opened = opener.open(Path::new("/dlc/region2.pak")).unwrap();
        assert_eq!(opened.short_name(), "region2");
    }

    #[test]
    fn test_opener_unknown_path() {
        let opener = MemoryArchiveOpener::new();
        let result = opener.open(Path::new("/dlc/none.pak"));
        assert!(matches!(result, Err(ArchiveError::OpenFailed { .. })));
    }

    #[test]
    fn test_opener_fail_and_heal() {
        let opener = MemoryArchiveOpener::new().with_archive(archive());
        let path = Path::new("/dlc/region2.pak");

        opener.fail(path, "bad index");
        assert!(matches!(
            opener.open(path),
            Err(ArchiveError::Corrupt { .. })
        ));

        opener.heal(path);
        assert!(opener.open(path).is_ok());
    }
}
