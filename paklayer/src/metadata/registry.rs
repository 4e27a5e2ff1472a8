//! Process-wide metadata cache.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use super::{MetadataExtractor, MetadataRecord};
use crate::archive::ArchiveOpener;
use crate::discovery::PackSource;
use crate::mount::{MountManager, MountState};

/// Lazily populated cache of every metadata record in the mounted packs.
///
/// The first [`get_all`](Self::get_all) runs the full pipeline:
///
/// ```text
/// discover ──▶ mount each new pack ──▶ extract from every mounted pack
/// ```
///
/// Later calls return the cache untouched until [`clear`](Self::clear).
/// Mounting or unmounting packs does not invalidate the cache.
///
/// An empty cache is indistinguishable from one never populated, so a
/// pipeline that yields no records runs again on the next call.
pub struct MetadataRegistry {
    source: Box<dyn PackSource>,
    manager: MountManager,
    opener: Arc<dyn ArchiveOpener>,
    extractor: MetadataExtractor,
    records: Vec<MetadataRecord>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new(
        source: Box<dyn PackSource>,
        manager: MountManager,
        opener: Arc<dyn ArchiveOpener>,
        extractor: MetadataExtractor,
    ) -> Self {
        Self {
            source,
            manager,
            opener,
            extractor,
            records: Vec::new(),
        }
    }

    /// Every metadata record, running the pipeline if the cache is empty.
    ///
    /// Extraction opens each mounted pack again through the
    /// [`ArchiveOpener`] rather than reusing the VFS index, so every
    /// population re-reads the pack listings from storage. A mounted pack
    /// that can no longer be opened contributes no records, even though the
    /// VFS keeps serving the files it indexed at mount time.
    pub fn get_all(&mut self) -> &[MetadataRecord] {
        if self.records.is_empty() {
            self.populate();
        }
        &self.records
    }

    /// Drop every cached record. Mounted packs stay mounted.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Whether the cache currently holds records.
    pub fn is_cached(&self) -> bool {
        !self.records.is_empty()
    }

    /// The mount manager.
    pub fn manager(&self) -> &MountManager {
        &self.manager
    }

    /// The mount manager, for explicit mount requests.
    pub fn manager_mut(&mut self) -> &mut MountManager {
        &mut self.manager
    }

    /// Discover packs and mount those not yet mounted.
    ///
    /// Returns how many packs this call mounted. Packs that fail to mount are
    /// logged and skipped.
    pub fn mount_discovered(&mut self) -> io::Result<usize> {
        let packs = self.source.discover()?;
        info!(count = packs.len(), "Discovered packs");

        let mut mounted = 0;
        for pack in &packs {
            if self.manager.mount_state(pack) == MountState::Mounted {
                continue;
            }
            match self.manager.mount(pack) {
                Ok(_) => mounted += 1,
                Err(e) => {
                    warn!(pack = %pack.display(), error = %e, "Skipping pack that failed to mount");
                }
            }
        }
        Ok(mounted)
    }

    fn populate(&mut self) {
        if let Err(e) = self.mount_discovered() {
            warn!(error = %e, "Pack discovery failed, using currently mounted packs");
        }

        for pack in self.manager.list_mounted() {
            let archive = match self.opener.open(&pack) {
                Ok(archive) => archive,
                Err(e) => {
                    warn!(pack = %pack.display(), error = %e, "Skipping unreadable pack");
                    continue;
                }
            };

            match self.extractor.extract(archive.as_ref()) {
                Ok(records) => self.records.extend(records),
                Err(e) => {
                    warn!(pack = %pack.display(), error = %e, "Skipping unreadable pack");
                }
            }
        }

        info!(records = self.records.len(), "Metadata extraction complete");
    }
}

impl std::fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("manager", &self.manager)
            .field("extractor", &self.extractor)
            .field("records", &self.records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{MemoryArchive, MemoryArchiveOpener};
    use crate::metadata::{MetadataFields, NamingConvention};
    use crate::priority::PriorityClassifier;
    use crate::resolver::RegistryResolver;
    use crate::vfs::OverlayVfs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        packs: Vec<PathBuf>,
        calls: Arc<AtomicUsize>,
    }

    impl PackSource for FixedSource {
        fn discover(&self) -> io::Result<Vec<PathBuf>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.packs.clone())
        }
    }

    struct FailingSource;

    impl PackSource for FailingSource {
        fn discover(&self) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    fn opener() -> Arc<MemoryArchiveOpener> {
        Arc::new(
            MemoryArchiveOpener::new()
                .with_archive(
                    MemoryArchive::new("/game/DLC/region1.pak", "/Game/")
                        .with_entry("Maps/BP_Map1.uasset", Vec::new()),
                )
                .with_archive(
                    MemoryArchive::new("/game/DLC/broken.pak", "/Game/")
                        .with_entry("Maps/BP_Broken.uasset", Vec::new()),
                ),
        )
    }

    fn registry(source: Box<dyn PackSource>, opener: Arc<MemoryArchiveOpener>) -> MetadataRegistry {
        let resolver = RegistryResolver::new().with_metadata(
            "/region1/BP_Map1.BP_Map1_C",
            MetadataFields::new("Map 1", "", "/Game/Maps/Map1.Map1"),
        );
        let vfs = Arc::new(OverlayVfs::new(opener.clone()));
        let classifier =
            PriorityClassifier::new("/game/Content", "Game", "/engine/Content", "/game/Saved");
        MetadataRegistry::new(
            source,
            MountManager::new(vfs, classifier),
            opener,
            MetadataExtractor::new(NamingConvention::default(), Arc::new(resolver)),
        )
    }

    #[test]
    fn test_get_all_memoizes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FixedSource {
            packs: vec![PathBuf::from("/game/DLC/region1.pak")],
            calls: calls.clone(),
        };
        let mut registry = registry(Box::new(source), opener());

        assert_eq!(registry.get_all().len(), 1);
        assert_eq!(registry.get_all().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        registry.clear();
        assert!(!registry.is_cached());
        assert_eq!(registry.manager().list_mounted().len(), 1);

        assert_eq!(registry.get_all().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_bad_pack_does_not_stop_the_rest() {
        let opener = opener();
        opener.fail("/game/DLC/broken.pak", "truncated");
        let source = FixedSource {
            packs: vec![
                PathBuf::from("/game/DLC/broken.pak"),
                PathBuf::from("/game/DLC/region1.pak"),
                PathBuf::from("/game/DLC/absent.pak"),
            ],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let mut registry = registry(Box::new(source), opener);

        let records = registry.get_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level_name(), "Map 1");
        assert_eq!(
            registry.manager().list_mounted(),
            vec![PathBuf::from("/game/DLC/region1.pak")]
        );
    }

    #[test]
    fn test_discovery_failure_uses_mounted_packs() {
        let mut registry = registry(Box::new(FailingSource), opener());
        registry
            .manager_mut()
            .mount(std::path::Path::new("/game/DLC/region1.pak"))
            .unwrap();

        assert_eq!(registry.get_all().len(), 1);
    }

    #[test]
    fn test_mount_discovered_counts_new_packs_only() {
        let source = FixedSource {
            packs: vec![PathBuf::from("/game/DLC/region1.pak")],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let mut registry = registry(Box::new(source), opener());

        assert_eq!(registry.mount_discovered().unwrap(), 1);
        assert_eq!(registry.mount_discovered().unwrap(), 0);
        assert_eq!(registry.manager().list_mounted().len(), 1);
    }

    #[test]
    fn test_pack_unreadable_after_mount_yields_no_records() {
        let opener = opener();
        let source = FixedSource {
            packs: vec![PathBuf::from("/game/DLC/region1.pak")],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let mut registry = registry(Box::new(source), opener.clone());
        assert_eq!(registry.get_all().len(), 1);

        opener.fail("/game/DLC/region1.pak", "replaced on disk");
        registry.clear();

        assert!(registry.get_all().is_empty());
        assert_eq!(
            registry.manager().mount_state(std::path::Path::new("/game/DLC/region1.pak")),
            MountState::Mounted
        );
        assert_eq!(
            registry.manager().files_in("/Game/Maps"),
            vec!["/Game/Maps/BP_Map1.uasset".to_string()]
        );
    }

    #[test]
    fn test_empty_result_reruns_pipeline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FixedSource {
            packs: Vec::new(),
            calls: calls.clone(),
        };
        let mut registry = registry(Box::new(source), opener());

        assert!(registry.get_all().is_empty());
        assert!(registry.get_all().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
