//! Integration tests for the discovery → mount → extraction pipeline.
//!
//! These tests drive the public API end to end:
//! - Real filesystem discovery under a temporary pack root
//! - In-memory and tarball archives
//! - An instrumented VFS that counts mount calls per pack
//!
//! Run with: `cargo test --test pipeline_integration`

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;

use paklayer::app::PakLayer;
use paklayer::archive::{MemoryArchive, MemoryArchiveOpener};
use paklayer::config::LoaderConfig;
use paklayer::discovery::{PackDiscovery, PackSource};
use paklayer::metadata::{MetadataExtractor, MetadataFields, MetadataRegistry, NamingConvention};
use paklayer::mount::MountManager;
use paklayer::priority::PriorityClassifier;
use paklayer::resolver::{AssetDescriptor, RegistryResolver};
use paklayer::vfs::{OverlayVfs, Vfs, VfsResult};

// ============================================================================
// Helpers
// ============================================================================

/// Discovery wrapper counting how often the pack root is searched.
struct CountingSource {
    inner: PackDiscovery,
    calls: Arc<AtomicUsize>,
}

impl PackSource for CountingSource {
    fn discover(&self) -> io::Result<Vec<PathBuf>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.discover()
    }
}

/// VFS wrapper counting mount calls per pack.
struct CountingVfs {
    inner: Arc<OverlayVfs>,
    mounts: Mutex<HashMap<PathBuf, usize>>,
}

impl CountingVfs {
    fn new(inner: Arc<OverlayVfs>) -> Self {
        Self {
            inner,
            mounts: Mutex::new(HashMap::new()),
        }
    }

    fn mount_count(&self, pack: &Path) -> usize {
        self.mounts.lock().get(pack).copied().unwrap_or(0)
    }
}

impl Vfs for CountingVfs {
    fn mount(&self, pack: &Path, priority: i32) -> VfsResult<String> {
        *self.mounts.lock().entry(pack.to_path_buf()).or_default() += 1;
        self.inner.mount(pack, priority)
    }

    fn unmount(&self, pack: &Path) -> VfsResult<()> {
        self.inner.unmount(pack)
    }

    fn mounted_points(&self) -> Vec<PathBuf> {
        self.inner.mounted_points()
    }

    fn iterate_directory(&self, directory: &str) -> Vec<String> {
        self.inner.iterate_directory(directory)
    }
}

/// Project layout under a temporary directory, with two region packs in `DLC/`.
struct Fixture {
    _temp: TempDir,
    project: PathBuf,
    region1: PathBuf,
    region2: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("Game");
        let dlc = project.join("DLC");
        fs::create_dir_all(&dlc).unwrap();

        let region1 = dlc.join("region1.pak");
        let region2 = dlc.join("region2.pak");
        fs::write(&region1, b"pak").unwrap();
        fs::write(&region2, b"pak").unwrap();

        Self {
            _temp: temp,
            project,
            region1,
            region2,
        }
    }

    fn opener(&self) -> Arc<MemoryArchiveOpener> {
        Arc::new(
            MemoryArchiveOpener::new()
                .with_archive(
                    MemoryArchive::new(&self.region1, "/Game/")
                        .with_entry("Maps/BP_Map1.uasset", Vec::new()),
                )
                .with_archive(
                    MemoryArchive::new(&self.region2, "/Game/")
                        .with_entry("Maps/BP_Map2.uasset", Vec::new())
                        .with_entry("readme.txt", b"hello".to_vec()),
                ),
        )
    }

    fn classifier(&self) -> PriorityClassifier {
        PriorityClassifier::new(
            self.project.join("Content"),
            "Game",
            self.project.join("Engine/Content"),
            self.project.join("Saved"),
        )
    }
}

fn resolver() -> RegistryResolver {
    RegistryResolver::new()
        .with_metadata(
            "/region1/BP_Map1.BP_Map1_C",
            MetadataFields::new("Region One", "First region", "/Game/Maps/Region1.Region1"),
        )
        .with_metadata(
            "/region2/BP_Map2.BP_Map2_C",
            MetadataFields::new("Region Two", "Second region", "/Game/Maps/Region2.Region2"),
        )
        // Would be picked up if non-matching entries were ever resolved
        .with_metadata("/region2/readme.readme_C", MetadataFields::default())
}

// ============================================================================
// Integration Tests
// ============================================================================

/// Two packs under DLC/ yield two records, each pack mounted exactly once.
#[test]
fn test_end_to_end_two_regions() {
    let fixture = Fixture::new();
    let opener = fixture.opener();
    let vfs = Arc::new(CountingVfs::new(Arc::new(OverlayVfs::new(opener.clone()))));
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: PackDiscovery::new(fixture.project.join("DLC"), "pak"),
        calls: calls.clone(),
    };

    let mut registry = MetadataRegistry::new(
        Box::new(source),
        MountManager::new(vfs.clone(), fixture.classifier()),
        opener,
        MetadataExtractor::new(NamingConvention::default(), Arc::new(resolver())),
    );

    let mut names: Vec<String> = registry
        .get_all()
        .iter()
        .map(|record| record.level_name())
        .collect();
    names.sort();

    assert_eq!(names, vec!["Region One", "Region Two"]);
    assert_eq!(vfs.mount_count(&fixture.region1), 1);
    assert_eq!(vfs.mount_count(&fixture.region2), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Memoized: no second discovery, no remount
    assert_eq!(registry.get_all().len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Clear recomputes against the same mounts
    registry.clear();
    assert_eq!(registry.get_all().len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(vfs.mount_count(&fixture.region1), 1);
    assert_eq!(vfs.mount_count(&fixture.region2), 1);
}

/// Records carry their source pack and resolved content reference.
#[test]
fn test_records_describe_their_pack() {
    let fixture = Fixture::new();
    let opener = fixture.opener();
    let vfs = Arc::new(OverlayVfs::new(opener.clone()));
    let mut registry = MetadataRegistry::new(
        Box::new(PackDiscovery::new(fixture.project.join("DLC"), "pak")),
        MountManager::new(vfs, fixture.classifier()),
        opener,
        MetadataExtractor::new(NamingConvention::default(), Arc::new(resolver())),
    );

    let records = registry.get_all();
    let region1 = records
        .iter()
        .find(|r| r.source() == fixture.region1)
        .unwrap();

    assert_eq!(region1.level_name(), "Region One");
    assert_eq!(region1.level_description().as_str(), "First region");
    assert_eq!(region1.level_reference(), "Region1");
}

/// A first run against a missing pack root creates it and finds nothing.
#[test]
fn test_missing_pack_root_bootstrap() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("Game");
    let config = LoaderConfig::new(&project, "Game", temp.path().join("Engine"));
    let pack_root = config.paths.pack_root.clone();

    let loader = PakLayer::with_parts(
        config,
        Box::new(PackDiscovery::new(&pack_root, "pak")),
        Arc::new(MemoryArchiveOpener::new()),
        Some(Arc::new(RegistryResolver::new())),
    )
    .unwrap();

    assert!(loader.get_all_metadata().is_empty());
    assert!(pack_root.is_dir());
    assert!(loader.mounted_packs().is_empty());
}

/// Tier 4 beats tier 2 on the same virtual path, whatever the mount order.
#[test]
fn test_overlay_precedence_by_tier() {
    let fixture = Fixture::new();
    let project_pak = fixture.project.join("Content/Paks/Game-patch.pak");
    let engine_pak = fixture.project.join("Engine/Content/base.pak");

    let opener = Arc::new(
        MemoryArchiveOpener::new()
            .with_archive(MemoryArchive::new(&project_pak, "/").with_entry("x", b"project".to_vec()))
            .with_archive(MemoryArchive::new(&engine_pak, "/").with_entry("x", b"engine".to_vec())),
    );
    let vfs = Arc::new(OverlayVfs::new(opener));
    let mut manager = MountManager::new(vfs.clone(), fixture.classifier());

    manager.mount(&project_pak).unwrap();
    manager.mount(&engine_pak).unwrap();

    assert_eq!(manager.priority_of(&project_pak), 4);
    assert_eq!(manager.priority_of(&engine_pak), 2);
    assert_eq!(vfs.read("/x").unwrap(), b"project");
    assert_eq!(manager.files_in("/"), vec!["/x".to_string()]);
}

/// Packs sharing a file stem in different directories both contribute records.
#[test]
fn test_same_stem_packs_in_different_directories() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("Game");
    let config = LoaderConfig::new(&project, "Game", temp.path().join("Engine"));
    let pack_a = config.paths.pack_root.join("a/region1.pak");
    let pack_b = config.paths.pack_root.join("b/region1.pak");
    for pack in [&pack_a, &pack_b] {
        fs::create_dir_all(pack.parent().unwrap()).unwrap();
        fs::write(pack, b"pak").unwrap();
    }

    let opener = Arc::new(
        MemoryArchiveOpener::new()
            .with_archive(
                MemoryArchive::new(&pack_a, "/Game/")
                    .with_entry("Maps/BP_A.uasset", descriptor("A")),
            )
            .with_archive(
                MemoryArchive::new(&pack_b, "/Game/")
                    .with_entry("Maps/BP_B.uasset", descriptor("B")),
            ),
    );
    let pack_root = config.paths.pack_root.clone();
    let loader =
        PakLayer::with_parts(config, Box::new(PackDiscovery::new(&pack_root, "pak")), opener, None)
            .unwrap();

    let mut names: Vec<String> = loader
        .get_all_metadata()
        .iter()
        .map(|record| record.level_name())
        .collect();
    names.sort();

    assert_eq!(loader.mounted_packs().len(), 2);
    assert_eq!(names, vec!["A", "B"]);
}

// ============================================================================
// Tarball packs
// ============================================================================

fn make_tarball(staging_root: &Path, archive: &Path, files: &[(&str, Vec<u8>)]) {
    let staging = staging_root.join(format!(
        "{}_staging",
        archive.file_name().unwrap().to_string_lossy()
    ));
    for (rel, contents) in files {
        let file = staging.join(rel);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, contents).unwrap();
    }

    fs::create_dir_all(archive.parent().unwrap()).unwrap();
    let status = Command::new("tar")
        .arg("-czf")
        .arg(archive)
        .arg("-C")
        .arg(&staging)
        .arg(".")
        .status()
        .unwrap();
    assert!(status.success());
}

fn descriptor(name: &str) -> Vec<u8> {
    let fields = MetadataFields::new(name, "", format!("/Game/Maps/{name}.{name}"));
    serde_json::to_vec(&AssetDescriptor::metadata("MapInfo", fields)).unwrap()
}

/// The default loader reads tarball packs and resolves metadata from their
/// asset descriptors.
#[test]
fn test_loader_over_tarball_packs() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("Game");
    let staging = temp.path().join("staging");

    make_tarball(
        &staging,
        &project.join("DLC/region1.pak"),
        &[("Maps/BP_Map1.uasset", descriptor("Harbor"))],
    );
    make_tarball(
        &staging,
        &project.join("DLC/nested/region2.pak"),
        &[
            ("Maps/BP_Map2.uasset", descriptor("Canyon")),
            ("Maps/BP_Door.uasset", serde_json::to_vec(&AssetDescriptor::other("Actor")).unwrap()),
            ("readme.txt", b"not an asset".to_vec()),
        ],
    );
    // Corrupt pack: skipped, the rest still load
    fs::write(project.join("DLC/broken.pak"), b"not a tarball").unwrap();

    let config = LoaderConfig::new(&project, "Game", temp.path().join("Engine"));
    let loader = PakLayer::start(config).unwrap();

    let mut names: Vec<String> = loader
        .get_all_metadata()
        .iter()
        .map(|record| record.level_name())
        .collect();
    names.sort();

    assert_eq!(names, vec!["Canyon", "Harbor"]);
    assert_eq!(loader.mounted_packs().len(), 2);
    assert_eq!(loader.read("/Game/readme.txt").unwrap(), b"not an asset");
}
