//! Application facade.
//!
//! [`PakLayer`] wires the loader together from a [`LoaderConfig`] and exposes
//! it behind a single lock so it can be shared between threads:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                         PakLayer                          │
//! │                                                           │
//! │  Mutex<MetadataRegistry>                                  │
//! │    ├── PackDiscovery ─────────▶ pack root                 │
//! │    ├── MountManager ──────────▶ OverlayVfs ◀──┐           │
//! │    │     └── PriorityClassifier               │           │
//! │    └── MetadataExtractor ─────▶ TypeResolver ─┘           │
//! │                                  (OverlayResolver)        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use paklayer::app::PakLayer;
//! use paklayer::config::LoaderConfig;
//!
//! let config = LoaderConfig::new("/games/Harbor", "Harbor", "/engines/5.3/Engine");
//! let loader = PakLayer::start(config)?;
//!
//! for record in loader.get_all_metadata() {
//!     println!("{} -> {}", record.level_name(), record.level_reference());
//! }
//! # Ok::<(), paklayer::app::AppError>(())
//! ```

mod error;

pub use error::AppError;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::archive::{ArchiveOpener, TarArchiveOpener};
use crate::config::LoaderConfig;
use crate::discovery::{PackDiscovery, PackSource};
use crate::metadata::{MetadataExtractor, MetadataRecord, MetadataRegistry};
use crate::mount::{MountManager, MountResult, MountState};
use crate::priority::PriorityClassifier;
use crate::resolver::{OverlayResolver, TypeResolver};
use crate::vfs::{FileSource, OverlayVfs, VfsResult};

/// The loader, assembled and ready to use.
pub struct PakLayer {
    config: LoaderConfig,
    vfs: Arc<OverlayVfs>,
    registry: Mutex<MetadataRegistry>,
}

impl PakLayer {
    /// Build a loader reading gzip-tar packs from the configured pack root.
    pub fn start(config: LoaderConfig) -> Result<Self, AppError> {
        let opener = Arc::new(TarArchiveOpener::new(&config.archive.mount_point));
        let source = PackDiscovery::new(&config.paths.pack_root, &config.archive.extension);
        Self::with_parts(config, Box::new(source), opener, None)
    }

    /// Build a loader from explicit capabilities.
    ///
    /// Without a `resolver`, references resolve against the assets of the
    /// mounted packs.
    pub fn with_parts(
        config: LoaderConfig,
        source: Box<dyn PackSource>,
        opener: Arc<dyn ArchiveOpener>,
        resolver: Option<Arc<dyn TypeResolver>>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let vfs = Arc::new(OverlayVfs::new(opener.clone()));
        let resolver: Arc<dyn TypeResolver> = match resolver {
            Some(resolver) => resolver,
            None => Arc::new(OverlayResolver::new(vfs.clone(), config.naming.clone())),
        };

        let classifier = PriorityClassifier::from_config(&config.paths);
        let manager = MountManager::new(vfs.clone(), classifier);
        let extractor = MetadataExtractor::new(config.naming.clone(), resolver);
        let registry = MetadataRegistry::new(source, manager, opener, extractor);

        info!(
            project = %config.paths.project_name,
            pack_root = %config.paths.pack_root.display(),
            "Loader ready"
        );

        Ok(Self {
            config,
            vfs,
            registry: Mutex::new(registry),
        })
    }

    /// Every metadata record, extracting on first use.
    pub fn get_all_metadata(&self) -> Vec<MetadataRecord> {
        self.registry.lock().get_all().to_vec()
    }

    /// Drop cached metadata; the next query extracts again.
    pub fn clear_metadata_cache(&self) {
        self.registry.lock().clear();
    }

    /// Mount a pack. See [`MountManager::mount`].
    pub fn mount(&self, path: &Path) -> MountResult<bool> {
        self.registry.lock().manager_mut().mount(path)
    }

    /// Unmount a pack. See [`MountManager::unmount`].
    pub fn unmount(&self, path: &Path) -> MountResult<bool> {
        self.registry.lock().manager_mut().unmount(path)
    }

    /// Discover packs and mount the new ones, returning how many were mounted.
    pub fn mount_discovered(&self) -> Result<usize, AppError> {
        Ok(self.registry.lock().mount_discovered()?)
    }

    /// Mounted pack paths in mount order.
    pub fn mounted_packs(&self) -> Vec<PathBuf> {
        self.registry.lock().manager().list_mounted()
    }

    /// Mount state of a pack.
    pub fn mount_state(&self, path: &Path) -> MountState {
        self.registry.lock().manager().mount_state(path)
    }

    /// Files directly inside a virtual directory.
    pub fn files_in(&self, directory: &str) -> Vec<String> {
        self.registry.lock().manager().files_in(directory)
    }

    /// Pack currently serving a virtual path.
    pub fn resolve_path(&self, virtual_path: &str) -> Option<FileSource> {
        self.vfs.resolve(virtual_path)
    }

    /// Read a virtual path through the overlay.
    pub fn read(&self, virtual_path: &str) -> VfsResult<Vec<u8>> {
        self.vfs.read(virtual_path)
    }

    /// The configuration the loader was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl std::fmt::Debug for PakLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PakLayer")
            .field("config", &self.config)
            .field("vfs", &self.vfs)
            .finish_non_exhaustive()
    }
}
