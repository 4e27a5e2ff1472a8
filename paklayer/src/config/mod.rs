//! Loader configuration.
//!
//! [`LoaderConfig`] gathers everything the pipeline needs to know about the
//! host layout: where the project and engine live, where packs are dropped,
//! which archive extension to look for, the metadata naming convention and
//! logging destinations.
//!
//! Configuration is persisted as INI at `~/.paklayer/config.ini`:
//!
//! ```ini
//! [paths]
//! project_dir = /games/Shooter
//! project_name = Shooter
//! engine_dir = /opt/engine
//! pack_root = /games/Shooter/DLC
//!
//! [naming]
//! marker = BP_
//! asset_extension = .uasset
//! generated_suffix = _C
//!
//! [archive]
//! extension = pak
//! mount_point = /Game/
//!
//! [logging]
//! directory = /home/user/.paklayer/logs
//! file_name = paklayer.log
//! filter = info
//! ```
//!
//! Missing keys fall back to defaults, so an empty file is a valid config.

mod file;

pub use file::{config_file_path, paklayer_dir, ConfigError, ConfigResult};

use std::path::{Path, PathBuf};

use crate::metadata::NamingConvention;

/// Default pack root folder name under the project directory.
pub const DEFAULT_PACK_DIR: &str = "DLC";

/// Default archive extension (without the leading dot).
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "pak";

/// Default mount point for archives that don't declare their own.
pub const DEFAULT_MOUNT_POINT: &str = "/Game/";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "paklayer.log";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Complete loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Project and engine layout.
    pub paths: PathsConfig,

    /// Metadata entry naming convention.
    pub naming: NamingConvention,

    /// Archive discovery settings.
    pub archive: ArchiveConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

impl LoaderConfig {
    /// Create a config for a project rooted at `project_dir`.
    pub fn new(
        project_dir: impl Into<PathBuf>,
        project_name: impl Into<String>,
        engine_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            paths: PathsConfig::new(project_dir, project_name, engine_dir),
            naming: NamingConvention::default(),
            archive: ArchiveConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Set the pack root directory.
    pub fn with_pack_root(mut self, pack_root: impl Into<PathBuf>) -> Self {
        self.paths.pack_root = pack_root.into();
        self
    }

    /// Set the archive extension.
    pub fn with_archive_extension(mut self, extension: &str) -> Self {
        self.archive.extension = normalize_extension(extension);
        self
    }

    /// Set the naming convention.
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist yet.
    pub fn load() -> ConfigResult<Self> {
        let path = config_file_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an INI file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        file::load(path)
    }

    /// Save configuration to an INI file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        file::save(self, path)
    }

    /// Check that values are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.paths.project_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "paths.project_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.archive.extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "archive.extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.naming.marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "naming.marker".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.naming.generated_suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "naming.generated_suffix".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !self.naming.asset_extension.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                key: "naming.asset_extension".to_string(),
                reason: format!(
                    "'{}' must start with a dot",
                    self.naming.asset_extension
                ),
            });
        }
        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let engine_dir = project_dir.join("Engine");
        let project_name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Project".to_string());
        Self::new(project_dir, project_name, engine_dir)
    }
}

/// Project and engine directory layout.
///
/// The content and saved directories used for priority classification are
/// derived from `project_dir` and `engine_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Project root directory.
    pub project_dir: PathBuf,

    /// Project name, used for the `Paks/<name>-` tier.
    pub project_name: String,

    /// Engine root directory.
    pub engine_dir: PathBuf,

    /// Directory scanned for packs.
    pub pack_root: PathBuf,
}

impl PathsConfig {
    /// Create a layout with the pack root at `<project_dir>/DLC`.
    pub fn new(
        project_dir: impl Into<PathBuf>,
        project_name: impl Into<String>,
        engine_dir: impl Into<PathBuf>,
    ) -> Self {
        let project_dir = project_dir.into();
        Self {
            pack_root: project_dir.join(DEFAULT_PACK_DIR),
            project_dir,
            project_name: project_name.into(),
            engine_dir: engine_dir.into(),
        }
    }

    /// `<project_dir>/Content`.
    pub fn project_content_dir(&self) -> PathBuf {
        self.project_dir.join("Content")
    }

    /// `<engine_dir>/Content`.
    pub fn engine_content_dir(&self) -> PathBuf {
        self.engine_dir.join("Content")
    }

    /// `<project_dir>/Saved`.
    pub fn project_saved_dir(&self) -> PathBuf {
        self.project_dir.join("Saved")
    }
}

/// Archive discovery and mounting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// File extension of packs, without the leading dot. Matched
    /// case-insensitively.
    pub extension: String,

    /// Mount point used by archive codecs that don't carry one.
    pub mount_point: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory the log file is written to.
    pub directory: PathBuf,

    /// Log file name.
    pub file_name: String,

    /// Default filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: paklayer_dir().join("logs"),
            file_name: DEFAULT_LOG_FILE.to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub(crate) fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}
