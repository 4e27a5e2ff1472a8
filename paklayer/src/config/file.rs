//! INI persistence for [`LoaderConfig`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::{normalize_extension, LoaderConfig};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or parsed.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// The config file could not be written.
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value is present but unusable.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// `~/.paklayer`, or `./.paklayer` when no home directory is known.
pub fn paklayer_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".paklayer")
}

/// Default config file location.
pub fn config_file_path() -> PathBuf {
    paklayer_dir().join("config.ini")
}

pub(super) fn load(path: &Path) -> ConfigResult<LoaderConfig> {
    let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = LoaderConfig::default();
    let get = |section: &str, key: &str| -> Option<String> {
        ini.section(Some(section))
            .and_then(|s| s.get(key))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(v) = get("paths", "project_dir") {
        let project_dir = PathBuf::from(v);
        // Pack root follows the project unless set explicitly below
        config.paths.pack_root = project_dir.join(super::DEFAULT_PACK_DIR);
        config.paths.engine_dir = project_dir.join("Engine");
        config.paths.project_dir = project_dir;
    }
    if let Some(v) = get("paths", "project_name") {
        config.paths.project_name = v;
    }
    if let Some(v) = get("paths", "engine_dir") {
        config.paths.engine_dir = PathBuf::from(v);
    }
    if let Some(v) = get("paths", "pack_root") {
        config.paths.pack_root = PathBuf::from(v);
    }

    if let Some(v) = get("naming", "marker") {
        config.naming.marker = v;
    }
    if let Some(v) = get("naming", "asset_extension") {
        config.naming.asset_extension = v;
    }
    if let Some(v) = get("naming", "generated_suffix") {
        config.naming.generated_suffix = v;
    }

    if let Some(v) = get("archive", "extension") {
        config.archive.extension = normalize_extension(&v);
    }
    if let Some(v) = get("archive", "mount_point") {
        config.archive.mount_point = v;
    }

    if let Some(v) = get("logging", "directory") {
        config.logging.directory = PathBuf::from(v);
    }
    if let Some(v) = get("logging", "file_name") {
        config.logging.file_name = v;
    }
    if let Some(v) = get("logging", "filter") {
        config.logging.filter = v;
    }

    config.validate()?;
    Ok(config)
}

pub(super) fn save(config: &LoaderConfig, path: &Path) -> ConfigResult<()> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut ini = Ini::new();
    ini.with_section(Some("paths"))
        .set("project_dir", config.paths.project_dir.to_string_lossy())
        .set("project_name", config.paths.project_name.as_str())
        .set("engine_dir", config.paths.engine_dir.to_string_lossy())
        .set("pack_root", config.paths.pack_root.to_string_lossy());
    ini.with_section(Some("naming"))
        .set("marker", config.naming.marker.as_str())
        .set("asset_extension", config.naming.asset_extension.as_str())
        .set("generated_suffix", config.naming.generated_suffix.as_str());
    ini.with_section(Some("archive"))
        .set("extension", config.archive.extension.as_str())
        .set("mount_point", config.archive.mount_point.as_str());
    ini.with_section(Some("logging"))
        .set("directory", config.logging.directory.to_string_lossy())
        .set("file_name", config.logging.file_name.as_str())
        .set("filter", config.logging.filter.as_str());

    ini.write_to_file(path).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = LoaderConfig::new("/games/Shooter", "Shooter", "/opt/engine")
            .with_pack_root("/mnt/packs")
            .with_archive_extension("PAK");
        config.naming.marker = "DA_".to_string();
        config.logging.filter = "paklayer=debug".to_string();

        config.save_to(&path).unwrap();
        let loaded = LoaderConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(
            &path,
            "[paths]\nproject_dir = /games/Shooter\nproject_name = Shooter\n",
        )
        .unwrap();

        let config = LoaderConfig::load_from(&path).unwrap();

        assert_eq!(config.paths.pack_root, PathBuf::from("/games/Shooter/DLC"));
        assert_eq!(config.paths.engine_dir, PathBuf::from("/games/Shooter/Engine"));
        assert_eq!(config.archive.extension, "pak");
        assert_eq!(config.naming.marker, "BP_");
        assert_eq!(config.naming.generated_suffix, "_C");
    }

    #[test]
    fn test_extension_dot_is_stripped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[archive]\nextension = .pak\n").unwrap();

        let config = LoaderConfig::load_from(&path).unwrap();
        assert_eq!(config.archive.extension, "pak");
    }

    #[test]
    fn test_invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[naming]\nasset_extension = uasset\n").unwrap();

        let result = LoaderConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unreadable_file() {
        let result = LoaderConfig::load_from(Path::new("/nonexistent/config.ini"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_file_path_under_paklayer_dir() {
        let path = config_file_path();
        assert!(path.ends_with(".paklayer/config.ini"));
    }
}
