//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use paklayer::config::{config_file_path, LoaderConfig};

use crate::error::CliError;

/// The config file a command operates on: `--config` if given, the default
/// location otherwise.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Load and validate configuration.
///
/// An explicit `--config` file must exist; the default file falls back to
/// defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<LoaderConfig, CliError> {
    let config = match explicit {
        Some(path) => LoaderConfig::load_from(path)?,
        None => LoaderConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Human-readable name of a priority tier.
pub fn tier_label(tier: i32) -> &'static str {
    use paklayer::priority::*;

    match tier {
        TIER_PROJECT_PAKS => "project paks",
        TIER_PROJECT_CONTENT => "project content",
        TIER_ENGINE_CONTENT => "engine content",
        TIER_PROJECT_SAVED => "project saved",
        _ => "default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(temp.path().join("missing.ini").as_path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        LoaderConfig::new("/games/Harbor", "Harbor", "/engine")
            .save_to(&path)
            .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.paths.project_name, "Harbor");
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(tier_label(4), "project paks");
        assert_eq!(tier_label(0), "default");
        assert_eq!(tier_label(-3), "default");
    }
}
