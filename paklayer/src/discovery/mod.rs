//! Pack file discovery.
//!
//! Finds pack archives under the pack root. The root is created when
//! missing so that content can be dropped in later; a freshly created root
//! yields no packs.

use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::config::normalize_extension;

/// Source of pack files to mount.
pub trait PackSource: Send + Sync {
    /// Absolute paths of every pack currently available.
    fn discover(&self) -> io::Result<Vec<PathBuf>>;
}

/// Recursive filesystem search for pack archives.
#[derive(Debug, Clone)]
pub struct PackDiscovery {
    root: PathBuf,
    extension: String,
}

impl PackDiscovery {
    /// Search `root` for files ending in `.extension`.
    ///
    /// The extension may be given with or without its leading dot and is
    /// matched case-insensitively.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: normalize_extension(extension),
        }
    }

    /// The directory searched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The extension matched, without a leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn pattern(&self, root: &Path) -> String {
        let escaped = Pattern::escape(&root.to_string_lossy());
        format!(
            "{}/**/*.{}",
            escaped.trim_end_matches('/'),
            Pattern::escape(&self.extension)
        )
    }
}

impl PackSource for PackDiscovery {
    fn discover(&self) -> io::Result<Vec<PathBuf>> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
            info!(root = %self.root.display(), "Created pack directory");
            return Ok(Vec::new());
        }

        let root = std::path::absolute(&self.root)?;
        let pattern = self.pattern(&root);
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let paths = glob::glob_with(&pattern, options)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut packs = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => packs.push(path),
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %e.path().display(), error = %e.error(), "Skipping unreadable path");
                }
            }
        }
        packs.sort();

        debug!(root = %root.display(), count = packs.len(), "Pack discovery complete");
        Ok(packs)
    }
}
