//! Mount priority classification.
//!
//! Every pack gets an integer tier derived purely from where it lives on disk.
//! Higher tiers are mounted with higher priority and shadow lower tiers when
//! two packs expose the same virtual path.
//!
//! # Tier Rules
//!
//! Rules are checked in order and the first match wins:
//!
//! | Tier | Path prefix                                  |
//! |------|----------------------------------------------|
//! | 4    | `<project content>/Paks/<project name>-`     |
//! | 3    | `<project content>`                          |
//! | 2    | `<engine content>`                           |
//! | 1    | `<project saved>`                            |
//! | 0    | anything else                                |
//!
//! Tier 4 is a strict refinement of tier 3, so it must be tested first.

use std::path::Path;

use crate::config::PathsConfig;

/// Priority for packs inside the project's own `Paks/` folder with the
/// project name prefix.
pub const TIER_PROJECT_PAKS: i32 = 4;

/// Priority for packs anywhere else under the project content directory.
pub const TIER_PROJECT_CONTENT: i32 = 3;

/// Priority for packs under the engine content directory.
pub const TIER_ENGINE_CONTENT: i32 = 2;

/// Priority for packs under the project's saved directory.
pub const TIER_PROJECT_SAVED: i32 = 1;

/// Priority for packs that match no rule.
pub const TIER_DEFAULT: i32 = 0;

/// Maps pack paths to mount priority tiers.
///
/// The classifier holds normalized directory prefixes and never touches the
/// filesystem, so `classify` is a pure function of its input.
///
/// # Example
///
/// ```
/// use paklayer::priority::PriorityClassifier;
///
/// let classifier = PriorityClassifier::new(
///     "/games/Shooter/Content",
///     "Shooter",
///     "/engine/Content",
///     "/games/Shooter/Saved",
/// );
///
/// assert_eq!(classifier.classify("/games/Shooter/Content/Paks/Shooter-dlc1.pak"), 4);
/// assert_eq!(classifier.classify("/games/Shooter/Content/DLC/extra.pak"), 3);
/// assert_eq!(classifier.classify("/engine/Content/base.pak"), 2);
/// assert_eq!(classifier.classify("/games/Shooter/Saved/mods/m.pak"), 1);
/// assert_eq!(classifier.classify("/tmp/elsewhere.pak"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityClassifier {
    project_paks_prefix: String,
    project_content_dir: String,
    engine_content_dir: String,
    project_saved_dir: String,
}

impl PriorityClassifier {
    /// Create a classifier from the directory layout.
    ///
    /// Directories are normalized to forward slashes with a trailing `/`, so
    /// `/game/Content` never matches `/game/ContentExtra/x.pak`.
    pub fn new(
        project_content_dir: impl AsRef<Path>,
        project_name: &str,
        engine_content_dir: impl AsRef<Path>,
        project_saved_dir: impl AsRef<Path>,
    ) -> Self {
        let project_content_dir = normalize_dir(project_content_dir.as_ref());
        Self {
            project_paks_prefix: format!("{}Paks/{}-", project_content_dir, project_name),
            project_content_dir,
            engine_content_dir: normalize_dir(engine_content_dir.as_ref()),
            project_saved_dir: normalize_dir(project_saved_dir.as_ref()),
        }
    }

    /// Build a classifier from the configured project and engine layout.
    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(
            paths.project_content_dir(),
            &paths.project_name,
            paths.engine_content_dir(),
            paths.project_saved_dir(),
        )
    }

    /// Classify a pack path into its priority tier.
    pub fn classify(&self, path: impl AsRef<Path>) -> i32 {
        let path = normalize_path(path.as_ref());

        if path.starts_with(&self.project_paks_prefix) {
            TIER_PROJECT_PAKS
        } else if path.starts_with(&self.project_content_dir) {
            TIER_PROJECT_CONTENT
        } else if path.starts_with(&self.engine_content_dir) {
            TIER_ENGINE_CONTENT
        } else if path.starts_with(&self.project_saved_dir) {
            TIER_PROJECT_SAVED
        } else {
            TIER_DEFAULT
        }
    }
}

/// Render a path with forward slashes only.
pub(crate) fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn normalize_dir(path: &Path) -> String {
    let mut dir = normalize_path(path);
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}
