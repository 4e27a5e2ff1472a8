//! Metadata entry naming convention.
//!
//! This module is the single source of truth for how metadata assets are
//! recognized inside a pack and how their runtime type reference is derived:
//!
//! - Candidate entries contain the marker (e.g. `BP_`) and end with the asset
//!   extension (e.g. `.uasset`).
//! - The type reference of an entry is
//!   `/{pack}/{stem}.{stem}{generated_suffix}`, e.g.
//!   `/region1/BP_Map1.BP_Map1_C`.
//!
//! Existing content packs depend on this exact shape, so none of these rules
//! should be relaxed.

use serde::{Deserialize, Serialize};

/// Default metadata marker substring.
pub const DEFAULT_MARKER: &str = "BP_";

/// Default serialized asset extension.
pub const DEFAULT_ASSET_EXTENSION: &str = ".uasset";

/// Default suffix appended to generated type names.
pub const DEFAULT_GENERATED_SUFFIX: &str = "_C";

/// Naming rules for metadata entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Substring every metadata entry name contains.
    pub marker: String,

    /// Extension every metadata entry name ends with, including the dot.
    pub asset_extension: String,

    /// Suffix of generated type names.
    pub generated_suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            asset_extension: DEFAULT_ASSET_EXTENSION.to_string(),
            generated_suffix: DEFAULT_GENERATED_SUFFIX.to_string(),
        }
    }
}

impl NamingConvention {
    /// Check whether an entry follows the metadata naming convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use paklayer::metadata::NamingConvention;
    ///
    /// let naming = NamingConvention::default();
    /// assert!(naming.is_metadata_entry("/Game/Maps/BP_Map1.uasset"));
    /// assert!(!naming.is_metadata_entry("/Game/Maps/Map1.uasset"));
    /// assert!(!naming.is_metadata_entry("/Game/BP_readme.txt"));
    /// ```
    pub fn is_metadata_entry(&self, entry: &str) -> bool {
        entry.contains(&self.marker) && entry.ends_with(&self.asset_extension)
    }

    /// Derive the type reference for an entry of the given pack.
    ///
    /// The entry's directories are dropped; the stem is the file name up to
    /// its first dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use paklayer::metadata::NamingConvention;
    ///
    /// let naming = NamingConvention::default();
    /// assert_eq!(
    ///     naming.type_reference("region1", "/Game/Maps/BP_Map1.uasset"),
    ///     "/region1/BP_Map1.BP_Map1_C"
    /// );
    /// ```
    pub fn type_reference(&self, pack_short_name: &str, entry: &str) -> String {
        let stem = entry_stem(entry);
        format!(
            "/{}/{}.{}{}",
            pack_short_name, stem, stem, self.generated_suffix
        )
    }

    /// Split a type reference back into `(pack short name, stem)`.
    ///
    /// Returns `None` for references that weren't produced by
    /// [`type_reference`](Self::type_reference) under this convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use paklayer::metadata::NamingConvention;
    ///
    /// let naming = NamingConvention::default();
    /// assert_eq!(
    ///     naming.parse_type_reference("/region1/BP_Map1.BP_Map1_C"),
    ///     Some(("region1", "BP_Map1"))
    /// );
    /// assert_eq!(naming.parse_type_reference("/region1/BP_Map1.Other_C"), None);
    /// ```
    pub fn parse_type_reference<'a>(&self, reference: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = reference.strip_prefix('/')?;
        let (pack, object) = rest.split_once('/')?;
        let (stem, class) = object.split_once('.')?;
        if pack.is_empty() || stem.is_empty() || self.class_name(class) != Some(stem) {
            return None;
        }
        Some((pack, stem))
    }

    /// Trim the generated suffix off a generated type name.
    ///
    /// Returns `None` if the name doesn't carry the suffix.
    ///
    /// ```
    /// use paklayer::metadata::NamingConvention;
    ///
    /// let naming = NamingConvention::default();
    /// assert_eq!(naming.class_name("BP_Map1_C"), Some("BP_Map1"));
    /// assert_eq!(naming.class_name("BP_Map1"), None);
    /// ```
    pub fn class_name<'a>(&self, generated: &'a str) -> Option<&'a str> {
        generated
            .strip_suffix(&self.generated_suffix)
            .filter(|name| !name.is_empty())
    }

    /// File name of an asset with the given stem.
    pub fn asset_file_name(&self, stem: &str) -> String {
        format!("{}{}", stem, self.asset_extension)
    }
}

/// File name of an entry up to its first dot.
pub fn entry_stem(entry: &str) -> &str {
    let file_name = entry.rsplit(['/', '\\']).next().unwrap_or(entry);
    file_name.split('.').next().unwrap_or(file_name)
}
