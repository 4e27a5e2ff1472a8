//! Metadata record types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Localizable display text.
///
/// Carries the source string plus the optional localization namespace and
/// key. Deserializes from either a bare string or an object:
///
/// ```
/// use paklayer::metadata::LocalizedText;
///
/// let plain: LocalizedText = serde_json::from_str(r#""Harbor""#).unwrap();
/// let keyed: LocalizedText =
///     serde_json::from_str(r#"{"namespace":"Maps","key":"harbor","source":"Harbor"}"#).unwrap();
///
/// assert_eq!(plain.as_str(), "Harbor");
/// assert_eq!(keyed.key.as_deref(), Some("harbor"));
/// assert_eq!(plain.to_string(), keyed.to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextRepr")]
pub struct LocalizedText {
    /// Localization namespace.
    pub namespace: Option<String>,

    /// Localization key within the namespace.
    pub key: Option<String>,

    /// Source (untranslated) string.
    pub source: String,
}

impl LocalizedText {
    /// Text with no localization key.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            namespace: None,
            key: None,
            source: source.into(),
        }
    }

    /// The source string.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for LocalizedText {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Keyed {
        #[serde(default)]
        namespace: Option<String>,
        #[serde(default)]
        key: Option<String>,
        source: String,
    },
}

impl From<TextRepr> for LocalizedText {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Plain(source) => Self::new(source),
            TextRepr::Keyed {
                namespace,
                key,
                source,
            } => Self {
                namespace,
                key,
                source,
            },
        }
    }
}

/// Soft reference to the content a record describes.
///
/// The primary asset path is kept as written. When the primary asset label it
/// points to lists explicit assets, the first one is the resolved reference;
/// otherwise a reference is derived from the path itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentReference {
    /// Object path of the primary asset (e.g. `/Game/Maps/Harbor.Harbor`).
    pub asset_path: String,

    /// Explicit assets listed by the primary asset label, if it resolved.
    #[serde(default)]
    pub label_assets: Vec<String>,
}

impl ContentReference {
    /// Reference with an unresolved label.
    pub fn new(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            label_assets: Vec::new(),
        }
    }

    /// Attach the primary asset label's explicit assets.
    pub fn with_label_assets(mut self, assets: Vec<String>) -> Self {
        self.label_assets = assets;
        self
    }

    /// Long package name of the label's first explicit asset.
    pub fn primary_reference(&self) -> Option<&str> {
        self.label_assets.first().map(|asset| long_package_name(asset))
    }

    /// Reference derived from the asset path: everything after its first dot,
    /// or the whole path if there is none.
    pub fn derived_reference(&self) -> &str {
        match self.asset_path.find('.') {
            Some(dot) => &self.asset_path[dot + 1..],
            None => &self.asset_path,
        }
    }

    /// The level to load: the resolved primary reference when available,
    /// the derived path otherwise.
    ///
    /// ```
    /// use paklayer::metadata::ContentReference;
    ///
    /// let derived = ContentReference::new("/Game/Maps/Harbor.Harbor");
    /// assert_eq!(derived.level_reference(), "Harbor");
    ///
    /// let labeled = derived.with_label_assets(vec!["/Game/Maps/Harbor_P.Harbor_P".into()]);
    /// assert_eq!(labeled.level_reference(), "/Game/Maps/Harbor_P");
    /// ```
    pub fn level_reference(&self) -> &str {
        self.primary_reference()
            .unwrap_or_else(|| self.derived_reference())
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level_reference())
    }
}

/// Object path without its object name (`/Game/A.A` → `/Game/A`).
fn long_package_name(object_path: &str) -> &str {
    object_path
        .split_once('.')
        .map(|(package, _)| package)
        .unwrap_or(object_path)
}

/// Metadata payload as it appears in a serialized asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFields {
    /// Display name.
    pub name: LocalizedText,

    /// Description.
    #[serde(default)]
    pub description: LocalizedText,

    /// Primary asset path.
    #[serde(default)]
    pub primary_asset_path: String,

    /// Explicit assets of the primary asset label.
    #[serde(default)]
    pub primary_asset_label: Vec<String>,
}

impl MetadataFields {
    /// Fields with a name, description and primary asset path.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        primary_asset_path: impl Into<String>,
    ) -> Self {
        Self {
            name: LocalizedText::new(name),
            description: LocalizedText::new(description),
            primary_asset_path: primary_asset_path.into(),
            primary_asset_label: Vec::new(),
        }
    }
}

/// One unit of optional content described by a pack.
///
/// Records are immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    name: LocalizedText,
    description: LocalizedText,
    content: ContentReference,
    source: PathBuf,
}

impl MetadataRecord {
    /// Copy a record out of resolved fields.
    pub fn from_fields(fields: &MetadataFields, source: impl Into<PathBuf>) -> Self {
        Self {
            name: fields.name.clone(),
            description: fields.description.clone(),
            content: ContentReference::new(fields.primary_asset_path.clone())
                .with_label_assets(fields.primary_asset_label.clone()),
            source: source.into(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &LocalizedText {
        &self.name
    }

    /// Description.
    pub fn description(&self) -> &LocalizedText {
        &self.description
    }

    /// Content reference.
    pub fn content(&self) -> &ContentReference {
        &self.content
    }

    /// Path of the pack the record was extracted from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Display name as a plain string.
    pub fn level_name(&self) -> String {
        self.name.to_string()
    }

    /// Description text.
    pub fn level_description(&self) -> &LocalizedText {
        &self.description
    }

    /// Level to load for this record.
    pub fn level_reference(&self) -> &str {
        self.content.level_reference()
    }
}
