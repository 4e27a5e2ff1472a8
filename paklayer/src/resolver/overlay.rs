//! Resolution through the mounted overlay.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ResolveError, ResolvedValue, TypeResolver};
use crate::metadata::{MetadataFields, NamingConvention};
use crate::vfs::OverlayVfs;

/// Serialized form of an asset, as stored in a pack entry.
///
/// ```json
/// {
///   "class": "MapInfo",
///   "map_info": {
///     "name": "Harbor",
///     "description": "A harbor",
///     "primary_asset_path": "/Game/Maps/Harbor.Harbor"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Name of the asset's type.
    pub class: String,

    /// Metadata payload, present when the asset carries the metadata schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_info: Option<MetadataFields>,
}

impl AssetDescriptor {
    /// Descriptor of a metadata asset.
    pub fn metadata(class: impl Into<String>, fields: MetadataFields) -> Self {
        Self {
            class: class.into(),
            map_info: Some(fields),
        }
    }

    /// Descriptor of an asset without metadata.
    pub fn other(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            map_info: None,
        }
    }
}

/// Resolves references against the assets of mounted packs.
///
/// A reference `/<pack>/<stem>.<stem><suffix>` names the asset
/// `<stem><asset extension>` inside a pack registered under the content
/// root `<pack>`. Packs sharing that root are searched highest ranked first.
/// The asset is read through the overlay, so a higher-priority
/// pack shipping the same virtual path supplies the bytes.
pub struct OverlayResolver {
    vfs: Arc<OverlayVfs>,
    naming: NamingConvention,
}

impl OverlayResolver {
    /// Create a resolver over `vfs`.
    pub fn new(vfs: Arc<OverlayVfs>, naming: NamingConvention) -> Self {
        Self { vfs, naming }
    }

    fn locate(&self, reference: &str) -> Result<String, ResolveError> {
        let (pack_name, stem) = self
            .naming
            .parse_type_reference(reference)
            .ok_or_else(|| ResolveError::InvalidReference(reference.to_string()))?;

        let file_name = self.naming.asset_file_name(stem);
        self.vfs
            .content_roots(pack_name)
            .iter()
            .find_map(|pack| {
                self.vfs
                    .pack_entries(pack)
                    .into_iter()
                    .find(|entry| entry.rsplit('/').next() == Some(file_name.as_str()))
            })
            .ok_or_else(|| ResolveError::NotFound(reference.to_string()))
    }
}

impl TypeResolver for OverlayResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedValue, ResolveError> {
        let entry = self.locate(reference)?;
        debug!(reference, entry = %entry, "Reading asset");

        let bytes = self.vfs.read(&entry).map_err(|e| ResolveError::Unreadable {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;

        let descriptor: AssetDescriptor =
            serde_json::from_slice(&bytes).map_err(|e| ResolveError::SchemaMismatch {
                reference: reference.to_string(),
                reason: e.to_string(),
            })?;

        Ok(match descriptor.map_info {
            Some(fields) => ResolvedValue::Metadata(fields),
            None => ResolvedValue::Other {
                type_name: descriptor.class,
            },
        })
    }
}

impl std::fmt::Debug for OverlayResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayResolver")
            .field("naming", &self.naming)
            .finish()
    }
}
