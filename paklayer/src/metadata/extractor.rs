//! Metadata extraction from a single pack.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{MetadataRecord, NamingConvention};
use crate::archive::{Archive, ArchiveResult};
use crate::resolver::{ResolvedValue, TypeResolver};

/// Finds metadata entries in a pack and resolves them to records.
///
/// Entries that fail to resolve, or resolve to something without the
/// metadata schema, are skipped individually; the rest of the pack is still
/// extracted.
pub struct MetadataExtractor {
    naming: NamingConvention,
    resolver: Arc<dyn TypeResolver>,
}

impl MetadataExtractor {
    /// Create an extractor.
    pub fn new(naming: NamingConvention, resolver: Arc<dyn TypeResolver>) -> Self {
        Self { naming, resolver }
    }

    /// The naming convention in use.
    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// Extract every metadata record in `archive`.
    ///
    /// Fails only if the archive's listing can't be read.
    pub fn extract(&self, archive: &dyn Archive) -> ArchiveResult<Vec<MetadataRecord>> {
        let pack = archive.path();
        let short_name = archive.short_name();
        let entries = archive.list_entries(archive.mount_point())?;

        let mut records = Vec::new();
        for entry in entries
            .iter()
            .filter(|entry| self.naming.is_metadata_entry(entry))
        {
            let reference = self.naming.type_reference(&short_name, entry);

            match self.resolver.resolve(&reference) {
                Ok(ResolvedValue::Metadata(fields)) => {
                    debug!(pack = %pack.display(), reference = %reference, "Metadata resolved");
                    records.push(MetadataRecord::from_fields(&fields, pack));
                }
                Ok(ResolvedValue::Other { type_name }) => {
                    debug!(
                        pack = %pack.display(),
                        reference = %reference,
                        type_name = %type_name,
                        "Entry is not metadata, skipping"
                    );
                }
                Err(e) => {
                    warn!(
                        pack = %pack.display(),
                        reference = %reference,
                        error = %e,
                        "Failed to resolve metadata entry"
                    );
                }
            }
        }

        debug!(
            pack = %pack.display(),
            entries = entries.len(),
            records = records.len(),
            "Pack extraction complete"
        );
        Ok(records)
    }
}

impl std::fmt::Debug for MetadataExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataExtractor")
            .field("naming", &self.naming)
            .finish()
    }
}
