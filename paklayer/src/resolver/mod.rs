//! Type reference resolution.
//!
//! Metadata entries are identified by a generated type reference such as
//! `/region1/BP_Map1.BP_Map1_C`. A [`TypeResolver`] turns that reference into
//! a loaded value. Anything other than a metadata value is reported as
//! [`ResolvedValue::Other`] and skipped by the extractor.

mod error;
mod overlay;
mod registry;

pub use error::ResolveError;
pub use overlay::{AssetDescriptor, OverlayResolver};
pub use registry::RegistryResolver;

use crate::metadata::MetadataFields;

/// A value a type reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// A value with the metadata schema.
    Metadata(MetadataFields),

    /// Some other type.
    Other {
        /// Name of the type that was found.
        type_name: String,
    },
}

impl ResolvedValue {
    /// The metadata fields, if this value has the metadata schema.
    pub fn into_metadata(self) -> Option<MetadataFields> {
        match self {
            ResolvedValue::Metadata(fields) => Some(fields),
            ResolvedValue::Other { .. } => None,
        }
    }
}

/// Resolves generated type references to values.
pub trait TypeResolver: Send + Sync {
    /// Load the value a reference names.
    fn resolve(&self, reference: &str) -> Result<ResolvedValue, ResolveError>;
}
