//! Content metadata.
//!
//! Packs describe the optional content they ship through metadata assets,
//! recognized by [`NamingConvention`]. The [`MetadataExtractor`] turns those
//! assets into [`MetadataRecord`]s for one pack, and the
//! [`MetadataRegistry`] caches the records of every mounted pack.

mod extractor;
mod naming;
mod record;
mod registry;

pub use extractor::MetadataExtractor;
pub use naming::{
    entry_stem, NamingConvention, DEFAULT_ASSET_EXTENSION, DEFAULT_GENERATED_SUFFIX,
    DEFAULT_MARKER,
};
pub use record::{ContentReference, LocalizedText, MetadataFields, MetadataRecord};
pub use registry::MetadataRegistry;
