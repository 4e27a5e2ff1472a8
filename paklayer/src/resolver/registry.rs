//! Runtime registry of resolvable types.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{ResolveError, ResolvedValue, TypeResolver};
use crate::metadata::MetadataFields;

/// Resolver backed by a map from reference strings to values.
///
/// # Example
///
/// ```
/// use paklayer::metadata::MetadataFields;
/// use paklayer::resolver::{RegistryResolver, ResolvedValue, TypeResolver};
///
/// let resolver = RegistryResolver::new().with_metadata(
///     "/region1/BP_Map1.BP_Map1_C",
///     MetadataFields::new("Harbor", "A harbor", "/Game/Maps/Harbor.Harbor"),
/// );
///
/// assert!(matches!(
///     resolver.resolve("/region1/BP_Map1.BP_Map1_C"),
///     Ok(ResolvedValue::Metadata(_))
/// ));
/// assert!(resolver.resolve("/region1/BP_Other.BP_Other_C").is_err());
/// ```
#[derive(Debug, Default)]
pub struct RegistryResolver {
    types: RwLock<HashMap<String, ResolvedValue>>,
}

impl RegistryResolver {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value under a reference, replacing any previous one.
    pub fn insert(&self, reference: impl Into<String>, value: ResolvedValue) {
        self.types.write().insert(reference.into(), value);
    }

    /// Register a metadata value (builder form).
    pub fn with_metadata(self, reference: impl Into<String>, fields: MetadataFields) -> Self {
        self.insert(reference, ResolvedValue::Metadata(fields));
        self
    }

    /// Register a value of some other type (builder form).
    pub fn with_other(self, reference: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.insert(
            reference,
            ResolvedValue::Other {
                type_name: type_name.into(),
            },
        );
        self
    }

    /// Remove a reference.
    pub fn remove(&self, reference: &str) -> Option<ResolvedValue> {
        self.types.write().remove(reference)
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl TypeResolver for RegistryResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedValue, ResolveError> {
        self.types
            .read()
            .get(reference)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(reference.to_string()))
    }
}
