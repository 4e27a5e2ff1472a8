//! Resolution errors.

use thiserror::Error;

/// Why a reference did not resolve to a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing is registered under the reference.
    #[error("type not found: {0}")]
    NotFound(String),

    /// The reference is not of the form `/<pack>/<stem>.<stem><suffix>`.
    #[error("invalid type reference: {0}")]
    InvalidReference(String),

    /// The backing asset exists but could not be read.
    #[error("failed to read {reference}: {reason}")]
    Unreadable {
        /// Reference being resolved.
        reference: String,
        /// Underlying failure.
        reason: String,
    },

    /// The asset was read but does not decode as an asset descriptor.
    #[error("{reference} does not match the asset schema: {reason}")]
    SchemaMismatch {
        /// Reference being resolved.
        reference: String,
        /// Decoder message.
        reason: String,
    },
}
