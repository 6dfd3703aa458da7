//! Error types shared by both unflattening engines.

use thiserror::Error;

/// Errors surfaced by the engines and the registration API.
///
/// Every variant is fatal to the call that produced it: the first error
/// aborts with no partial result. Unmapped input keys and registered paths
/// with no matching key are not errors; both are skipped silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnflattenError {
    /// A segment used where a list index is required is not one, an index
    /// does not fit `usize`, or an empty path was registered.
    #[error("malformed path `{path}`")]
    MalformedPath { path: String },

    /// A terminal raw value failed its registered parser.
    #[error("value `{value}` at `{path}` does not parse as {target}")]
    ValueParse {
        path: String,
        value: String,
        target: &'static str,
    },

    /// The same normalized path was registered twice.
    #[error("duplicate registration for `{path}`")]
    DuplicateRegistration { path: String },

    /// A path is used both as a terminal value and as an ancestor of other
    /// paths, or as a map at one key and a list at a sibling key.
    #[error("shape conflict at `{path}`")]
    ShapeConflict { path: String },

    /// A list index beyond the dense end of its list.
    #[error("sparse index {index} at `{path}`")]
    SparseIndex { path: String, index: usize },

    /// A registration's declared types do not match the object graph being
    /// built.
    #[error("registration type mismatch at `{path}`")]
    TypeMismatch { path: String },
}
