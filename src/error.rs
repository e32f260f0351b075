//! Error types for schema inference and canonicalization.

use thiserror::Error;

/// Errors surfaced by the inference tree and the canonicalization passes.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema fragment broke the expected shape (e.g. a `properties`
    /// value that is not a mapping, or a non-array `required`).
    #[error("malformed schema fragment: {0}")]
    MalformedFragment(String),

    /// A `patternProperties` key is not a valid regular expression.
    #[error("invalid property pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// Canonical ordering met a key outside the priority list. The list is
    /// exhaustive for anything this engine emits, so this is a contract
    /// violation, not a recoverable condition.
    #[error("key `{0}` has no canonical ordering rank")]
    UnrankedKey(String),

    /// A path segment was looked up but does not exist.
    #[error("path segment `{0}` not found")]
    MissingSegment(String),

    /// A path segment exists but its value is not a mapping, so traversal
    /// cannot continue through it.
    #[error("path segment `{0}` is not an object")]
    NotAnObject(String),

    /// A path operation was called with an empty path.
    #[error("empty path")]
    EmptyPath,
}

pub type Result<T> = std::result::Result<T, SchemaError>;
