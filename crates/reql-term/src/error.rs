use reql_core::{DatumError, TermType};

/// Errors raised while reading a term tree.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// Positional argument index past the end.
    #[error("{term_type} has {count} arguments, index {index} is out of range")]
    ArgOutOfRange {
        index: usize,
        count: usize,
        term_type: TermType,
    },

    /// The document does not have the shape of a term.
    #[error("malformed term: {0}")]
    Malformed(&'static str),

    #[error("unknown term type {0}")]
    UnknownTermType(i64),

    #[error("unknown query type {0}")]
    UnknownQueryType(i64),

    /// A node the caller requires is absent.
    #[error("missing {0}")]
    MissingNode(&'static str),

    #[error("invalid optarg `{name}`: {reason}")]
    InvalidOptarg { name: &'static str, reason: String },

    #[error("invalid literal: {0}")]
    Datum(#[from] DatumError),

    /// A store was asked for a capability it does not provide.
    #[error("{operation} is not supported by {store}")]
    Unsupported {
        operation: &'static str,
        store: &'static str,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
