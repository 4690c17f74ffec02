use super::ClusterVersion;
use crate::TermError;

/// Term tree encoding or decoding failure.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("truncated input: {needed} more bytes needed at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("unknown term type {0}")]
    UnknownTermType(u64),

    #[error("impossible {kind} count {count} at offset {offset}: only {remaining} bytes left")]
    ImpossibleCount {
        kind: &'static str,
        count: u64,
        offset: usize,
        remaining: usize,
    },

    #[error("malformed varint at offset {offset}")]
    InvalidVarint { offset: usize },

    #[error("{what} {value} out of range")]
    ValueOutOfRange { what: &'static str, value: u64 },

    #[error("invalid literal marker {value:#04x} at offset {offset}")]
    InvalidDiscriminator { value: u8, offset: usize },

    #[error("undecodable literal at offset {offset}: {reason}")]
    InvalidLiteral { offset: usize, reason: String },

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("duplicate optarg `{0}`")]
    DuplicateOptarg(String),

    #[error("term tree nested deeper than {0} levels")]
    RecursionLimit(usize),

    #[error("{0} trailing bytes after term tree")]
    TrailingBytes(usize),

    #[error("{kind} literals cannot be encoded for cluster version {version}")]
    UnsupportedLiteral {
        kind: &'static str,
        version: ClusterVersion,
    },

    #[error("{what} {value} does not fit cluster version {version}")]
    FieldOverflow {
        what: &'static str,
        value: usize,
        version: ClusterVersion,
    },

    #[error("literal encoding failed: {0}")]
    LiteralEncoding(#[source] postcard::Error),

    #[error(transparent)]
    Term(#[from] TermError),
}
