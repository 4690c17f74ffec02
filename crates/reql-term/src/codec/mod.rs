//! Versioned binary encoding of term trees.
//!
//! Every format writes the same shape, depth first:
//!
//! ```text
//! term    := type bt argc term* optc (name term)* literal
//! literal := 0x00 | 0x01 payload
//! ```
//!
//! Field widths and the literal payload differ per [`ClusterVersion`]:
//!
//! | version | type   | bt     | counts, lengths | literal payload          |
//! |---------|--------|--------|-----------------|--------------------------|
//! | V1      | u16 LE | u32 LE | u32 LE          | tagged fixed-width       |
//! | V2      | LEB128 | LEB128 | LEB128          | LEB128 length + postcard |
//!
//! The caller always names the version; bytes are never sniffed.

mod datum;
mod decode;
mod encode;
mod error;
mod format;
mod reader;


use std::fmt;
use std::str::FromStr;

use reql_core::ReqlVersion;

pub use decode::deserialize_term_tree;
pub use encode::{encode_term_tree, serialize_term_tree};
pub use error::CodecError;

/// Deepest term tree either side accepts.
pub const MAX_TERM_DEPTH: usize = 1024;

/// Wire generation of the cluster on the other end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterVersion {
    V1,
    V2,
}

impl ClusterVersion {
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    /// Literal parsing rules that match this wire generation.
    pub fn reql_version(self) -> ReqlVersion {
        match self {
            Self::V1 => ReqlVersion::V1_16,
            Self::V2 => ReqlVersion::V2_0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ClusterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown cluster version `{s}` (expected v1 or v2)"))
    }
}
