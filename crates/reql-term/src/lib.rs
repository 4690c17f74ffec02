#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! ReQL term trees: reading, building and re-encoding them.
//!
//! A term either lives inside a parsed JSON document or was generated at
//! runtime. [`RawTerm`] hides the difference so the engine walks both the
//! same way:
//!
//! ```
//! use reql_core::{ConfiguredLimits, ReqlVersion, TermType};
//! use reql_term::{QueryTermStore, TermStore};
//!
//! let query = br#"[1, [24, [1, 2]], {"db": "test"}]"#.to_vec();
//! let store = QueryTermStore::parse(query, ReqlVersion::LATEST).unwrap();
//!
//! let root = store.root_term().unwrap();
//! assert_eq!(root.term_type(), TermType::Add);
//! let one = root.arg(0).unwrap();
//! let limits = ConfiguredLimits::default();
//! assert_eq!(one.datum(&limits, ReqlVersion::LATEST).unwrap(), Some(1.into()));
//! ```

pub mod codec;
mod diagnostic;
mod dump;
mod error;
mod generated;
mod json_term;
mod raw_term;
pub mod storage;

#[cfg(test)]
mod dump_tests;

pub use codec::{
    ClusterVersion, CodecError, deserialize_term_tree, encode_term_tree, serialize_term_tree,
};
pub use diagnostic::DiagnosticDatum;
pub use dump::dump;
pub use error::TermError;
pub use generated::{GeneratedTerm, TermSource};
pub use raw_term::{Args, Optargs, RawTerm};
pub use storage::{
    GeneratedTermStore, GlobalOptargs, QueryTermStore, TermStore, WireTermStore,
};

/// Result type for term operations.
pub type Result<T> = std::result::Result<T, TermError>;
