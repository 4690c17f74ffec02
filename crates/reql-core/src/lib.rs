#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types shared by the ReQL term layer.
//!
//! - [`Datum`]: the literal value domain inlined into terms
//! - [`ConfiguredLimits`] / [`ReqlVersion`]: rules for parsing literals
//! - [`TermType`] / [`QueryType`]: protocol tags
//! - [`BacktraceRegistry`]: resolves position ids to frame paths

mod backtrace;
mod datum;
mod limits;
mod query_type;
mod term_type;
mod version;

#[cfg(test)]
mod backtrace_tests;
#[cfg(test)]
mod datum_tests;

pub use backtrace::{BacktraceId, BacktraceRegistry, Frame};
pub use datum::{Datum, DatumError, REQL_TYPE_KEY};
pub use limits::{ConfiguredLimits, DEFAULT_ARRAY_SIZE_LIMIT, DEFAULT_MAX_NESTING_DEPTH};
pub use query_type::QueryType;
pub use term_type::TermType;
pub use version::{ReqlVersion, UnknownVersion};
