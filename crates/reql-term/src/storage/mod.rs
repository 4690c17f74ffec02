//! Owners of term trees.
//!
//! Every store can hand out its root term. Query stores additionally answer
//! envelope questions (query type, static optargs) by peeking at the top of
//! the document, so a dispatcher can decide what to do before any term is
//! built. Stores without an envelope report those capabilities as
//! [`TermError::Unsupported`].

mod generated;
mod global_optargs;
mod preprocess;
mod query;
mod wire;

#[cfg(test)]
mod preprocess_tests;
#[cfg(test)]
mod query_tests;

use reql_core::{BacktraceRegistry, QueryType};

use crate::{RawTerm, Result, TermError};

pub use generated::GeneratedTermStore;
pub use global_optargs::GlobalOptargs;
pub use query::QueryTermStore;
pub use wire::WireTermStore;

/// Owner of exactly one term tree.
pub trait TermStore {
    /// Short provider name used in error messages.
    fn store_name(&self) -> &'static str;

    fn backtrace_registry(&self) -> &BacktraceRegistry;

    fn root_term(&self) -> Result<RawTerm<'_>>;

    fn query_type(&self) -> Result<QueryType> {
        Err(self.unsupported("query_type"))
    }

    /// Read a top-level optarg as a boolean literal without building terms.
    ///
    /// Returns `default` when the optarg is absent or not a boolean literal.
    fn static_optarg_as_bool(&self, _key: &str, _default: bool) -> Result<bool> {
        Err(self.unsupported("static_optarg_as_bool"))
    }

    /// One-time normalization before the tree is walked repeatedly.
    fn preprocess(&mut self) -> Result<()> {
        Err(self.unsupported("preprocess"))
    }

    /// Copy all top-level optargs out of the store.
    fn global_optargs(&self) -> Result<GlobalOptargs> {
        Err(self.unsupported("global_optargs"))
    }

    fn unsupported(&self, operation: &'static str) -> TermError {
        TermError::Unsupported {
            operation,
            store: self.store_name(),
        }
    }
}
