use std::sync::Arc;

use reql_core::BacktraceRegistry;

use super::TermStore;
use crate::{GeneratedTerm, RawTerm, Result};

/// Store for a tree built entirely from generated terms, such as the output
/// of the term tree decoder.
#[derive(Debug, Clone)]
pub struct GeneratedTermStore {
    root: Arc<GeneratedTerm<'static>>,
    bt_reg: BacktraceRegistry,
}

impl GeneratedTermStore {
    pub fn new(root: Arc<GeneratedTerm<'static>>) -> Self {
        Self::with_registry(root, BacktraceRegistry::new())
    }

    pub fn with_registry(root: Arc<GeneratedTerm<'static>>, bt_reg: BacktraceRegistry) -> Self {
        Self { root, bt_reg }
    }

    pub fn root(&self) -> &Arc<GeneratedTerm<'static>> {
        &self.root
    }

    pub fn into_root(self) -> Arc<GeneratedTerm<'static>> {
        self.root
    }
}

impl TermStore for GeneratedTermStore {
    fn store_name(&self) -> &'static str {
        "generated term store"
    }

    fn backtrace_registry(&self) -> &BacktraceRegistry {
        &self.bt_reg
    }

    fn root_term(&self) -> Result<RawTerm<'_>> {
        Ok(RawTerm::from_generated(&self.root))
    }
}
