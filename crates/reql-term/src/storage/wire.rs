use reql_core::BacktraceRegistry;
use serde_json::Value;

use super::TermStore;
use crate::{RawTerm, Result};

/// A bare term shipped between servers, such as a function body.
///
/// No query envelope, so only [`root_term`](TermStore::root_term) is
/// available.
#[derive(Debug)]
pub struct WireTermStore {
    original_data: Box<[u8]>,
    func_json: Value,
    bt_reg: BacktraceRegistry,
}

impl WireTermStore {
    pub fn new(original_data: Vec<u8>, func_json: Value) -> Self {
        tracing::debug!(bytes = original_data.len(), "wire term store");
        Self {
            original_data: original_data.into_boxed_slice(),
            func_json,
            bt_reg: BacktraceRegistry::new(),
        }
    }

    /// Parse `original_data` as JSON and wrap it.
    pub fn parse(original_data: Vec<u8>) -> Result<Self> {
        let func_json = serde_json::from_slice(&original_data)?;
        Ok(Self::new(original_data, func_json))
    }

    pub fn original_data(&self) -> &[u8] {
        &self.original_data
    }
}

impl TermStore for WireTermStore {
    fn store_name(&self) -> &'static str {
        "wire term store"
    }

    fn backtrace_registry(&self) -> &BacktraceRegistry {
        &self.bt_reg
    }

    fn root_term(&self) -> Result<RawTerm<'_>> {
        RawTerm::from_json(&self.func_json, "")
    }
}
