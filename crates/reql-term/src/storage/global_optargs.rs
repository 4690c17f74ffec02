use std::sync::Arc;

use indexmap::IndexMap;
use reql_core::{ConfiguredLimits, Datum};

use crate::{GeneratedTerm, RawTerm, Result, TermError};

const ARRAY_LIMIT: &str = "array_limit";

/// Owned copy of a query's top-level optargs.
///
/// The copy outlives the document it came from, so the outer query layer
/// can keep it for the whole run.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptargs {
    optargs: IndexMap<String, Arc<GeneratedTerm<'static>>>,
}

impl GlobalOptargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the term previously stored under `name`, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        term: Arc<GeneratedTerm<'static>>,
    ) -> Option<Arc<GeneratedTerm<'static>>> {
        self.optargs.insert(name.into(), term)
    }

    pub fn get(&self, name: &str) -> Option<RawTerm<'_>> {
        self.optargs
            .get_key_value(name)
            .map(|(name, term)| RawTerm::from_generated(term).with_optarg_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.optargs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.optargs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.optargs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.optargs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = RawTerm<'_>> {
        self.optargs
            .iter()
            .map(|(name, term)| RawTerm::from_generated(term).with_optarg_name(name))
    }

    /// Default limits, overridden by the `array_limit` optarg when present.
    pub fn configured_limits(&self) -> Result<ConfiguredLimits> {
        let limits = ConfiguredLimits::default();
        let Some(term) = self.optargs.get(ARRAY_LIMIT) else {
            return Ok(limits);
        };
        let invalid = |reason: String| TermError::InvalidOptarg {
            name: ARRAY_LIMIT,
            reason,
        };
        match term.datum() {
            None => Err(invalid(format!("expected a literal, got {}", term.term_type()))),
            Some(datum) => match datum.as_i64() {
                Some(limit) if limit >= 1 => Ok(limits.with_array_size_limit(limit as usize)),
                _ => Err(invalid(describe_bad_limit(datum))),
            },
        }
    }
}

fn describe_bad_limit(datum: &Datum) -> String {
    match datum {
        Datum::Number(n) => format!("illegal array size limit `{n}` (must be >= 1)"),
        other => format!("expected a NUMBER, got {}", other.type_name()),
    }
}
