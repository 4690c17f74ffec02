//! Terms built at runtime instead of parsed from a request.

use std::sync::Arc;

use indexmap::IndexMap;
use reql_core::{BacktraceId, ConfiguredLimits, Datum, ReqlVersion, TermType};
use serde_json::Value;

use crate::{RawTerm, Result};

/// A child slot: either a node of a parsed document or another generated term.
///
/// `'doc` is the lifetime of the document the JSON variant points into;
/// trees with no document children are `'static`.
#[derive(Debug, Clone)]
pub enum TermSource<'doc> {
    Json(&'doc Value),
    Generated(Arc<GeneratedTerm<'doc>>),
}

impl<'doc> From<&'doc Value> for TermSource<'doc> {
    fn from(value: &'doc Value) -> Self {
        Self::Json(value)
    }
}

impl<'doc> From<Arc<GeneratedTerm<'doc>>> for TermSource<'doc> {
    fn from(term: Arc<GeneratedTerm<'doc>>) -> Self {
        Self::Generated(term)
    }
}

impl<'doc> From<GeneratedTerm<'doc>> for TermSource<'doc> {
    fn from(term: GeneratedTerm<'doc>) -> Self {
        Self::Generated(term.share())
    }
}

/// An owned term.
///
/// The producer fills in arguments while it holds the value exclusively,
/// then calls [`share`](Self::share). Nothing mutates a term after that, so
/// the shared handle can cross threads freely. A child must exist before it
/// is attached, which rules out cycles.
#[derive(Debug, Clone)]
pub struct GeneratedTerm<'doc> {
    term_type: TermType,
    bt: BacktraceId,
    args: Vec<TermSource<'doc>>,
    optargs: IndexMap<String, TermSource<'doc>>,
    datum: Option<Datum>,
}

impl<'doc> GeneratedTerm<'doc> {
    pub fn new(term_type: TermType, bt: BacktraceId) -> Self {
        Self {
            term_type,
            bt,
            args: Vec::new(),
            optargs: IndexMap::new(),
            datum: None,
        }
    }

    /// A `DATUM` term holding `datum`.
    pub fn datum_term(datum: impl Into<Datum>, bt: BacktraceId) -> Self {
        Self::new(TermType::Datum, bt).with_datum(datum)
    }

    #[inline]
    pub fn term_type(&self) -> TermType {
        self.term_type
    }

    #[inline]
    pub fn bt(&self) -> BacktraceId {
        self.bt
    }

    #[inline]
    pub fn args(&self) -> &[TermSource<'doc>] {
        &self.args
    }

    /// Named arguments in insertion order.
    #[inline]
    pub fn optargs(&self) -> &IndexMap<String, TermSource<'doc>> {
        &self.optargs
    }

    #[inline]
    pub fn datum(&self) -> Option<&Datum> {
        self.datum.as_ref()
    }

    pub fn push_arg(&mut self, arg: impl Into<TermSource<'doc>>) {
        self.args.push(arg.into());
    }

    /// Returns the previous child stored under `name`, if any.
    pub fn insert_optarg(
        &mut self,
        name: impl Into<String>,
        value: impl Into<TermSource<'doc>>,
    ) -> Option<TermSource<'doc>> {
        self.optargs.insert(name.into(), value.into())
    }

    pub fn set_datum(&mut self, datum: impl Into<Datum>) {
        self.datum = Some(datum.into());
    }

    pub fn with_arg(mut self, arg: impl Into<TermSource<'doc>>) -> Self {
        self.push_arg(arg);
        self
    }

    pub fn with_optarg(
        mut self,
        name: impl Into<String>,
        value: impl Into<TermSource<'doc>>,
    ) -> Self {
        self.insert_optarg(name, value);
        self
    }

    pub fn with_datum(mut self, datum: impl Into<Datum>) -> Self {
        self.set_datum(datum);
        self
    }

    /// Freeze the term behind a shared handle.
    pub fn share(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl GeneratedTerm<'static> {
    /// Deep-copy any term into an owned tree that outlives its source.
    ///
    /// Literals of document-backed terms are parsed with `limits` and
    /// `version` on the way.
    pub fn materialize(
        term: RawTerm<'_>,
        limits: &ConfiguredLimits,
        version: ReqlVersion,
    ) -> Result<Arc<Self>> {
        let mut copy = Self::new(term.term_type(), term.bt());
        for arg in term.args() {
            copy.push_arg(Self::materialize(arg?, limits, version)?);
        }
        for optarg in term.optargs() {
            let optarg = optarg?;
            copy.insert_optarg(
                optarg.optarg_name(),
                Self::materialize(optarg, limits, version)?,
            );
        }
        copy.datum = term.datum(limits, version)?;
        Ok(copy.share())
    }
}
