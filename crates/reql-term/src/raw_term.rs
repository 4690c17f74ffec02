//! Uniform, copyable view over document-backed and generated terms.

use std::fmt;
use std::sync::Arc;

use reql_core::{BacktraceId, ConfiguredLimits, Datum, ReqlVersion, TermType};
use serde_json::Value;

use crate::json_term::JsonTerm;
use crate::{GeneratedTerm, Result, TermError, TermSource};

/// A reference to one term.
///
/// Copying is free and never allocates. The lifetime ties the reference to
/// the store or node graph it points into.
#[derive(Clone, Copy, Debug)]
pub struct RawTerm<'a> {
    optarg_name: &'a str,
    info: Info<'a>,
}

#[derive(Clone, Copy, Debug)]
enum Info<'a> {
    Json(JsonTerm<'a>),
    Generated(&'a Arc<GeneratedTerm<'a>>),
}

impl<'a> RawTerm<'a> {
    /// View a document node, reached under `optarg_name` (`""` for
    /// positional and root terms).
    pub fn from_json(source: &'a Value, optarg_name: &'a str) -> Result<Self> {
        Ok(Self {
            optarg_name,
            info: Info::Json(JsonTerm::parse(source)?),
        })
    }

    /// View a child slot of a generated term.
    pub fn from_source(source: &'a TermSource<'a>, optarg_name: &'a str) -> Result<Self> {
        match source {
            TermSource::Json(value) => Self::from_json(value, optarg_name),
            TermSource::Generated(term) => Ok(Self {
                optarg_name,
                info: Info::Generated(term),
            }),
        }
    }

    /// View a generated root term.
    pub fn from_generated(term: &'a Arc<GeneratedTerm<'a>>) -> Self {
        Self {
            optarg_name: "",
            info: Info::Generated(term),
        }
    }

    pub(crate) fn with_optarg_name(mut self, optarg_name: &'a str) -> Self {
        self.optarg_name = optarg_name;
        self
    }

    pub fn num_args(&self) -> usize {
        match &self.info {
            Info::Json(json) => json.args.map_or(0, <[Value]>::len),
            Info::Generated(term) => term.args().len(),
        }
    }

    pub fn num_optargs(&self) -> usize {
        match &self.info {
            Info::Json(json) => json.optargs.map_or(0, |optargs| optargs.len()),
            Info::Generated(term) => term.optargs().len(),
        }
    }

    /// The positional argument at `index`.
    pub fn arg(&self, index: usize) -> Result<RawTerm<'a>> {
        let out_of_range = || TermError::ArgOutOfRange {
            index,
            count: self.num_args(),
            term_type: self.term_type(),
        };
        match self.info {
            Info::Json(json) => {
                let arg = json.args.and_then(|args| args.get(index));
                Self::from_json(arg.ok_or_else(out_of_range)?, "")
            }
            Info::Generated(term) => {
                let arg = term.args().get(index);
                Self::from_source(arg.ok_or_else(out_of_range)?, "")
            }
        }
    }

    /// The named argument `name`; `Ok(None)` when the term has none.
    pub fn optarg(&self, name: &str) -> Result<Option<RawTerm<'a>>> {
        match self.info {
            Info::Json(json) => json
                .optargs
                .and_then(|optargs| optargs.get_key_value(name))
                .map(|(name, value)| Self::from_json(value, name))
                .transpose(),
            Info::Generated(term) => term
                .optargs()
                .get_key_value(name)
                .map(|(name, source)| Self::from_source(source, name))
                .transpose(),
        }
    }

    /// Positional arguments in order.
    pub fn args(&self) -> Args<'a> {
        match self.info {
            Info::Json(json) => Args::Json(json.args.unwrap_or_default().iter()),
            Info::Generated(term) => Args::Generated(term.args().iter()),
        }
    }

    /// Named arguments, in document member order or insertion order.
    pub fn optargs(&self) -> Optargs<'a> {
        match self.info {
            Info::Json(json) => match json.optargs {
                Some(optargs) => Optargs::Json(optargs.iter()),
                None => Optargs::Empty,
            },
            Info::Generated(term) => Optargs::Generated(term.optargs().iter()),
        }
    }

    /// Call `visit` once per named argument.
    pub fn each_optarg<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(RawTerm<'a>),
    {
        for optarg in self.optargs() {
            visit(optarg?);
        }
        Ok(())
    }

    /// The inline literal, parsed fresh on every call.
    ///
    /// Literals can be large and are read far less often than terms are
    /// visited, so nothing is cached. Keep calls to a minimum.
    pub fn datum(&self, limits: &ConfiguredLimits, version: ReqlVersion) -> Result<Option<Datum>> {
        match self.info {
            Info::Json(json) => Ok(json
                .datum
                .map(|value| Datum::from_json(value, limits, version))
                .transpose()?),
            Info::Generated(term) => Ok(term.datum().cloned()),
        }
    }

    #[inline]
    pub fn term_type(&self) -> TermType {
        match &self.info {
            Info::Json(json) => json.term_type,
            Info::Generated(term) => term.term_type(),
        }
    }

    #[inline]
    pub fn bt(&self) -> BacktraceId {
        match &self.info {
            Info::Json(json) => json.bt,
            Info::Generated(term) => term.bt(),
        }
    }

    #[inline]
    pub fn optarg_name(&self) -> &'a str {
        self.optarg_name
    }

    /// The backing slot, for handing the subtree to another producer.
    pub fn source(&self) -> TermSource<'a> {
        match self.info {
            Info::Json(json) => TermSource::Json(json.source),
            Info::Generated(term) => TermSource::Generated(Arc::clone(term)),
        }
    }
}

/// Iterator over positional arguments.
#[derive(Clone, Debug)]
pub enum Args<'a> {
    Json(std::slice::Iter<'a, Value>),
    Generated(std::slice::Iter<'a, TermSource<'a>>),
}

impl<'a> Iterator for Args<'a> {
    type Item = Result<RawTerm<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Json(iter) => iter.next().map(|value| RawTerm::from_json(value, "")),
            Self::Generated(iter) => iter.next().map(|source| RawTerm::from_source(source, "")),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Json(iter) => iter.size_hint(),
            Self::Generated(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Args<'_> {}

/// Iterator over named arguments.
pub enum Optargs<'a> {
    Empty,
    Json(serde_json::map::Iter<'a>),
    Generated(indexmap::map::Iter<'a, String, TermSource<'a>>),
}

impl<'a> Iterator for Optargs<'a> {
    type Item = Result<RawTerm<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Empty => None,
            Self::Json(iter) => iter
                .next()
                .map(|(name, value)| RawTerm::from_json(value, name)),
            Self::Generated(iter) => iter
                .next()
                .map(|(name, source)| RawTerm::from_source(source, name)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty => (0, Some(0)),
            Self::Json(iter) => iter.size_hint(),
            Self::Generated(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Optargs<'_> {}

impl fmt::Debug for Optargs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Generated(_) => "generated",
        };
        f.debug_struct("Optargs")
            .field("source", &source)
            .field("remaining", &self.len())
            .finish()
    }
}
