use reql_core::{
    BacktraceId, BacktraceRegistry, ConfiguredLimits, Frame, QueryType, ReqlVersion, TermType,
};
use serde_json::Value;

use super::preprocess::preprocess_term_tree;
use super::{GlobalOptargs, TermStore};
use crate::{GeneratedTerm, RawTerm, Result, TermError};

/// Parts of a query envelope.
///
/// Clients send `[type, term, global_optargs]`; the keyed form
/// `{"type": .., "query": .., "global_optargs": ..}` is accepted as well.
#[derive(Clone, Copy, Debug)]
enum Slot {
    Type,
    Query,
    GlobalOptargs,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Self::Type => 0,
            Self::Query => 1,
            Self::GlobalOptargs => 2,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Query => "query",
            Self::GlobalOptargs => "global_optargs",
        }
    }
}

/// A client query: envelope, root term and global optargs.
#[derive(Debug)]
pub struct QueryTermStore {
    original_data: Box<[u8]>,
    pub(super) query_json: Value,
    version: ReqlVersion,
    bt_reg: BacktraceRegistry,
    preprocessed: bool,
}

impl QueryTermStore {
    /// Wrap an already parsed query. `version` governs literal parsing when
    /// optargs are copied out.
    pub fn new(original_data: Vec<u8>, query_json: Value, version: ReqlVersion) -> Self {
        tracing::debug!(bytes = original_data.len(), %version, "query term store");
        Self {
            original_data: original_data.into_boxed_slice(),
            query_json,
            version,
            bt_reg: BacktraceRegistry::new(),
            preprocessed: false,
        }
    }

    /// Parse `original_data` as JSON and wrap it.
    pub fn parse(original_data: Vec<u8>, version: ReqlVersion) -> Result<Self> {
        let query_json = serde_json::from_slice(&original_data)?;
        Ok(Self::new(original_data, query_json, version))
    }

    pub fn original_data(&self) -> &[u8] {
        &self.original_data
    }

    pub fn version(&self) -> ReqlVersion {
        self.version
    }

    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }

    fn slot(&self, slot: Slot) -> Result<Option<&Value>> {
        match &self.query_json {
            Value::Array(items) => Ok(items.get(slot.index())),
            Value::Object(map) => Ok(map.get(slot.key())),
            _ => Err(TermError::Malformed("query must be an array or an object")),
        }
    }
}

fn slot_mut(query_json: &mut Value, slot: Slot) -> Result<Option<&mut Value>> {
    match query_json {
        Value::Array(items) => Ok(items.get_mut(slot.index())),
        Value::Object(map) => Ok(map.get_mut(slot.key())),
        _ => Err(TermError::Malformed("query must be an array or an object")),
    }
}

impl TermStore for QueryTermStore {
    fn store_name(&self) -> &'static str {
        "query term store"
    }

    fn backtrace_registry(&self) -> &BacktraceRegistry {
        &self.bt_reg
    }

    fn root_term(&self) -> Result<RawTerm<'_>> {
        let term = self
            .slot(Slot::Query)?
            .ok_or(TermError::MissingNode("query term"))?;
        RawTerm::from_json(term, "")
    }

    fn query_type(&self) -> Result<QueryType> {
        let keyed = self.query_json.is_object();
        let Some(value) = self.slot(Slot::Type)? else {
            // The keyed form may leave the type implicit.
            return if keyed {
                Ok(QueryType::Start)
            } else {
                Err(TermError::MissingNode("query type"))
            };
        };
        let code = value
            .as_i64()
            .ok_or(TermError::Malformed("query type must be an integer"))?;
        QueryType::from_code(code).ok_or(TermError::UnknownQueryType(code))
    }

    fn static_optarg_as_bool(&self, key: &str, default: bool) -> Result<bool> {
        let Some(Value::Object(optargs)) = self.slot(Slot::GlobalOptargs)? else {
            return Ok(default);
        };
        let datum_code = Value::from(TermType::Datum.code());
        let value = match optargs.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::Array(items)) => match items.as_slice() {
                [code, Value::Bool(value)] | [code, Value::Bool(value), _]
                    if *code == datum_code =>
                {
                    *value
                }
                _ => default,
            },
            _ => default,
        };
        Ok(value)
    }

    fn preprocess(&mut self) -> Result<()> {
        if self.preprocessed {
            return Ok(());
        }

        // Work on copies so a rejected tree leaves the store untouched.
        let mut query_json = self.query_json.clone();
        let mut bt_reg = self.bt_reg.clone();
        let mut terms = 0;
        if let Some(term) = slot_mut(&mut query_json, Slot::Query)? {
            terms += preprocess_term_tree(term, &mut bt_reg, BacktraceId::EMPTY)?;
        }
        match slot_mut(&mut query_json, Slot::GlobalOptargs)? {
            None => {}
            Some(Value::Object(optargs)) => {
                for (name, optarg) in optargs.iter_mut() {
                    let bt = bt_reg
                        .new_frame(BacktraceId::EMPTY, Frame::Opt(name.clone()))
                        .ok_or(TermError::Malformed("too many terms to assign position ids"))?;
                    terms += preprocess_term_tree(optarg, &mut bt_reg, bt)?;
                }
            }
            Some(_) => return Err(TermError::Malformed("global optargs must be an object")),
        }

        tracing::debug!(terms, frames = bt_reg.len(), "preprocessed query");
        self.query_json = query_json;
        self.bt_reg = bt_reg;
        self.preprocessed = true;
        Ok(())
    }

    fn global_optargs(&self) -> Result<GlobalOptargs> {
        let mut global = GlobalOptargs::default();
        let optargs = match self.slot(Slot::GlobalOptargs)? {
            None => return Ok(global),
            Some(Value::Object(optargs)) => optargs,
            Some(_) => return Err(TermError::Malformed("global optargs must be an object")),
        };
        // Limits come from the optargs themselves, so the copy is unbounded.
        let limits = ConfiguredLimits::unlimited();
        for (name, value) in optargs {
            let term = RawTerm::from_json(value, name)?;
            global.insert(
                name.clone(),
                GeneratedTerm::materialize(term, &limits, self.version)?,
            );
        }
        Ok(global)
    }
}
