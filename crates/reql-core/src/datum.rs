//! Literal values inlined into terms.
//!
//! Literals arrive as JSON and are converted on demand under a
//! [`ReqlVersion`] and [`ConfiguredLimits`]. Objects tagged with
//! [`REQL_TYPE_KEY`] are pseudo-types: `BINARY` becomes [`Datum::Binary`],
//! `TIME` and `GEOMETRY` stay plain objects, anything else is rejected.

use std::collections::BTreeMap;
use std::fmt;

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ConfiguredLimits, ReqlVersion};

/// Object key marking a pseudo-type.
pub const REQL_TYPE_KEY: &str = "$reql_type$";

const PSEUDO_BINARY: &str = "BINARY";
const PSEUDO_PASSTHROUGH: [&str; 2] = ["TIME", "GEOMETRY"];

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Datum>),
    Object(BTreeMap<String, Datum>),
    Binary(Vec<u8>),
}

/// Literal conversion failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatumError {
    #[error("array over size limit `{limit}` (got {size} elements)")]
    ArrayTooLarge { size: usize, limit: usize },

    #[error("literal nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("unknown $reql_type$ `{0}`")]
    UnknownPseudoType(String),

    #[error("$reql_type$ `{name}` is not available in version {version}")]
    PseudoTypeUnsupported { name: String, version: ReqlVersion },

    #[error("invalid {name} pseudo-type: {reason}")]
    InvalidPseudoType { name: &'static str, reason: String },
}

impl Datum {
    /// Convert a JSON literal.
    pub fn from_json(
        value: &Value,
        limits: &ConfiguredLimits,
        version: ReqlVersion,
    ) -> Result<Self, DatumError> {
        Converter { limits, version }.convert(value, 0)
    }

    /// JSON rendering; `BINARY` goes back to its pseudo-type form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Datum::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Binary(bytes) => {
                let mut map = Map::new();
                map.insert(REQL_TYPE_KEY.to_owned(), Value::from(PSEUDO_BINARY));
                map.insert("data".to_owned(), Value::from(BASE64_STANDARD.encode(bytes)));
                Value::Object(map)
            }
        }
    }

    /// Protocol name of the value's type, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Number(_) => "NUMBER",
            Self::String(_) => "STRING",
            Self::Array(_) => "ARRAY",
            Self::Object(_) => "OBJECT",
            Self::Binary(_) => "BINARY",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integral value of a number literal, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        let n = self.as_number()?;
        (n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER).then_some(n as i64)
    }
}

/// Largest magnitude an f64 holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_json().fmt(f)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Datum {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

struct Converter<'l> {
    limits: &'l ConfiguredLimits,
    version: ReqlVersion,
}

impl Converter<'_> {
    fn convert(&self, value: &Value, depth: usize) -> Result<Datum, DatumError> {
        match value {
            Value::Null => Ok(Datum::Null),
            Value::Bool(b) => Ok(Datum::Bool(*b)),
            // Without `arbitrary_precision` every JSON number has an f64 form.
            Value::Number(n) => Ok(Datum::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Ok(Datum::String(s.clone())),
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                if items.len() > self.limits.array_size_limit {
                    return Err(DatumError::ArrayTooLarge {
                        size: items.len(),
                        limit: self.limits.array_size_limit,
                    });
                }
                items
                    .iter()
                    .map(|item| self.convert(item, depth))
                    .collect::<Result<_, _>>()
                    .map(Datum::Array)
            }
            Value::Object(map) => {
                let depth = self.enter(depth)?;
                if let Some(tag) = map.get(REQL_TYPE_KEY) {
                    if let Some(datum) = self.convert_pseudo(tag, map)? {
                        return Ok(datum);
                    }
                }
                map.iter()
                    .map(|(k, v)| Ok::<_, DatumError>((k.clone(), self.convert(v, depth)?)))
                    .collect::<Result<_, _>>()
                    .map(Datum::Object)
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, DatumError> {
        let depth = depth + 1;
        if depth > self.limits.max_nesting_depth {
            return Err(DatumError::NestingTooDeep {
                limit: self.limits.max_nesting_depth,
            });
        }
        Ok(depth)
    }

    /// `Ok(None)` means the object stays a plain object.
    fn convert_pseudo(
        &self,
        tag: &Value,
        map: &Map<String, Value>,
    ) -> Result<Option<Datum>, DatumError> {
        let Value::String(name) = tag else {
            return Err(DatumError::InvalidPseudoType {
                name: "$reql_type$",
                reason: format!("expected a string tag, got {tag}"),
            });
        };

        if PSEUDO_PASSTHROUGH.contains(&name.as_str()) {
            return Ok(None);
        }
        if name != PSEUDO_BINARY {
            return Err(DatumError::UnknownPseudoType(name.clone()));
        }
        if !self.version.supports_binary() {
            return Err(DatumError::PseudoTypeUnsupported {
                name: name.clone(),
                version: self.version,
            });
        }

        let invalid = |reason: String| DatumError::InvalidPseudoType {
            name: PSEUDO_BINARY,
            reason,
        };
        if let Some(extra) = map.keys().find(|k| *k != REQL_TYPE_KEY && *k != "data") {
            return Err(invalid(format!("unexpected field `{extra}`")));
        }
        let Some(Value::String(data)) = map.get("data") else {
            return Err(invalid("field `data` must be a base64 string".to_owned()));
        };
        BASE64_STANDARD
            .decode(data)
            .map(|bytes| Some(Datum::Binary(bytes)))
            .map_err(|e| invalid(e.to_string()))
    }
}
