//! Decoding the shape of a document-backed term.
//!
//! Accepted forms:
//! - `[type, args?, optargs?, bt?]`
//! - `[DATUM, literal, bt?]`
//! - `{...}`: `MAKE_OBJ` with the members as optargs
//! - any other scalar: `DATUM` with the scalar as literal

use reql_core::{BacktraceId, TermType};
use serde_json::{Map, Value};

use crate::{Result, TermError};

/// Cached pointers into one JSON term.
#[derive(Clone, Copy, Debug)]
pub(crate) struct JsonTerm<'a> {
    pub term_type: TermType,
    pub bt: BacktraceId,
    pub args: Option<&'a [Value]>,
    pub optargs: Option<&'a Map<String, Value>>,
    pub datum: Option<&'a Value>,
    pub source: &'a Value,
}

impl<'a> JsonTerm<'a> {
    pub fn parse(source: &'a Value) -> Result<Self> {
        let mut term = Self {
            term_type: TermType::Datum,
            bt: BacktraceId::EMPTY,
            args: None,
            optargs: None,
            datum: None,
            source,
        };

        let items = match source {
            Value::Array(items) => items,
            Value::Object(map) => {
                term.term_type = TermType::MakeObj;
                term.optargs = Some(map);
                return Ok(term);
            }
            scalar => {
                term.datum = Some(scalar);
                return Ok(term);
            }
        };

        let (head, rest) = items
            .split_first()
            .ok_or(TermError::Malformed("empty term array"))?;
        term.term_type = parse_term_type(head)?;

        if term.term_type == TermType::Datum {
            match rest {
                [literal] => term.datum = Some(literal),
                [literal, bt] => {
                    term.datum = Some(literal);
                    term.bt = parse_bt(bt)?;
                }
                _ => {
                    return Err(TermError::Malformed(
                        "DATUM takes a literal and an optional position id",
                    ));
                }
            }
            return Ok(term);
        }

        if rest.len() > 3 {
            return Err(TermError::Malformed("too many elements in term array"));
        }
        term.args = match rest.first() {
            None => None,
            Some(Value::Array(args)) => Some(args.as_slice()),
            Some(_) => return Err(TermError::Malformed("term arguments must be an array")),
        };
        term.optargs = match rest.get(1) {
            None => None,
            Some(Value::Object(optargs)) => Some(optargs),
            Some(_) => return Err(TermError::Malformed("term optargs must be an object")),
        };
        if let Some(bt) = rest.get(2) {
            term.bt = parse_bt(bt)?;
        }
        Ok(term)
    }
}

pub(crate) fn parse_term_type(value: &Value) -> Result<TermType> {
    let code = value
        .as_i64()
        .ok_or(TermError::Malformed("term type must be an integer"))?;
    TermType::from_code(code).ok_or(TermError::UnknownTermType(code))
}

fn parse_bt(value: &Value) -> Result<BacktraceId> {
    value
        .as_u64()
        .and_then(|raw| u32::try_from(raw).ok())
        .map(BacktraceId::from_raw)
        .ok_or(TermError::Malformed("position id must be a 32-bit unsigned integer"))
}
