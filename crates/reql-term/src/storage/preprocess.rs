//! One-time normalization of a document-backed term tree.
//!
//! Shorthand literals and objects are rewritten into explicit term arrays so
//! that every term can carry a position id, and each term is validated and
//! assigned an id from the registry. Returns the number of terms visited.

use reql_core::{BacktraceId, BacktraceRegistry, Frame, TermType};
use serde_json::{Map, Value};

use crate::json_term::parse_term_type;
use crate::{Result, TermError};

const OUT_OF_IDS: TermError = TermError::Malformed("too many terms to assign position ids");

pub(super) fn preprocess_term_tree(
    term: &mut Value,
    bt_reg: &mut BacktraceRegistry,
    bt: BacktraceId,
) -> Result<usize> {
    let items = match term {
        Value::Array(items) => items,
        Value::Object(members) => {
            let members = std::mem::take(members);
            *term = Value::Array(vec![
                TermType::MakeObj.code().into(),
                Value::Array(Vec::new()),
                Value::Object(members),
            ]);
            return preprocess_term_tree(term, bt_reg, bt);
        }
        scalar => {
            let literal = scalar.take();
            *scalar = Value::Array(vec![
                TermType::Datum.code().into(),
                literal,
                bt.as_u32().into(),
            ]);
            return Ok(1);
        }
    };

    let term_type = items
        .first()
        .ok_or(TermError::Malformed("empty term array"))
        .and_then(parse_term_type)?;
    if term_type == TermType::Datum {
        match items.len() {
            2 => items.push(bt.as_u32().into()),
            3 => items[2] = bt.as_u32().into(),
            _ => {
                return Err(TermError::Malformed(
                    "DATUM takes a literal and an optional position id",
                ));
            }
        }
        return Ok(1);
    }

    if items.len() > 4 {
        return Err(TermError::Malformed("too many elements in term array"));
    }
    if items.len() < 2 {
        items.push(Value::Array(Vec::new()));
    }
    if items.len() < 3 {
        items.push(Value::Object(Map::new()));
    }
    items.truncate(3);
    items.push(bt.as_u32().into());

    let mut visited = 1;
    match &mut items[1] {
        Value::Array(args) => {
            for (index, arg) in args.iter_mut().enumerate() {
                let index = u32::try_from(index)
                    .map_err(|_| TermError::Malformed("too many term arguments"))?;
                let child = bt_reg
                    .new_frame(bt, Frame::Arg(index))
                    .ok_or(OUT_OF_IDS)?;
                visited += preprocess_term_tree(arg, bt_reg, child)?;
            }
        }
        _ => return Err(TermError::Malformed("term arguments must be an array")),
    }
    match &mut items[2] {
        Value::Object(optargs) => {
            for (name, optarg) in optargs.iter_mut() {
                let child = bt_reg
                    .new_frame(bt, Frame::Opt(name.clone()))
                    .ok_or(OUT_OF_IDS)?;
                visited += preprocess_term_tree(optarg, bt_reg, child)?;
            }
        }
        _ => return Err(TermError::Malformed("term optargs must be an object")),
    }
    Ok(visited)
}
