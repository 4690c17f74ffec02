//! Human-readable rendering of term trees.

use std::fmt::Write as _;

use crate::{DiagnosticDatum, RawTerm, Result};

/// Render `root` one term per line, children indented under their parent.
///
/// ```text
/// ADD #1
///   DATUM #2 = 1
///   index: DATUM #3 = "id"
/// ```
pub fn dump(root: RawTerm<'_>) -> Result<String> {
    let mut out = String::new();
    dump_term(&mut out, root, 0)?;
    Ok(out)
}

fn dump_term(out: &mut String, term: RawTerm<'_>, depth: usize) -> Result<()> {
    write!(out, "{:indent$}", "", indent = depth * 2).unwrap();
    if !term.optarg_name().is_empty() {
        write!(out, "{}: ", term.optarg_name()).unwrap();
    }
    write!(out, "{}", term.term_type()).unwrap();
    if !term.bt().is_empty() {
        write!(out, " #{}", term.bt()).unwrap();
    }
    if let Some(datum) = term.diagnostic_datum()? {
        write!(out, " = {datum}").unwrap();
    }
    out.push('\n');

    for arg in term.args() {
        dump_term(out, arg?, depth + 1)?;
    }
    for optarg in term.optargs() {
        dump_term(out, optarg?, depth + 1)?;
    }
    Ok(())
}
