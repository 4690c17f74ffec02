//! Literal access for error messages and debug output.

use reql_core::{ConfiguredLimits, Datum, ReqlVersion};

use crate::{RawTerm, Result};

/// Reads a term's literal with the newest parsing rules and no limits.
///
/// Only for rendering terms to humans. Anything that feeds execution must
/// call [`RawTerm::datum`] with the query's own version and limits, which is
/// why this lives behind a separate import.
pub trait DiagnosticDatum {
    fn diagnostic_datum(&self) -> Result<Option<Datum>>;
}

impl DiagnosticDatum for RawTerm<'_> {
    fn diagnostic_datum(&self) -> Result<Option<Datum>> {
        self.datum(&ConfiguredLimits::unlimited(), ReqlVersion::LATEST)
    }
}
