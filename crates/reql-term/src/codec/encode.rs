use std::marker::PhantomData;

use reql_core::ConfiguredLimits;

use super::format::{Format, V1, V2};
use super::{ClusterVersion, CodecError, MAX_TERM_DEPTH};
use crate::RawTerm;

/// Append the encoding of the tree under `root` to `out`.
///
/// Literals of document-backed terms are parsed with the version's own
/// rules. On error `out` is left as it was.
pub fn serialize_term_tree(
    out: &mut Vec<u8>,
    root: RawTerm<'_>,
    version: ClusterVersion,
) -> Result<(), CodecError> {
    let start = out.len();
    let result = match version {
        ClusterVersion::V1 => Encoder::<V1>::new(out).write_tree(root),
        ClusterVersion::V2 => Encoder::<V2>::new(out).write_tree(root),
    };
    match result {
        Ok(terms) => {
            tracing::debug!(%version, terms, bytes = out.len() - start, "encoded term tree");
            Ok(())
        }
        Err(e) => {
            out.truncate(start);
            Err(e)
        }
    }
}

/// Encode the tree under `root` into a fresh buffer.
pub fn encode_term_tree(root: RawTerm<'_>, version: ClusterVersion) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    serialize_term_tree(&mut out, root, version)?;
    Ok(out)
}

struct Encoder<'o, F> {
    out: &'o mut Vec<u8>,
    limits: ConfiguredLimits,
    terms: usize,
    _format: PhantomData<F>,
}

impl<'o, F: Format> Encoder<'o, F> {
    fn new(out: &'o mut Vec<u8>) -> Self {
        Self {
            out,
            limits: ConfiguredLimits::unlimited(),
            terms: 0,
            _format: PhantomData,
        }
    }

    /// Returns the number of terms written.
    fn write_tree(mut self, root: RawTerm<'_>) -> Result<usize, CodecError> {
        self.write_term(root, 0)?;
        Ok(self.terms)
    }

    fn write_term(&mut self, term: RawTerm<'_>, depth: usize) -> Result<(), CodecError> {
        if depth > MAX_TERM_DEPTH {
            return Err(CodecError::RecursionLimit(MAX_TERM_DEPTH));
        }
        self.terms += 1;

        F::write_type(self.out, term.term_type());
        F::write_bt(self.out, term.bt());

        F::write_len(self.out, "argument count", term.num_args())?;
        for arg in term.args() {
            self.write_term(arg?, depth + 1)?;
        }

        F::write_len(self.out, "optarg count", term.num_optargs())?;
        for optarg in term.optargs() {
            let optarg = optarg?;
            F::write_str(self.out, optarg.optarg_name())?;
            self.write_term(optarg, depth + 1)?;
        }

        match term.datum(&self.limits, F::VERSION.reql_version())? {
            None => self.out.push(0),
            Some(datum) => {
                self.out.push(1);
                F::write_datum(self.out, &datum)?;
            }
        }
        Ok(())
    }
}
