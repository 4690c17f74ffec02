use std::marker::PhantomData;
use std::sync::Arc;

use super::format::{Format, V1, V2};
use super::reader::ByteReader;
use super::{ClusterVersion, CodecError, MAX_TERM_DEPTH};
use crate::{GeneratedTerm, GeneratedTermStore};

/// Decode a complete term tree written by [`serialize_term_tree`] for the
/// same `version`.
///
/// The result is built only from generated terms. Any error drops every node
/// decoded so far; the whole input must be consumed.
///
/// [`serialize_term_tree`]: super::serialize_term_tree
pub fn deserialize_term_tree(
    bytes: &[u8],
    version: ClusterVersion,
) -> Result<GeneratedTermStore, CodecError> {
    let mut reader = ByteReader::new(bytes);
    let (root, terms) = match version {
        ClusterVersion::V1 => Decoder::<V1>::new(&mut reader).read_tree()?,
        ClusterVersion::V2 => Decoder::<V2>::new(&mut reader).read_tree()?,
    };
    if reader.remaining() > 0 {
        return Err(CodecError::TrailingBytes(reader.remaining()));
    }
    tracing::debug!(%version, terms, bytes = bytes.len(), "decoded term tree");
    Ok(GeneratedTermStore::new(root))
}

struct Decoder<'r, 'b, F> {
    reader: &'r mut ByteReader<'b>,
    terms: usize,
    _format: PhantomData<F>,
}

impl<'r, 'b, F: Format> Decoder<'r, 'b, F> {
    fn new(reader: &'r mut ByteReader<'b>) -> Self {
        Self {
            reader,
            terms: 0,
            _format: PhantomData,
        }
    }

    fn read_tree(mut self) -> Result<(Arc<GeneratedTerm<'static>>, usize), CodecError> {
        let root = self.read_term(0)?;
        Ok((root, self.terms))
    }

    fn read_term(&mut self, depth: usize) -> Result<Arc<GeneratedTerm<'static>>, CodecError> {
        if depth > MAX_TERM_DEPTH {
            return Err(CodecError::RecursionLimit(MAX_TERM_DEPTH));
        }

        let term_type = F::read_type(self.reader)?;
        let bt = F::read_bt(self.reader)?;
        let mut term = GeneratedTerm::new(term_type, bt);

        let argc = self.read_count("argument", F::MIN_TERM_SIZE)?;
        for _ in 0..argc {
            term.push_arg(self.read_term(depth + 1)?);
        }

        // An optarg is a name (at least its length prefix) plus a term.
        let optc = self.read_count("optarg", F::MIN_TERM_SIZE + 1)?;
        for _ in 0..optc {
            let name = F::read_str(self.reader)?;
            if term.optargs().contains_key(&name) {
                return Err(CodecError::DuplicateOptarg(name));
            }
            let child = self.read_term(depth + 1)?;
            term.insert_optarg(name, child);
        }

        let offset = self.reader.offset();
        match self.reader.u8()? {
            0 => {}
            1 => term.set_datum(F::read_datum(self.reader)?),
            value => return Err(CodecError::InvalidDiscriminator { value, offset }),
        }

        self.terms += 1;
        tracing::trace!(%term_type, depth, "decoded term");
        Ok(term.share())
    }

    fn read_count(&mut self, kind: &'static str, min_size: usize) -> Result<usize, CodecError> {
        let offset = self.reader.offset();
        let count = F::read_len(self.reader)?;
        let remaining = self.reader.remaining();
        if count.saturating_mul(min_size as u64) > remaining as u64 {
            return Err(CodecError::ImpossibleCount {
                kind,
                count,
                offset,
                remaining,
            });
        }
        Ok(count as usize)
    }
}
