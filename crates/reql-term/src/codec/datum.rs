//! Literal payloads.

use std::collections::BTreeMap;

use reql_core::Datum;

use super::format::{Format, V1};
use super::reader::ByteReader;
use super::{ClusterVersion, CodecError, MAX_TERM_DEPTH};

const TAG_NULL: u8 = 0;
const TAG_FALSE: u8 = 1;
const TAG_TRUE: u8 = 2;
const TAG_NUMBER: u8 = 3;
const TAG_STRING: u8 = 4;
const TAG_ARRAY: u8 = 5;
const TAG_OBJECT: u8 = 6;

/// Tagged fixed-width literals. Predates `BINARY`.
pub(super) struct V1Datum;

impl V1Datum {
    pub fn write(out: &mut Vec<u8>, datum: &Datum) -> Result<(), CodecError> {
        match datum {
            Datum::Null => out.push(TAG_NULL),
            Datum::Bool(false) => out.push(TAG_FALSE),
            Datum::Bool(true) => out.push(TAG_TRUE),
            Datum::Number(n) => {
                out.push(TAG_NUMBER);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Datum::String(s) => {
                out.push(TAG_STRING);
                V1::write_str(out, s)?;
            }
            Datum::Array(items) => {
                out.push(TAG_ARRAY);
                V1::write_len(out, "array length", items.len())?;
                for item in items {
                    Self::write(out, item)?;
                }
            }
            Datum::Object(fields) => {
                out.push(TAG_OBJECT);
                V1::write_len(out, "object size", fields.len())?;
                for (key, value) in fields {
                    V1::write_str(out, key)?;
                    Self::write(out, value)?;
                }
            }
            Datum::Binary(_) => {
                return Err(CodecError::UnsupportedLiteral {
                    kind: "BINARY",
                    version: ClusterVersion::V1,
                });
            }
        }
        Ok(())
    }

    pub fn read(r: &mut ByteReader<'_>) -> Result<Datum, CodecError> {
        Self::read_nested(r, 0)
    }

    fn read_nested(r: &mut ByteReader<'_>, depth: usize) -> Result<Datum, CodecError> {
        if depth > MAX_TERM_DEPTH {
            return Err(CodecError::RecursionLimit(MAX_TERM_DEPTH));
        }
        let offset = r.offset();
        let datum = match r.u8()? {
            TAG_NULL => Datum::Null,
            TAG_FALSE => Datum::Bool(false),
            TAG_TRUE => Datum::Bool(true),
            TAG_NUMBER => Datum::Number(r.f64_le()?),
            TAG_STRING => Datum::String(V1::read_str(r)?),
            TAG_ARRAY => {
                // Every element takes at least its tag byte.
                let len = read_count(r, "array element", 1)?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(Self::read_nested(r, depth + 1)?);
                }
                Datum::Array(items)
            }
            TAG_OBJECT => {
                // A field is at least an empty key plus a tag byte.
                let len = read_count(r, "object field", 5)?;
                let mut fields = BTreeMap::new();
                for _ in 0..len {
                    let key_offset = r.offset();
                    let key = V1::read_str(r)?;
                    let value = Self::read_nested(r, depth + 1)?;
                    if fields.insert(key, value).is_some() {
                        return Err(CodecError::InvalidLiteral {
                            offset: key_offset,
                            reason: "duplicate object key".to_owned(),
                        });
                    }
                }
                Datum::Object(fields)
            }
            tag => {
                return Err(CodecError::InvalidLiteral {
                    offset,
                    reason: format!("unknown literal tag {tag}"),
                });
            }
        };
        Ok(datum)
    }
}

/// Read a V1 count and reject it if `min_size`-byte entries cannot fit.
fn read_count(
    r: &mut ByteReader<'_>,
    kind: &'static str,
    min_size: usize,
) -> Result<usize, CodecError> {
    let offset = r.offset();
    let count = V1::read_len(r)?;
    let remaining = r.remaining();
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

/// Postcard-encoded literals.
pub(super) struct V2Datum;

impl V2Datum {
    pub fn encode(datum: &Datum) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(datum).map_err(CodecError::LiteralEncoding)
    }

    pub fn decode(payload: &[u8], offset: usize) -> Result<Datum, CodecError> {
        let invalid = |reason: String| CodecError::InvalidLiteral { offset, reason };
        // postcard recurses without bound, so nesting is measured first.
        if let Err(err @ CodecError::RecursionLimit(_)) =
            Self::check_depth(&mut ByteReader::new(payload), 0)
        {
            return Err(err);
        }
        let (datum, rest) =
            postcard::take_from_bytes::<Datum>(payload).map_err(|e| invalid(e.to_string()))?;
        if !rest.is_empty() {
            return Err(invalid(format!("{} unused bytes in literal", rest.len())));
        }
        Ok(datum)
    }

    /// Walk the postcard layout of a `Datum` without building it. Stops
    /// quietly at anything malformed and leaves the report to postcard.
    fn check_depth(r: &mut ByteReader<'_>, depth: usize) -> Result<(), CodecError> {
        if depth > MAX_TERM_DEPTH {
            return Err(CodecError::RecursionLimit(MAX_TERM_DEPTH));
        }
        match r.varint()? {
            0 => {}
            1 => {
                r.take(1)?;
            }
            2 => {
                r.take(8)?;
            }
            3 | 6 => {
                let len = r.varint()?;
                r.take(usize::try_from(len).unwrap_or(usize::MAX))?;
            }
            4 => {
                for _ in 0..r.varint()? {
                    Self::check_depth(r, depth + 1)?;
                }
            }
            5 => {
                for _ in 0..r.varint()? {
                    let key_len = r.varint()?;
                    r.take(usize::try_from(key_len).unwrap_or(usize::MAX))?;
                    Self::check_depth(r, depth + 1)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
