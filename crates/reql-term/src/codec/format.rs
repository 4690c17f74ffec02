//! Per-version field encodings.

use reql_core::{BacktraceId, Datum, TermType};

use super::datum::{V1Datum, V2Datum};
use super::reader::{ByteReader, write_varint};
use super::{ClusterVersion, CodecError};

/// Field layout of one wire generation.
pub(super) trait Format {
    const VERSION: ClusterVersion;

    /// Fewest bytes a serialized term can occupy, used to reject counts the
    /// remaining input could never satisfy.
    const MIN_TERM_SIZE: usize;

    fn write_type(out: &mut Vec<u8>, term_type: TermType);
    fn write_bt(out: &mut Vec<u8>, bt: BacktraceId);
    fn write_len(out: &mut Vec<u8>, what: &'static str, len: usize) -> Result<(), CodecError>;
    fn write_datum(out: &mut Vec<u8>, datum: &Datum) -> Result<(), CodecError>;

    fn read_type(r: &mut ByteReader<'_>) -> Result<TermType, CodecError>;
    fn read_bt(r: &mut ByteReader<'_>) -> Result<BacktraceId, CodecError>;
    fn read_len(r: &mut ByteReader<'_>) -> Result<u64, CodecError>;
    fn read_datum(r: &mut ByteReader<'_>) -> Result<Datum, CodecError>;

    fn write_str(out: &mut Vec<u8>, s: &str) -> Result<(), CodecError> {
        Self::write_len(out, "string length", s.len())?;
        out.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn read_str(r: &mut ByteReader<'_>) -> Result<String, CodecError> {
        let offset = r.offset();
        let len = Self::read_len(r)?;
        let len = usize::try_from(len).map_err(|_| CodecError::Truncated {
            offset,
            needed: usize::MAX,
        })?;
        let bytes = r.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}

/// Fixed-width little-endian fields.
pub(super) struct V1;

impl Format for V1 {
    const VERSION: ClusterVersion = ClusterVersion::V1;
    // type + bt + argc + optc + literal marker
    const MIN_TERM_SIZE: usize = 2 + 4 + 4 + 4 + 1;

    fn write_type(out: &mut Vec<u8>, term_type: TermType) {
        out.extend_from_slice(&term_type.code().to_le_bytes());
    }

    fn write_bt(out: &mut Vec<u8>, bt: BacktraceId) {
        out.extend_from_slice(&bt.as_u32().to_le_bytes());
    }

    fn write_len(out: &mut Vec<u8>, what: &'static str, len: usize) -> Result<(), CodecError> {
        let len = u32::try_from(len).map_err(|_| CodecError::FieldOverflow {
            what,
            value: len,
            version: Self::VERSION,
        })?;
        out.extend_from_slice(&len.to_le_bytes());
        Ok(())
    }

    fn write_datum(out: &mut Vec<u8>, datum: &Datum) -> Result<(), CodecError> {
        V1Datum::write(out, datum)
    }

    fn read_type(r: &mut ByteReader<'_>) -> Result<TermType, CodecError> {
        let code = r.u16_le()?;
        TermType::from_code(code.into()).ok_or(CodecError::UnknownTermType(code.into()))
    }

    fn read_bt(r: &mut ByteReader<'_>) -> Result<BacktraceId, CodecError> {
        r.u32_le().map(BacktraceId::from_raw)
    }

    fn read_len(r: &mut ByteReader<'_>) -> Result<u64, CodecError> {
        r.u32_le().map(u64::from)
    }

    fn read_datum(r: &mut ByteReader<'_>) -> Result<Datum, CodecError> {
        V1Datum::read(r)
    }
}

/// LEB128 fields with a postcard literal payload.
pub(super) struct V2;

impl Format for V2 {
    const VERSION: ClusterVersion = ClusterVersion::V2;
    const MIN_TERM_SIZE: usize = 5;

    fn write_type(out: &mut Vec<u8>, term_type: TermType) {
        write_varint(out, term_type.code().into());
    }

    fn write_bt(out: &mut Vec<u8>, bt: BacktraceId) {
        write_varint(out, bt.as_u32().into());
    }

    fn write_len(out: &mut Vec<u8>, _what: &'static str, len: usize) -> Result<(), CodecError> {
        write_varint(out, len as u64);
        Ok(())
    }

    fn write_datum(out: &mut Vec<u8>, datum: &Datum) -> Result<(), CodecError> {
        let payload = V2Datum::encode(datum)?;
        Self::write_len(out, "literal length", payload.len())?;
        out.extend_from_slice(&payload);
        Ok(())
    }

    fn read_type(r: &mut ByteReader<'_>) -> Result<TermType, CodecError> {
        let code = r.varint()?;
        i64::try_from(code)
            .ok()
            .and_then(TermType::from_code)
            .ok_or(CodecError::UnknownTermType(code))
    }

    fn read_bt(r: &mut ByteReader<'_>) -> Result<BacktraceId, CodecError> {
        let raw = r.varint()?;
        u32::try_from(raw)
            .map(BacktraceId::from_raw)
            .map_err(|_| CodecError::ValueOutOfRange {
                what: "position id",
                value: raw,
            })
    }

    fn read_len(r: &mut ByteReader<'_>) -> Result<u64, CodecError> {
        r.varint()
    }

    fn read_datum(r: &mut ByteReader<'_>) -> Result<Datum, CodecError> {
        let offset = r.offset();
        let len = Self::read_len(r)?;
        if len > r.remaining() as u64 {
            return Err(CodecError::Truncated {
                offset: r.offset(),
                needed: (len - r.remaining() as u64).try_into().unwrap_or(usize::MAX),
            });
        }
        V2Datum::decode(r.take(len as usize)?, offset)
    }
}
