//! Length-prefixed framings used by the native protocol.
//!
//! ```text
//! ┌──────────────┬───────────────────────────┬──────────────────────────┐
//! │ Notation     │ Prefix                    │ Null                     │
//! ├──────────────┼───────────────────────────┼──────────────────────────┤
//! │ [bytes]      │ [int] length              │ length < 0               │
//! │ [short bytes]│ [short] length            │ not representable        │
//! │ [string]     │ [short] length, UTF-8     │ not representable        │
//! │ count header │ [int] (v3+) / [short]     │ negative [int] = corrupt │
//! └──────────────┴───────────────────────────┴──────────────────────────┘
//! ```
//!
//! A `Some(slice)` result always borrows from the input; these readers
//! never allocate.

use crate::error::WireError;
use crate::primitives::{decode_int32, decode_uint16, encode_int32, encode_uint16};
use crate::protocol::ProtocolVersion;

/// Decode a collection element count header.
///
/// The header is 4 bytes for protocol v3 and later and 2 bytes before
/// that. Returns `(count, header_width)`.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if `buf` is shorter than the header.
/// - [`WireError::NegativeCount`] if a 4-byte header is negative.
pub fn decode_count_header(
    buf: &[u8],
    version: ProtocolVersion,
) -> Result<(usize, usize), WireError> {
    if version.count_width() == 4 {
        let (count, n) = decode_int32(buf)?;
        let count = usize::try_from(count).map_err(|_| WireError::NegativeCount { count })?;
        Ok((count, n))
    } else {
        let (count, n) = decode_uint16(buf)?;
        Ok((usize::from(count), n))
    }
}

/// Decode a `[bytes]` value: `[int]` length followed by that many bytes.
///
/// A negative length is a null and consumes only the 4-byte prefix.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if the prefix or the body is truncated.
pub fn decode_bytes(buf: &[u8]) -> Result<(Option<&[u8]>, usize), WireError> {
    let (len, n) = decode_int32(buf)?;
    let Ok(len) = usize::try_from(len) else {
        return Ok((None, n));
    };
    let body = take_body(buf, n, len)?;
    Ok((Some(body), n + len))
}

/// Decode a `[short bytes]` value: `[short]` length followed by the bytes.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if the prefix or the body is truncated.
pub fn decode_short_bytes(buf: &[u8]) -> Result<(&[u8], usize), WireError> {
    let (len, n) = decode_uint16(buf)?;
    let len = usize::from(len);
    let body = take_body(buf, n, len)?;
    Ok((body, n + len))
}

/// Decode one collection element using the framing of `version`.
///
/// v3+ elements are `[bytes]` (nullable); earlier elements are
/// `[short bytes]` and are never null.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if the element is truncated.
pub fn decode_sized(
    buf: &[u8],
    version: ProtocolVersion,
) -> Result<(Option<&[u8]>, usize), WireError> {
    if version.count_width() == 4 {
        decode_bytes(buf)
    } else {
        let (body, n) = decode_short_bytes(buf)?;
        Ok((Some(body), n))
    }
}

/// Decode a `[string]`: `[short]` length followed by UTF-8 bytes.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if the string is truncated.
/// - [`WireError::InvalidUtf8`] if the bytes are not UTF-8.
pub fn decode_string(buf: &[u8]) -> Result<(&str, usize), WireError> {
    let (body, n) = decode_short_bytes(buf)?;
    let text = std::str::from_utf8(body).map_err(|_| WireError::InvalidUtf8 { offset: 2 })?;
    Ok((text, n))
}

fn take_body(buf: &[u8], start: usize, len: usize) -> Result<&[u8], WireError> {
    let end = start.checked_add(len).ok_or(WireError::LengthOverflow {
        length: len,
        width: 4,
    })?;
    buf.get(start..end).ok_or_else(|| WireError::UnexpectedEof {
        offset: buf.len(),
        needed: end - buf.len(),
    })
}

// ── Encoding ──────────────────────────────────────────────────────────

/// Append a count header of the width `version` requires.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if `count` does not fit the header.
pub fn encode_count_header(
    buf: &mut Vec<u8>,
    count: usize,
    version: ProtocolVersion,
) -> Result<(), WireError> {
    write_size(buf, count, version.count_width())
}

/// Append a `[bytes]` value; `None` is written as length `-1`.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if the body is longer than `i32::MAX`.
pub fn encode_bytes(buf: &mut Vec<u8>, value: Option<&[u8]>) -> Result<(), WireError> {
    match value {
        None => encode_int32(buf, -1),
        Some(body) => {
            write_size(buf, body.len(), 4)?;
            buf.extend_from_slice(body);
        }
    }
    Ok(())
}

/// Append one collection element using the framing of `version`.
///
/// # Errors
///
/// - [`WireError::LengthOverflow`] if the body does not fit the prefix.
/// - [`WireError::UnrepresentableNull`] for a null element before v3.
pub fn encode_sized(
    buf: &mut Vec<u8>,
    value: Option<&[u8]>,
    version: ProtocolVersion,
) -> Result<(), WireError> {
    if version.count_width() == 4 {
        return encode_bytes(buf, value);
    }
    let body = value.ok_or(WireError::UnrepresentableNull {
        version: version.raw(),
    })?;
    write_size(buf, body.len(), 2)?;
    buf.extend_from_slice(body);
    Ok(())
}

/// Append a `[string]`.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if the string is longer than `u16::MAX` bytes.
pub fn encode_string(buf: &mut Vec<u8>, value: &str) -> Result<(), WireError> {
    write_size(buf, value.len(), 2)?;
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Write a `[bytes]` cell to an I/O sink.
///
/// # Returns
///
/// Total number of bytes written.
///
/// # Errors
///
/// - [`WireError::LengthOverflow`] if the body is longer than `i32::MAX`.
/// - [`WireError::Io`] if the writer fails.
pub fn write_cell(w: &mut impl std::io::Write, value: Option<&[u8]>) -> Result<usize, WireError> {
    let mut prefix = Vec::with_capacity(4);
    match value {
        None => {
            encode_int32(&mut prefix, -1);
            w.write_all(&prefix)?;
            Ok(prefix.len())
        }
        Some(body) => {
            write_size(&mut prefix, body.len(), 4)?;
            w.write_all(&prefix)?;
            w.write_all(body)?;
            Ok(prefix.len() + body.len())
        }
    }
}

fn write_size(buf: &mut Vec<u8>, length: usize, width: usize) -> Result<(), WireError> {
    let overflow = WireError::LengthOverflow { length, width };
    if width == 4 {
        encode_int32(buf, i32::try_from(length).map_err(|_| overflow)?);
    } else {
        encode_uint16(buf, u16::try_from(length).map_err(|_| overflow)?);
    }
    Ok(())
}
