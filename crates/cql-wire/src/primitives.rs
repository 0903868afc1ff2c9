use crate::error::WireError;

// Every decoder here reads from the front of `buf` and returns
// `(value, bytes_consumed)`, the same shape as a varint reader. Callers
// slice past `bytes_consumed` to continue. Nothing is copied except the
// fixed-width value itself.

/// Copy the first `N` bytes of `buf` into an array.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if `buf` holds fewer than `N` bytes.
fn take<const N: usize>(buf: &[u8]) -> Result<[u8; N], WireError> {
    buf.get(..N)
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or(WireError::UnexpectedEof {
            offset: buf.len(),
            needed: N - buf.len().min(N),
        })
}

/// Decode a big-endian `[byte]`.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] on empty input.
pub fn decode_byte(buf: &[u8]) -> Result<(u8, usize), WireError> {
    let [b] = take::<1>(buf)?;
    Ok((b, 1))
}

/// Decode a signed 8-bit integer (`tinyint`).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] on empty input.
pub fn decode_int8(buf: &[u8]) -> Result<(i8, usize), WireError> {
    Ok((i8::from_be_bytes(take(buf)?), 1))
}

/// Decode a big-endian signed 16-bit integer (`smallint`).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
pub fn decode_int16(buf: &[u8]) -> Result<(i16, usize), WireError> {
    Ok((i16::from_be_bytes(take(buf)?), 2))
}

/// Decode a big-endian `[short]` (unsigned 16-bit).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
pub fn decode_uint16(buf: &[u8]) -> Result<(u16, usize), WireError> {
    Ok((u16::from_be_bytes(take(buf)?), 2))
}

/// Decode a big-endian `[int]` (signed 32-bit).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
pub fn decode_int32(buf: &[u8]) -> Result<(i32, usize), WireError> {
    Ok((i32::from_be_bytes(take(buf)?), 4))
}

/// Decode a big-endian unsigned 32-bit integer (`date`).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
pub fn decode_uint32(buf: &[u8]) -> Result<(u32, usize), WireError> {
    Ok((u32::from_be_bytes(take(buf)?), 4))
}

/// Decode a big-endian `[long]` (signed 64-bit).
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
pub fn decode_int64(buf: &[u8]) -> Result<(i64, usize), WireError> {
    Ok((i64::from_be_bytes(take(buf)?), 8))
}

/// Decode a big-endian IEEE 754 single-precision float.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
pub fn decode_float(buf: &[u8]) -> Result<(f32, usize), WireError> {
    Ok((f32::from_be_bytes(take(buf)?), 4))
}

/// Decode a big-endian IEEE 754 double-precision float.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
pub fn decode_double(buf: &[u8]) -> Result<(f64, usize), WireError> {
    Ok((f64::from_be_bytes(take(buf)?), 8))
}

/// Decode a 16-byte `[uuid]` in network byte order.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 16 bytes remain.
pub fn decode_uuid(buf: &[u8]) -> Result<([u8; 16], usize), WireError> {
    Ok((take(buf)?, 16))
}

// ── Encoding ──────────────────────────────────────────────────────────
//
// Encoders append to a `Vec<u8>`; they cannot fail.

pub fn encode_byte(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

pub fn encode_int8(buf: &mut Vec<u8>, value: i8) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_int16(buf: &mut Vec<u8>, value: i16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_uint16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_int32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_uint32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_int64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_float(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_double(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_uuid(buf: &mut Vec<u8>, value: &[u8; 16]) {
    buf.extend_from_slice(value);
}
