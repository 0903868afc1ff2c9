use std::net::IpAddr;

use cql_wire::ProtocolVersion;
use cql_wire::framing::{encode_bytes, encode_count_header, encode_sized};
use cql_wire::primitives::{
    encode_byte, encode_double, encode_float, encode_int8, encode_int16, encode_int32,
    encode_int64, encode_uint32, encode_uuid,
};
use uuid::Uuid;

use crate::error::EncodeError;

/// Largest count a 4-byte signed header can carry.
const MAX_COUNT_V3: usize = 0x7FFF_FFFF;

/// Encoder for cell payloads, the bytes a `Value` views.
///
/// Scalar methods return the payload directly. Composite methods take
/// already-encoded element payloads (`None` for a null element) and frame
/// them the way the configured protocol version requires:
///
/// ```text
/// ┌────────────┬─────────────────────────────────────────────────────┐
/// │ Shape      │ Layout                                              │
/// ├────────────┼─────────────────────────────────────────────────────┤
/// │ list / set │ count header + n × element                          │
/// │ map        │ count header + n × (key element, value element)     │
/// │ tuple / udt│ n × [bytes], no header                              │
/// └────────────┴─────────────────────────────────────────────────────┘
///
///   count header / element prefix: 4-byte signed from v3, 2-byte before
/// ```
///
/// # Usage
///
/// ```rust
/// use cql_encoder::ValueEncoder;
/// use cql_wire::ProtocolVersion;
///
/// let enc = ValueEncoder::new(ProtocolVersion::V4);
/// let list = enc
///     .list(&[Some(enc.int(1)), Some(enc.int(2))])
///     .unwrap();
/// assert_eq!(list.len(), 4 + 2 * (4 + 4));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueEncoder {
    version: ProtocolVersion,
}

impl ValueEncoder {
    #[must_use]
    pub fn new(version: ProtocolVersion) -> Self {
        Self { version }
    }

    #[must_use]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    // ── Scalars ───────────────────────────────────────────────────────

    #[must_use]
    pub fn int(&self, value: i32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4);
        encode_int32(&mut buf, value);
        buf
    }

    /// Payload for `bigint`, `counter` and `timestamp`.
    #[must_use]
    pub fn bigint(&self, value: i64) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8);
        encode_int64(&mut buf, value);
        buf
    }

    #[must_use]
    pub fn smallint(&self, value: i16) -> Vec<u8> {
        let mut buf = Vec::with_capacity(2);
        encode_int16(&mut buf, value);
        buf
    }

    #[must_use]
    pub fn tinyint(&self, value: i8) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1);
        encode_int8(&mut buf, value);
        buf
    }

    /// Days since the epoch, centered on 2^31.
    #[must_use]
    pub fn date(&self, value: u32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4);
        encode_uint32(&mut buf, value);
        buf
    }

    /// Nanoseconds since midnight.
    #[must_use]
    pub fn time(&self, value: i64) -> Vec<u8> {
        self.bigint(value)
    }

    #[must_use]
    pub fn float(&self, value: f32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4);
        encode_float(&mut buf, value);
        buf
    }

    #[must_use]
    pub fn double(&self, value: f64) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8);
        encode_double(&mut buf, value);
        buf
    }

    #[must_use]
    pub fn boolean(&self, value: bool) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1);
        encode_byte(&mut buf, u8::from(value));
        buf
    }

    /// Payload for `uuid` and `timeuuid`.
    #[must_use]
    pub fn uuid(&self, value: Uuid) -> Vec<u8> {
        let mut buf = Vec::with_capacity(16);
        encode_uuid(&mut buf, value.as_bytes());
        buf
    }

    /// 4 bytes for IPv4, 16 for IPv6.
    #[must_use]
    pub fn inet(&self, value: IpAddr) -> Vec<u8> {
        match value {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    /// Payload for `text`, `varchar` and `ascii`: the raw UTF-8 bytes.
    #[must_use]
    pub fn text(&self, value: &str) -> Vec<u8> {
        value.as_bytes().to_vec()
    }

    #[must_use]
    pub fn blob(&self, value: &[u8]) -> Vec<u8> {
        value.to_vec()
    }

    /// Minimal big-endian two's-complement bytes of `value`.
    #[must_use]
    pub fn varint(&self, value: i128) -> Vec<u8> {
        minimal_twos_complement(value)
    }

    /// `decimal` from a scale and pre-encoded unscaled varint bytes.
    #[must_use]
    pub fn decimal(&self, scale: i32, unscaled: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + unscaled.len());
        encode_int32(&mut buf, scale);
        buf.extend_from_slice(unscaled);
        buf
    }

    /// `decimal` whose unscaled part fits an `i128`.
    #[must_use]
    pub fn decimal_i128(&self, scale: i32, unscaled: i128) -> Vec<u8> {
        self.decimal(scale, &minimal_twos_complement(unscaled))
    }

    // ── Composites ────────────────────────────────────────────────────

    /// A list payload from encoded element payloads.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::TooManyElements`] if the count does not fit the header.
    /// - [`EncodeError::Wire`] for an oversized element, or a null element
    ///   before v3.
    pub fn list(&self, items: &[Option<Vec<u8>>]) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.write_count(&mut buf, items.len())?;
        for item in items {
            encode_sized(&mut buf, item.as_deref(), self.version)?;
        }
        Ok(buf)
    }

    /// A set payload. Sets share the list layout.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn set(&self, items: &[Option<Vec<u8>>]) -> Result<Vec<u8>, EncodeError> {
        self.list(items)
    }

    /// A map payload from encoded `(key, value)` payload pairs.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn map(&self, entries: &[(Option<Vec<u8>>, Option<Vec<u8>>)]) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.write_count(&mut buf, entries.len())?;
        for (key, value) in entries {
            encode_sized(&mut buf, key.as_deref(), self.version)?;
            encode_sized(&mut buf, value.as_deref(), self.version)?;
        }
        Ok(buf)
    }

    /// A tuple payload: each component as `[bytes]`, no header.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Wire`] if a component is longer than `i32::MAX`.
    pub fn tuple(&self, components: &[Option<Vec<u8>>]) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        for component in components {
            encode_bytes(&mut buf, component.as_deref())?;
        }
        Ok(buf)
    }

    /// A user type payload. Fields are framed like tuple components; a
    /// shorter slice than the declared field list leaves the tail null.
    ///
    /// # Errors
    ///
    /// Same as [`tuple`](Self::tuple).
    pub fn udt(&self, fields: &[Option<Vec<u8>>]) -> Result<Vec<u8>, EncodeError> {
        self.tuple(fields)
    }

    /// Frame a payload as a row cell: `[bytes]`, `None` as length `-1`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Wire`] if the payload is longer than `i32::MAX`.
    pub fn cell(&self, payload: Option<&[u8]>) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(4 + payload.map_or(0, <[u8]>::len));
        encode_bytes(&mut buf, payload)?;
        Ok(buf)
    }

    fn write_count(&self, buf: &mut Vec<u8>, count: usize) -> Result<(), EncodeError> {
        let limit = if self.version.count_width() == 4 {
            MAX_COUNT_V3
        } else {
            usize::from(u16::MAX)
        };
        if count > limit {
            return Err(EncodeError::TooManyElements {
                count,
                limit,
                version: self.version.raw(),
            });
        }
        encode_count_header(buf, count, self.version)?;
        Ok(())
    }
}

/// Shortest big-endian two's-complement encoding of `value`.
///
/// Zero encodes as a single `0x00` byte.
fn minimal_twos_complement(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_wire::WireError;

    #[test]
    fn varint_is_minimal() {
        let enc = ValueEncoder::default();
        assert_eq!(enc.varint(0), [0x00]);
        assert_eq!(enc.varint(127), [0x7F]);
        assert_eq!(enc.varint(128), [0x00, 0x80]);
        assert_eq!(enc.varint(-1), [0xFF]);
        assert_eq!(enc.varint(-128), [0x80]);
        assert_eq!(enc.varint(-129), [0xFF, 0x7F]);
    }

    #[test]
    fn decimal_layout() {
        let enc = ValueEncoder::default();
        assert_eq!(enc.decimal_i128(2, 12345), [0, 0, 0, 2, 0x30, 0x39]);
    }

    #[test]
    fn list_v4_layout() {
        let enc = ValueEncoder::new(ProtocolVersion::V4);
        let payload = enc.list(&[Some(enc.tinyint(5)), None]).unwrap();
        assert_eq!(payload, [0, 0, 0, 2, 0, 0, 0, 1, 5, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn list_v2_layout() {
        let enc = ValueEncoder::new(ProtocolVersion::V2);
        let payload = enc.set(&[Some(enc.tinyint(5))]).unwrap();
        assert_eq!(payload, [0, 1, 0, 1, 5]);
    }

    #[test]
    fn null_element_before_v3_fails() {
        let enc = ValueEncoder::new(ProtocolVersion::V2);
        let result = enc.list(&[None]);
        assert!(matches!(
            result,
            Err(EncodeError::Wire(WireError::UnrepresentableNull { version: 2 }))
        ));
    }

    #[test]
    fn too_many_elements_v2() {
        let enc = ValueEncoder::new(ProtocolVersion::V1);
        let items = vec![Some(Vec::new()); usize::from(u16::MAX) + 1];
        assert!(matches!(
            enc.list(&items),
            Err(EncodeError::TooManyElements { limit: 65535, .. })
        ));
    }

    #[test]
    fn map_interleaves_keys_and_values() {
        let enc = ValueEncoder::new(ProtocolVersion::V3);
        let payload = enc
            .map(&[(Some(enc.text("a")), Some(enc.boolean(true)))])
            .unwrap();
        assert_eq!(payload, [0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 1, 1]);
    }

    #[test]
    fn tuple_ignores_protocol_version() {
        let v2 = ValueEncoder::new(ProtocolVersion::V2);
        let v4 = ValueEncoder::new(ProtocolVersion::V4);
        let components = [Some(v2.int(1)), None];
        assert_eq!(v2.tuple(&components).unwrap(), v4.tuple(&components).unwrap());
    }

    #[test]
    fn cell_framing() {
        let enc = ValueEncoder::default();
        assert_eq!(enc.cell(None).unwrap(), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(enc.cell(Some(&[7])).unwrap(), [0, 0, 0, 1, 7]);
    }

    #[test]
    fn inet_lengths() {
        let enc = ValueEncoder::default();
        assert_eq!(enc.inet("10.0.0.1".parse().unwrap()).len(), 4);
        assert_eq!(enc.inet("::1".parse().unwrap()).len(), 16);
    }
}
