use cql_types::ValueType;
use cql_wire::WireError;
use cql_wire::primitives::{
    decode_byte, decode_double, decode_float, decode_int8, decode_int16, decode_int32,
    decode_int64, decode_uint32, decode_uuid,
};
use uuid::Uuid;

use crate::decimal::Decimal;
use crate::error::ValueError;
use crate::inet::Inet;
use crate::value::Value;

// ── Accepted declared types per accessor ──────────────────────────────
//
// Several logical types share one wire encoding; the accessor for that
// encoding accepts all of them.

const INT: &[ValueType] = &[ValueType::Int];
const INT64: &[ValueType] = &[ValueType::BigInt, ValueType::Counter, ValueType::Timestamp];
const SMALLINT: &[ValueType] = &[ValueType::SmallInt];
const TINYINT: &[ValueType] = &[ValueType::TinyInt];
const DATE: &[ValueType] = &[ValueType::Date];
const TIME: &[ValueType] = &[ValueType::Time];
const FLOAT: &[ValueType] = &[ValueType::Float];
const DOUBLE: &[ValueType] = &[ValueType::Double];
const BOOLEAN: &[ValueType] = &[ValueType::Boolean];
const UUID: &[ValueType] = &[ValueType::Uuid, ValueType::TimeUuid];
const INET: &[ValueType] = &[ValueType::Inet];
const TEXT: &[ValueType] = &[ValueType::Ascii, ValueType::Text, ValueType::Varchar];
const BYTES: &[ValueType] = &[
    ValueType::Blob,
    ValueType::Custom,
    ValueType::Varint,
    ValueType::Decimal,
    ValueType::Ascii,
    ValueType::Text,
    ValueType::Varchar,
];
const DECIMAL: &[ValueType] = &[ValueType::Decimal];

/// Typed accessors.
///
/// Every accessor runs the same three checks before decoding:
///
///   1. null → [`ValueError::NullValue`]
///   2. declared type not in the accepted set → [`ValueError::InvalidValueType`]
///   3. payload width wrong → [`ValueError::InvalidLength`]
///
/// ```text
/// ┌──────────────┬───────────────────────────────┬─────────────┬──────────┐
/// │ Accessor     │ Accepted declared types       │ Output      │ Copies?  │
/// ├──────────────┼───────────────────────────────┼─────────────┼──────────┤
/// │ as_i32       │ int                           │ i32         │ value    │
/// │ as_i64       │ bigint, counter, timestamp    │ i64         │ value    │
/// │ as_i16       │ smallint                      │ i16         │ value    │
/// │ as_i8        │ tinyint                       │ i8          │ value    │
/// │ as_date      │ date                          │ u32         │ value    │
/// │ as_time      │ time                          │ i64         │ value    │
/// │ as_f32       │ float                         │ f32         │ value    │
/// │ as_f64       │ double                        │ f64         │ value    │
/// │ as_bool      │ boolean                       │ bool        │ value    │
/// │ as_uuid      │ uuid, timeuuid                │ Uuid        │ value    │
/// │ as_inet      │ inet                          │ Inet        │ 4/16 B   │
/// │ as_str       │ ascii, text, varchar          │ &'a str     │ no       │
/// │ as_bytes     │ blob, custom, varint, decimal,│ &'a [u8]    │ no       │
/// │              │ ascii, text, varchar          │             │          │
/// │ as_decimal   │ decimal                       │ Decimal<'a> │ no       │
/// └──────────────┴───────────────────────────────┴─────────────┴──────────┘
/// ```
impl<'a> Value<'a> {
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `int`, `InvalidLength` unless 4 bytes.
    pub fn as_i32(&self) -> Result<i32, ValueError> {
        self.fixed(INT, 4, decode_int32)
    }

    /// Decode a 64-bit integer.
    ///
    /// `bigint`, `counter` and `timestamp` all use the same 8-byte
    /// big-endian encoding and are accepted interchangeably. A timestamp
    /// is milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`, `InvalidLength` unless 8 bytes.
    pub fn as_i64(&self) -> Result<i64, ValueError> {
        self.fixed(INT64, 8, decode_int64)
    }

    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `smallint`, `InvalidLength` unless 2 bytes.
    pub fn as_i16(&self) -> Result<i16, ValueError> {
        self.fixed(SMALLINT, 2, decode_int16)
    }

    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `tinyint`, `InvalidLength` unless 1 byte.
    pub fn as_i8(&self) -> Result<i8, ValueError> {
        self.fixed(TINYINT, 1, decode_int8)
    }

    /// Raw `date`: days since the epoch, biased by 2^31.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `date`, `InvalidLength` unless 4 bytes.
    pub fn as_date(&self) -> Result<u32, ValueError> {
        self.fixed(DATE, 4, decode_uint32)
    }

    /// `time`: nanoseconds since midnight.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `time`, `InvalidLength` unless 8 bytes.
    pub fn as_time(&self) -> Result<i64, ValueError> {
        self.fixed(TIME, 8, decode_int64)
    }

    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `float`, `InvalidLength` unless 4 bytes.
    pub fn as_f32(&self) -> Result<f32, ValueError> {
        self.fixed(FLOAT, 4, decode_float)
    }

    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `double`, `InvalidLength` unless 8 bytes.
    pub fn as_f64(&self) -> Result<f64, ValueError> {
        self.fixed(DOUBLE, 8, decode_double)
    }

    /// Any nonzero byte is `true`.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType` unless `boolean`, `InvalidLength` unless 1 byte.
    pub fn as_bool(&self) -> Result<bool, ValueError> {
        self.fixed(BOOLEAN, 1, decode_byte).map(|b| b != 0)
    }

    /// Decode a `uuid` or `timeuuid`.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`, `InvalidLength` unless 16 bytes.
    pub fn as_uuid(&self) -> Result<Uuid, ValueError> {
        self.fixed(UUID, 16, decode_uuid).map(Uuid::from_bytes)
    }

    /// Copy an `inet` address into a fixed-capacity [`Inet`].
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`, `InvalidLength` unless 4 or 16 bytes.
    pub fn as_inet(&self) -> Result<Inet, ValueError> {
        let bytes = self.checked(INET)?;
        Inet::from_slice(bytes).ok_or(ValueError::InvalidLength {
            value_type: self.value_type(),
            actual: bytes.len(),
        })
    }

    /// Borrow a text payload as `&str`.
    ///
    /// The returned string aliases the value's payload: same address,
    /// same length. Only UTF-8 validity is checked.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`, `InvalidUtf8`.
    pub fn as_str(&self) -> Result<&'a str, ValueError> {
        let bytes = self.checked(TEXT)?;
        std::str::from_utf8(bytes).map_err(|_| ValueError::InvalidUtf8 {
            value_type: self.value_type(),
        })
    }

    /// Borrow the payload bytes of a blob-like value.
    ///
    /// The returned slice is the payload itself, not a copy.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`.
    pub fn as_bytes(&self) -> Result<&'a [u8], ValueError> {
        self.checked(BYTES)
    }

    /// Split a `decimal` into scale and unscaled magnitude.
    ///
    /// ```text
    ///   [int] scale │ unscaled: big-endian two's complement, rest of payload
    /// ```
    ///
    /// The unscaled bytes are borrowed from the payload.
    ///
    /// # Errors
    ///
    /// `NullValue`, `InvalidValueType`, `InvalidLength` if shorter than 4 bytes.
    pub fn as_decimal(&self) -> Result<Decimal<'a>, ValueError> {
        let bytes = self.checked(DECIMAL)?;
        let (scale, n) = decode_int32(bytes).map_err(|_| ValueError::InvalidLength {
            value_type: self.value_type(),
            actual: bytes.len(),
        })?;
        Ok(Decimal::new(scale, &bytes[n..]))
    }

    fn fixed<T>(
        &self,
        accepted: &'static [ValueType],
        width: usize,
        decode: fn(&[u8]) -> Result<(T, usize), WireError>,
    ) -> Result<T, ValueError> {
        let bytes = self.checked(accepted)?;
        if bytes.len() != width {
            return Err(ValueError::InvalidLength {
                value_type: self.value_type(),
                actual: bytes.len(),
            });
        }
        let (value, _) = decode(bytes)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use cql_types::{DataType, DataTypeRef};
    use cql_wire::ProtocolVersion;

    use super::*;

    fn value(ty: ValueType, bytes: &[u8]) -> Value<'_> {
        Value::new(ProtocolVersion::V4, DataType::primitive(ty).unwrap(), Some(bytes)).unwrap()
    }

    fn null(ty: DataTypeRef) -> Value<'static> {
        Value::new(ProtocolVersion::V4, ty, None).unwrap()
    }

    #[test]
    fn int32_boundaries() {
        for n in [0, 1, -1, i32::MIN, i32::MAX] {
            let bytes = n.to_be_bytes();
            assert_eq!(value(ValueType::Int, &bytes).as_i32().unwrap(), n);
        }
    }

    #[test]
    fn int64_accepts_three_types() {
        let bytes = (-1_234_567_890_123_i64).to_be_bytes();
        for ty in [ValueType::BigInt, ValueType::Counter, ValueType::Timestamp] {
            assert_eq!(value(ty, &bytes).as_i64().unwrap(), -1_234_567_890_123);
        }
    }

    #[test]
    fn int64_rejects_int() {
        let result = value(ValueType::Int, &[0; 8]).as_i64();
        assert!(matches!(
            result,
            Err(ValueError::InvalidValueType {
                actual: ValueType::Int,
                ..
            })
        ));
    }

    #[test]
    fn null_reported_before_type_mismatch() {
        let v = null(DataType::primitive(ValueType::Text).unwrap());
        assert!(matches!(v.as_i32(), Err(ValueError::NullValue)));
        assert!(matches!(v.as_uuid(), Err(ValueError::NullValue)));
        assert!(matches!(v.as_decimal(), Err(ValueError::NullValue)));
        assert!(matches!(v.as_str(), Err(ValueError::NullValue)));
    }

    #[test]
    fn wrong_width_rejected() {
        let result = value(ValueType::Int, &[0, 0, 1]).as_i32();
        assert!(matches!(
            result,
            Err(ValueError::InvalidLength {
                value_type: ValueType::Int,
                actual: 3
            })
        ));
    }

    #[test]
    fn bool_nonzero_is_true() {
        assert!(!value(ValueType::Boolean, &[0]).as_bool().unwrap());
        assert!(value(ValueType::Boolean, &[1]).as_bool().unwrap());
        assert!(value(ValueType::Boolean, &[0x7F]).as_bool().unwrap());
    }

    #[test]
    fn uuid_and_timeuuid() {
        let raw = *Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef).as_bytes();
        for ty in [ValueType::Uuid, ValueType::TimeUuid] {
            let uuid = value(ty, &raw).as_uuid().unwrap();
            assert_eq!(uuid.as_bytes(), &raw);
        }
    }

    #[test]
    fn floats() {
        let f = value(ValueType::Float, &2.5_f32.to_be_bytes()).as_f32().unwrap();
        let d = value(ValueType::Double, &(-0.125_f64).to_be_bytes())
            .as_f64()
            .unwrap();
        assert!((f - 2.5).abs() < f32::EPSILON);
        assert!((d + 0.125).abs() < f64::EPSILON);
    }

    #[test]
    fn small_ints_date_time() {
        assert_eq!(value(ValueType::TinyInt, &[0xFE]).as_i8().unwrap(), -2);
        assert_eq!(
            value(ValueType::SmallInt, &[0x01, 0x00]).as_i16().unwrap(),
            256
        );
        assert_eq!(
            value(ValueType::Date, &[0x80, 0, 0, 0]).as_date().unwrap(),
            1 << 31
        );
        assert_eq!(
            value(ValueType::Time, &3_600_000_000_000_i64.to_be_bytes())
                .as_time()
                .unwrap(),
            3_600_000_000_000
        );
    }

    #[test]
    fn str_aliases_payload() {
        let bytes = b"hello".to_vec();
        let v = value(ValueType::Varchar, &bytes);
        let s = v.as_str().unwrap();
        assert_eq!(s, "hello");
        assert!(std::ptr::eq(s.as_ptr(), bytes.as_ptr()));
        assert_eq!(s.len(), bytes.len());
    }

    #[test]
    fn str_rejects_blob_and_bad_utf8() {
        assert!(matches!(
            value(ValueType::Blob, b"x").as_str(),
            Err(ValueError::InvalidValueType { .. })
        ));
        assert!(matches!(
            value(ValueType::Text, &[0xFF, 0xFE]).as_str(),
            Err(ValueError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn bytes_alias_payload() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        let v = value(ValueType::Blob, &bytes);
        let out = v.as_bytes().unwrap();
        assert!(std::ptr::eq(out, &bytes[..]));
    }

    #[test]
    fn bytes_rejects_fixed_width_types() {
        assert!(matches!(
            value(ValueType::Int, &[0; 4]).as_bytes(),
            Err(ValueError::InvalidValueType { .. })
        ));
    }

    #[test]
    fn decimal_splits_scale() {
        // scale 2, unscaled 12345 = 0x3039
        let bytes = [0, 0, 0, 2, 0x30, 0x39];
        let v = value(ValueType::Decimal, &bytes);
        let dec = v.as_decimal().unwrap();
        assert_eq!(dec.scale(), 2);
        assert_eq!(dec.unscaled(), &[0x30, 0x39]);
        assert!(std::ptr::eq(dec.unscaled().as_ptr(), bytes[4..].as_ptr()));
        assert_eq!(dec.to_string(), "123.45");
    }

    #[test]
    fn decimal_too_short() {
        let result = value(ValueType::Decimal, &[0, 0]).as_decimal();
        assert!(matches!(result, Err(ValueError::InvalidLength { actual: 2, .. })));
    }

    #[test]
    fn inet_v4_and_v6() {
        let v4 = value(ValueType::Inet, &[10, 0, 0, 1]).as_inet().unwrap();
        assert_eq!(v4.len(), 4);
        assert_eq!(v4.to_string(), "10.0.0.1");

        let mut raw = [0u8; 16];
        raw[15] = 1;
        let v6 = value(ValueType::Inet, &raw).as_inet().unwrap();
        assert_eq!(v6.as_bytes(), &raw);
        assert_eq!(v6.to_string(), "::1");
    }

    #[test]
    fn inet_bad_length() {
        let result = value(ValueType::Inet, &[1, 2, 3]).as_inet();
        assert!(matches!(result, Err(ValueError::InvalidLength { actual: 3, .. })));
    }
}
