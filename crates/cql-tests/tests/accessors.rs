//! Accessor contract tests.
//!
//! Every typed accessor checks in the same order: null, declared type,
//! payload width. These tests pin that order down across the whole
//! accessor table, then check the decoders themselves on payloads built
//! by the encoder.

use cql_encoder::ValueEncoder;
use cql_tests::{prim, ty};
use cql_types::ValueType;
use cql_value::{Value, ValueError};
use cql_wire::ProtocolVersion;
use uuid::Uuid;

const V4: ProtocolVersion = ProtocolVersion::V4;

fn value(value_type: ValueType, payload: &[u8]) -> Value<'_> {
    Value::new(V4, prim(value_type), Some(payload)).expect("scalar construction never fails")
}

fn null(value_type: ValueType) -> Value<'static> {
    Value::new(V4, prim(value_type), None).expect("null construction never fails")
}

/// Run every accessor and report which error kind each one produced.
fn outcomes(v: &Value<'_>) -> Vec<(&'static str, Result<(), String>)> {
    fn kind<T>(r: Result<T, ValueError>) -> Result<(), String> {
        r.map(|_| ()).map_err(|e| match e {
            ValueError::NullValue => "null".to_string(),
            ValueError::InvalidValueType { .. } => "type".to_string(),
            ValueError::InvalidLength { .. } => "length".to_string(),
            ValueError::InvalidUtf8 { .. } => "utf8".to_string(),
            ValueError::Wire(_) => "wire".to_string(),
        })
    }
    vec![
        ("as_i32", kind(v.as_i32())),
        ("as_i64", kind(v.as_i64())),
        ("as_i16", kind(v.as_i16())),
        ("as_i8", kind(v.as_i8())),
        ("as_date", kind(v.as_date())),
        ("as_time", kind(v.as_time())),
        ("as_f32", kind(v.as_f32())),
        ("as_f64", kind(v.as_f64())),
        ("as_bool", kind(v.as_bool())),
        ("as_uuid", kind(v.as_uuid())),
        ("as_inet", kind(v.as_inet())),
        ("as_str", kind(v.as_str())),
        ("as_bytes", kind(v.as_bytes())),
        ("as_decimal", kind(v.as_decimal())),
    ]
}

// ── Check order ───────────────────────────────────────────────────────────────

#[test]
fn null_is_reported_before_type_for_every_accessor() {
    let types = [
        prim(ValueType::Int),
        prim(ValueType::Text),
        prim(ValueType::Blob),
        ty("ks.point<x: int, y: int>"),
        ty("list<int>"),
    ];
    for data_type in types {
        let v = Value::null(V4, data_type);
        for (name, outcome) in outcomes(&v) {
            assert_eq!(
                outcome,
                Err("null".to_string()),
                "{name} on null {} should report null",
                v.data_type()
            );
        }
    }
}

#[test]
fn wrong_type_is_reported_for_non_null() {
    // A 4-byte int payload: every accessor that does not accept `int` must
    // reject it on type, not on length.
    let v = value(ValueType::Int, &[0, 0, 0, 1]);
    for (name, outcome) in outcomes(&v) {
        if name == "as_i32" {
            assert_eq!(outcome, Ok(()));
        } else {
            assert_eq!(outcome, Err("type".to_string()), "{name} on int");
        }
    }
}

#[test]
fn wrong_width_is_reported_after_type() {
    let v = value(ValueType::BigInt, &[0, 0, 0, 1]);
    assert!(matches!(
        v.as_i64(),
        Err(ValueError::InvalidLength {
            value_type: ValueType::BigInt,
            actual: 4
        })
    ));
    assert!(matches!(v.as_i32(), Err(ValueError::InvalidValueType { .. })));
}

#[test]
fn invalid_value_type_names_both_sides() {
    let v = value(ValueType::Float, &[0, 0, 0, 0]);
    match v.as_uuid() {
        Err(ValueError::InvalidValueType { expected, actual }) => {
            assert_eq!(expected, &[ValueType::Uuid, ValueType::TimeUuid]);
            assert_eq!(actual, ValueType::Float);
        }
        other => panic!("expected InvalidValueType, got {other:?}"),
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

#[test]
fn int32_extremes() {
    let enc = ValueEncoder::new(V4);
    for n in [0, 1, -1, i32::MIN, i32::MAX] {
        let payload = enc.int(n);
        assert_eq!(value(ValueType::Int, &payload).as_i32().unwrap(), n);
    }
}

#[test]
fn int64_family_decodes_identically() {
    let payload = ValueEncoder::new(V4).bigint(-1_234_567_890_123);
    for value_type in [ValueType::BigInt, ValueType::Counter, ValueType::Timestamp] {
        assert_eq!(
            value(value_type, &payload).as_i64().unwrap(),
            -1_234_567_890_123,
            "{value_type}"
        );
    }
}

#[test]
fn uuid_and_timeuuid() {
    let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
    let payload = ValueEncoder::new(V4).uuid(id);
    assert_eq!(value(ValueType::Uuid, &payload).as_uuid().unwrap(), id);
    assert_eq!(value(ValueType::TimeUuid, &payload).as_uuid().unwrap(), id);
}

#[test]
fn small_ints_and_floats() {
    let enc = ValueEncoder::new(V4);
    assert_eq!(value(ValueType::SmallInt, &enc.smallint(-300)).as_i16().unwrap(), -300);
    assert_eq!(value(ValueType::TinyInt, &enc.tinyint(-7)).as_i8().unwrap(), -7);
    assert!((value(ValueType::Float, &enc.float(2.5)).as_f32().unwrap() - 2.5).abs() < f32::EPSILON);
    assert!((value(ValueType::Double, &enc.double(-0.125)).as_f64().unwrap() + 0.125).abs() < f64::EPSILON);
}

#[test]
fn date_and_time() {
    let enc = ValueEncoder::new(V4);
    assert_eq!(value(ValueType::Date, &enc.date(1 << 31)).as_date().unwrap(), 1 << 31);
    assert_eq!(value(ValueType::Time, &enc.time(42)).as_time().unwrap(), 42);
}

#[test]
fn boolean_is_any_nonzero_byte() {
    assert!(!value(ValueType::Boolean, &[0]).as_bool().unwrap());
    assert!(value(ValueType::Boolean, &[1]).as_bool().unwrap());
    assert!(value(ValueType::Boolean, &[0x80]).as_bool().unwrap());
}

#[test]
fn inet_v4_v6_and_bad_length() {
    let enc = ValueEncoder::new(V4);
    let v4 = enc.inet("127.0.0.1".parse().unwrap());
    let inet = value(ValueType::Inet, &v4).as_inet().unwrap();
    assert_eq!(inet.len(), 4);
    assert_eq!(inet.to_string(), "127.0.0.1");

    let v6 = enc.inet("fe80::1".parse().unwrap());
    assert_eq!(value(ValueType::Inet, &v6).as_inet().unwrap().len(), 16);

    assert!(matches!(
        value(ValueType::Inet, &[1, 2, 3]).as_inet(),
        Err(ValueError::InvalidLength { actual: 3, .. })
    ));
}

#[test]
fn text_aliases_payload() {
    let payload = b"hello, world";
    for value_type in [ValueType::Ascii, ValueType::Text, ValueType::Varchar] {
        let v = value(value_type, payload);
        let s = v.as_str().unwrap();
        assert_eq!(s, "hello, world");
        assert_eq!(s.as_ptr(), payload.as_ptr());
        assert_eq!(s.len(), payload.len());
    }
}

#[test]
fn text_rejects_invalid_utf8() {
    assert!(matches!(
        value(ValueType::Text, &[0xFF, 0xFE]).as_str(),
        Err(ValueError::InvalidUtf8 { value_type: ValueType::Text })
    ));
}

#[test]
fn bytes_alias_payload_for_blob_like_types() {
    let payload = [0xDE, 0xAD, 0xBE, 0xEF];
    for value_type in [
        ValueType::Blob,
        ValueType::Custom,
        ValueType::Varint,
        ValueType::Decimal,
        ValueType::Text,
    ] {
        let v = value(value_type, &payload);
        let bytes = v.as_bytes().unwrap();
        assert!(std::ptr::eq(bytes, &payload[..]), "{value_type}");
    }
    assert!(matches!(
        value(ValueType::Int, &payload).as_bytes(),
        Err(ValueError::InvalidValueType { .. })
    ));
}

#[test]
fn empty_blob_is_not_null() {
    let v = value(ValueType::Blob, &[]);
    assert!(!v.is_null());
    assert_eq!(v.as_bytes().unwrap(), &[] as &[u8]);
}

#[test]
fn decimal_scale_two() {
    // [scale = 2][unscaled = 12345]
    let payload = [0x00, 0x00, 0x00, 0x02, 0x30, 0x39];
    let dec = value(ValueType::Decimal, &payload).as_decimal().unwrap();
    assert_eq!(dec.scale(), 2);
    assert_eq!(dec.unscaled(), &[0x30, 0x39]);
    assert!(std::ptr::eq(dec.unscaled(), &payload[4..]));
    assert_eq!(dec.unscaled_i128(), Some(12345));
    assert_eq!(dec.to_string(), "123.45");
}

#[test]
fn decimal_shorter_than_scale() {
    assert!(matches!(
        value(ValueType::Decimal, &[0, 0]).as_decimal(),
        Err(ValueError::InvalidLength { actual: 2, .. })
    ));
}

#[test]
fn raw_ignores_declared_type() {
    let payload = [9, 9];
    assert_eq!(value(ValueType::Int, &payload).raw(), Some(&payload[..]));
    assert_eq!(null(ValueType::Int).raw(), None);
}
