//! Walking nested values: collections of collections, tuples inside
//! maps, user types with missing trailing fields.

use cql_encoder::ValueEncoder;
use cql_tests::ty;
use cql_types::ValueType;
use cql_value::{Value, ValueError};
use cql_wire::{ProtocolVersion, WireError};

#[test]
fn map_of_lists_v4() {
    let enc = ValueEncoder::new(ProtocolVersion::V4);
    let evens = enc.list(&[Some(enc.int(2)), Some(enc.int(4))]).unwrap();
    let odds = enc.list(&[Some(enc.int(1))]).unwrap();
    let payload = enc
        .map(&[
            (Some(enc.text("even")), Some(evens)),
            (Some(enc.text("odd")), Some(odds)),
        ])
        .unwrap();

    let v = Value::new(ProtocolVersion::V4, ty("map<text, list<int>>"), Some(&payload)).unwrap();
    assert_eq!(v.item_count(), 2);

    let mut seen = Vec::new();
    for entry in v.entries().unwrap() {
        let (key, list) = entry.unwrap();
        assert_eq!(list.item_count(), list.items().unwrap().count());
        let ints: Vec<i32> = list.items().unwrap().map(|i| i.unwrap().as_i32().unwrap()).collect();
        seen.push((key.as_str().unwrap(), ints));
    }
    assert_eq!(seen, [("even", vec![2, 4]), ("odd", vec![1])]);
}

#[test]
fn nested_elements_alias_the_outer_buffer() {
    let enc = ValueEncoder::new(ProtocolVersion::V4);
    let payload = enc.list(&[Some(enc.text("abc"))]).unwrap();
    let v = Value::new(ProtocolVersion::V4, ty("list<text>"), Some(&payload)).unwrap();
    let s = v.items().unwrap().next().unwrap().unwrap().as_str().unwrap();
    // header (4) + element length (4)
    assert_eq!(s.as_ptr(), payload[8..].as_ptr());
}

#[test]
fn items_yields_map_keys_and_values_alternately() {
    let enc = ValueEncoder::new(ProtocolVersion::V3);
    let payload = enc
        .map(&[(Some(enc.int(1)), Some(enc.boolean(true)))])
        .unwrap();
    let v = Value::new(ProtocolVersion::V3, ty("map<int, boolean>"), Some(&payload)).unwrap();
    let items: Vec<Value<'_>> = v.items().unwrap().map(Result::unwrap).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].value_type(), ValueType::Int);
    assert_eq!(items[1].value_type(), ValueType::Boolean);
    assert!(items[1].as_bool().unwrap());
}

#[test]
fn tuple_inside_v2_list() {
    let enc = ValueEncoder::new(ProtocolVersion::V2);
    let pair = enc.tuple(&[Some(enc.int(5)), None]).unwrap();
    let payload = enc.list(&[Some(pair)]).unwrap();
    let v = Value::new(ProtocolVersion::V2, ty("list<frozen<tuple<int, text>>>"), Some(&payload)).unwrap();

    let tuple = v.items().unwrap().next().unwrap().unwrap();
    assert_eq!(tuple.item_count(), 2);
    let fields: Vec<_> = tuple.fields().unwrap().map(Result::unwrap).collect();
    assert_eq!(fields[0].value.as_i32().unwrap(), 5);
    assert!(fields[0].name.is_none());
    assert!(fields[1].value.is_null());
    assert_eq!(fields[1].value.value_type(), ValueType::Text);
}

#[test]
fn udt_missing_trailing_fields_read_as_null() {
    let enc = ValueEncoder::new(ProtocolVersion::V4);
    let payload = enc.udt(&[Some(enc.text("Ada"))]).unwrap();
    let v = Value::new(
        ProtocolVersion::V4,
        ty("ks.person<name: text, born: date, emails: set<text>>"),
        Some(&payload),
    )
    .unwrap();

    let fields: Vec<_> = v.fields().unwrap().map(Result::unwrap).collect();
    let names: Vec<_> = fields.iter().map(|f| f.name.unwrap()).collect();
    assert_eq!(names, ["name", "born", "emails"]);
    assert_eq!(fields[0].value.as_str().unwrap(), "Ada");
    assert!(fields[1].value.is_null());
    assert!(fields[2].value.is_null());
    assert!(fields[2].value.is_collection());
}

#[test]
fn corrupt_nested_header_is_reported_by_the_iterator() {
    // Outer list holds one element whose bytes are a 1-byte (truncated)
    // inner list header.
    let enc = ValueEncoder::new(ProtocolVersion::V4);
    let payload = enc.list(&[Some(vec![0x00])]).unwrap();
    let v = Value::new(ProtocolVersion::V4, ty("list<frozen<list<int>>>"), Some(&payload)).unwrap();

    let mut items = v.items().unwrap();
    assert!(matches!(
        items.next(),
        Some(Err(ValueError::Wire(WireError::UnexpectedEof { .. })))
    ));
    assert!(items.next().is_none());
}

#[test]
fn overstated_count_stops_at_end_of_payload() {
    // Header says 3 elements; only one is present.
    let payload = [0, 0, 0, 3, 0, 0, 0, 1, 0x2A];
    let v = Value::new(ProtocolVersion::V4, ty("list<tinyint>"), Some(&payload)).unwrap();
    let results: Vec<_> = v.items().unwrap().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().as_i8().unwrap(), 42);
    assert!(results[1].is_err());
}

#[test]
fn shape_mismatches() {
    let enc = ValueEncoder::new(ProtocolVersion::V4);
    let list_payload = enc.list(&[]).unwrap();
    let list = Value::new(ProtocolVersion::V4, ty("list<int>"), Some(&list_payload)).unwrap();
    assert!(matches!(list.fields(), Err(ValueError::InvalidValueType { .. })));
    assert!(matches!(list.entries(), Err(ValueError::InvalidValueType { .. })));
    assert_eq!(list.items().unwrap().count(), 0);

    let tuple = Value::new(ProtocolVersion::V4, ty("tuple<int>"), Some(&[])).unwrap();
    assert!(matches!(tuple.items(), Err(ValueError::InvalidValueType { .. })));
}
