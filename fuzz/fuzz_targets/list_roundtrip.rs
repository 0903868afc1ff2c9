#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use cql_encoder::ValueEncoder;
use cql_types::{DataType, ValueType};
use cql_value::Value;
use cql_wire::ProtocolVersion;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    version: u8,
    items: Vec<Option<i64>>,
}

// Fuzz target: encode a list<bigint>, view it, read every element back.
//
// Nulls cannot be framed before v3, so those inputs must fail to encode
// rather than produce a misleading payload.
fuzz_target!(|input: FuzzInput| {
    let version = ProtocolVersion::new(input.version % 5 + 1).unwrap();
    let enc = ValueEncoder::new(version);
    let items: Vec<Option<Vec<u8>>> = input.items.iter().map(|i| i.map(|n| enc.bigint(n))).collect();

    let Ok(payload) = enc.list(&items) else {
        assert!(version.count_width() == 2 && input.items.iter().any(Option::is_none));
        return;
    };

    let value = Value::new(version, DataType::list(DataType::primitive(ValueType::BigInt).unwrap()), Some(&payload)).unwrap();
    assert_eq!(value.item_count(), input.items.len());

    let decoded: Vec<Option<i64>> = value
        .items()
        .unwrap()
        .map(|item| {
            let item = item.unwrap();
            if item.is_null() { None } else { Some(item.as_i64().unwrap()) }
        })
        .collect();
    assert_eq!(decoded, input.items);
});
