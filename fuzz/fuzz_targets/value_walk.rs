#![no_main]

use libfuzzer_sys::fuzz_target;
use cql_render::{RenderConfig, RenderMode};
use cql_types::DataType;
use cql_value::Value;
use cql_wire::ProtocolVersion;

// Fuzz target: build a value from arbitrary bytes and touch everything.
//
// Input format:
//   byte 0: protocol version (mod 4, plus 1)
//   bytes 1..: [option] type descriptor, then the payload
//
// Catches bugs in:
// - Count headers that overstate the payload
// - Element lengths past the end of the buffer
// - Deeply nested descriptors
// - Accessors on payloads of the wrong width
fuzz_target!(|data: &[u8]| {
    let Some((&version, rest)) = data.split_first() else {
        return;
    };
    let Ok(version) = ProtocolVersion::new(version % 5 + 1) else {
        return;
    };
    let Ok((data_type, consumed)) = DataType::read_option(rest) else {
        return;
    };
    let Ok(value) = Value::new(version, data_type, Some(&rest[consumed..])) else {
        return;
    };
    walk(&value, 0);

    for mode in [RenderMode::Cql, RenderMode::Json] {
        let config = RenderConfig {
            mode,
            max_items: Some(16),
            ..RenderConfig::default()
        };
        let _ = cql_render::render(&value, &config);
    }
});

fn walk(value: &Value<'_>, depth: usize) {
    if depth > 8 {
        return;
    }
    let _ = value.as_i32();
    let _ = value.as_i64();
    let _ = value.as_i16();
    let _ = value.as_i8();
    let _ = value.as_date();
    let _ = value.as_time();
    let _ = value.as_f32();
    let _ = value.as_f64();
    let _ = value.as_bool();
    let _ = value.as_uuid();
    let _ = value.as_inet();
    let _ = value.as_str();
    let _ = value.as_bytes();
    if let Ok(dec) = value.as_decimal() {
        if dec.unscaled().len() <= 64 {
            let _ = dec.to_string();
        }
    }

    if let Ok(items) = value.items() {
        for item in items.take(64).flatten() {
            walk(&item, depth + 1);
        }
    }
    if let Ok(fields) = value.fields() {
        for field in fields.flatten() {
            walk(&field.value, depth + 1);
        }
    }
}
