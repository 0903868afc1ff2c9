#![no_main]

use libfuzzer_sys::fuzz_target;
use cql_types::DataType;

// Fuzz target: [option] type descriptor write->read roundtrip.
//
// Any descriptor that decodes must re-encode to bytes that decode to the
// same type and consume exactly what was written.
fuzz_target!(|data: &[u8]| {
    let Ok((data_type, _)) = DataType::read_option(data) else {
        return;
    };

    let mut wire = Vec::new();
    if data_type.write_option(&mut wire).is_err() {
        return;
    }
    let (reparsed, consumed) = DataType::read_option(&wire).unwrap();
    assert_eq!(reparsed, data_type);
    assert_eq!(consumed, wire.len());
});
