#![no_main]

use libfuzzer_sys::fuzz_target;
use cql_types::DataType;

// Fuzz target: CQL type text parsing.
//
// Whatever parses must print to text that parses back to the same type.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(parsed) = text.parse::<DataType>() else {
        return;
    };
    let printed = parsed.to_string();
    let reparsed: DataType = printed.parse().unwrap();
    assert_eq!(reparsed, parsed, "{text:?} printed as {printed:?}");
});
