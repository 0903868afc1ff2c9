//! Shared fixtures for the integration tests and benches.

use cql_types::{DataType, DataTypeRef, ValueType};

/// Shorthand for a primitive declared type.
///
/// # Panics
///
/// If `value_type` is a collection, tuple or udt tag.
#[must_use]
pub fn prim(value_type: ValueType) -> DataTypeRef {
    DataType::primitive(value_type).unwrap_or_else(|e| panic!("bad primitive {value_type}: {e}"))
}

/// Parse CQL type text, panicking on malformed input.
///
/// # Panics
///
/// If `text` is not a valid type.
#[must_use]
pub fn ty(text: &str) -> DataTypeRef {
    let parsed: DataType = text
        .parse()
        .unwrap_or_else(|e| panic!("bad type {text:?}: {e}"));
    parsed.into()
}
