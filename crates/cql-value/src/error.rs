use cql_types::ValueType;
use cql_wire::WireError;

/// Errors returned by value construction and accessors.
///
/// Accessors check in a fixed order and stop at the first failure, so a
/// null value of the wrong type always reports `NullValue`:
///
/// ```text
///   accessor call
///   ├── NullValue         ← the value is null (checked first)
///   ├── InvalidValueType  ← declared type not accepted by this accessor
///   ├── InvalidLength     ← payload width wrong for the declared type
///   ├── InvalidUtf8       ← text payload is not UTF-8
///   └── Wire(WireError)   ← framing inside the payload is truncated/corrupt
/// ```
///
/// No accessor writes partial output: on `Err` the caller has nothing to
/// read.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The value is null.
    #[error("value is null")]
    NullValue,

    /// The declared type is not one this accessor can decode.
    #[error("invalid value type: expected one of {expected:?}, found {actual}")]
    InvalidValueType {
        expected: &'static [ValueType],
        actual: ValueType,
    },

    /// The payload does not have the width the declared type requires.
    #[error("invalid {value_type} payload length: {actual} bytes")]
    InvalidLength { value_type: ValueType, actual: usize },

    /// A text payload is not valid UTF-8.
    #[error("invalid UTF-8 in {value_type} value")]
    InvalidUtf8 { value_type: ValueType },

    /// The value's bytes are malformed (count header, element framing).
    ///
    /// Construction surfaces a truncated or negative collection header
    /// through this variant instead of carrying a corrupt length forward.
    #[error(transparent)]
    Wire(#[from] WireError),
}
