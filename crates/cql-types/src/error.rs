use cql_wire::WireError;

use crate::value_type::ValueType;

/// Errors that can occur when reading or parsing declared types.
///
/// These are higher-level than [`WireError`]: they deal with the meaning
/// of a type descriptor rather than raw byte framing. A `TypeError` wraps
/// the underlying `WireError` when a descriptor is truncated mid-field.
///
/// # Error hierarchy
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                              │
/// │   ├── wraps WireError for low-level parse failures  │
/// │   ├── UnknownValueType for bad [option] ids         │
/// │   ├── InvalidTypeSyntax for malformed CQL type text │
/// │   ├── NotScalar for composite tags used as scalars  │
/// │   └── WrongArity for mis-parameterised collections  │
/// └─────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// An `[option]` id that does not name any known type.
  ///
  /// The bytes following an unknown id cannot be interpreted, so
  /// descriptor parsing stops here. `ValueType::from_wire_id` itself still
  /// preserves the id as `ValueType::Unknown`.
  #[error("unknown value type id: {id:#06X}")]
  UnknownValueType { id: u16 },

  /// CQL type text could not be parsed.
  #[error("invalid type syntax at position {position}: {reason}")]
  InvalidTypeSyntax { position: usize, reason: String },

  /// A parameterised type was given the wrong number of type arguments.
  #[error("{name} requires {expected} type argument(s), got {found}")]
  WrongArity {
    name: &'static str,
    expected: usize,
    found: usize,
  },

  /// A collection, tuple or user-type tag was given where only a scalar
  /// type can stand.
  #[error("{value_type} is not a scalar type")]
  NotScalar { value_type: ValueType },

  /// A type descriptor nests deeper than the reader allows.
  #[error("type nesting exceeds {limit} levels")]
  NestingTooDeep { limit: usize },

  /// An underlying wire-level error occurred while reading a descriptor.
  #[error(transparent)]
  Wire(#[from] WireError),
}
