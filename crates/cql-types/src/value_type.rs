/// Logical value type tags.
///
/// Each variant maps to the `[short]` id the native protocol uses in
/// `[option]` type descriptors. Unknown ids are captured by
/// `Unknown(u16)` so a newer server's type tag survives a round trip
/// through this crate.
///
/// ```text
/// ┌────────┬───────────┬──────────────────────────────────────┐
/// │ Wire   │ Variant   │ Encoding                             │
/// ├────────┼───────────┼──────────────────────────────────────┤
/// │ 0x0000 │ Custom    │ opaque, server-side class            │
/// │ 0x0001 │ Ascii     │ US-ASCII bytes                       │
/// │ 0x0002 │ BigInt    │ 8-byte two's complement              │
/// │ 0x0003 │ Blob      │ opaque bytes                         │
/// │ 0x0004 │ Boolean   │ 1 byte, nonzero = true               │
/// │ 0x0005 │ Counter   │ 8-byte two's complement              │
/// │ 0x0006 │ Decimal   │ [int] scale + varint unscaled        │
/// │ 0x0007 │ Double    │ 8-byte IEEE 754                      │
/// │ 0x0008 │ Float     │ 4-byte IEEE 754                      │
/// │ 0x0009 │ Int       │ 4-byte two's complement              │
/// │ 0x000A │ Text      │ UTF-8 bytes                          │
/// │ 0x000B │ Timestamp │ 8-byte ms since epoch                │
/// │ 0x000C │ Uuid      │ 16 bytes                             │
/// │ 0x000D │ Varchar   │ UTF-8 bytes                          │
/// │ 0x000E │ Varint    │ big-endian two's complement, any len │
/// │ 0x000F │ TimeUuid  │ 16 bytes, version 1                  │
/// │ 0x0010 │ Inet      │ 4 or 16 bytes                        │
/// │ 0x0011 │ Date      │ 4-byte unsigned days, 2^31 = epoch   │
/// │ 0x0012 │ Time      │ 8-byte ns since midnight             │
/// │ 0x0013 │ SmallInt  │ 2-byte two's complement              │
/// │ 0x0014 │ TinyInt   │ 1-byte two's complement              │
/// │ 0x0020 │ List      │ count header + elements              │
/// │ 0x0021 │ Map       │ count header + key/value pairs       │
/// │ 0x0022 │ Set       │ count header + elements              │
/// │ 0x0030 │ Udt       │ [bytes] per field                    │
/// │ 0x0031 │ Tuple     │ [bytes] per component                │
/// └────────┴───────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
  Custom,
  Ascii,
  BigInt,
  Blob,
  Boolean,
  Counter,
  Decimal,
  Double,
  Float,
  Int,
  Text,
  Timestamp,
  Uuid,
  Varchar,
  Varint,
  TimeUuid,
  Inet,
  Date,
  Time,
  SmallInt,
  TinyInt,
  List,
  Map,
  Set,
  Udt,
  Tuple,
  /// Forward-compatible catch-all for type ids this version doesn't
  /// recognize. The raw id is preserved.
  Unknown(u16),
}

impl ValueType {
  /// Return the `[short]` wire id for this type.
  pub fn wire_id(self) -> u16 {
    match self {
      Self::Custom => 0x0000,
      Self::Ascii => 0x0001,
      Self::BigInt => 0x0002,
      Self::Blob => 0x0003,
      Self::Boolean => 0x0004,
      Self::Counter => 0x0005,
      Self::Decimal => 0x0006,
      Self::Double => 0x0007,
      Self::Float => 0x0008,
      Self::Int => 0x0009,
      Self::Text => 0x000A,
      Self::Timestamp => 0x000B,
      Self::Uuid => 0x000C,
      Self::Varchar => 0x000D,
      Self::Varint => 0x000E,
      Self::TimeUuid => 0x000F,
      Self::Inet => 0x0010,
      Self::Date => 0x0011,
      Self::Time => 0x0012,
      Self::SmallInt => 0x0013,
      Self::TinyInt => 0x0014,
      Self::List => 0x0020,
      Self::Map => 0x0021,
      Self::Set => 0x0022,
      Self::Udt => 0x0030,
      Self::Tuple => 0x0031,
      Self::Unknown(id) => id,
    }
  }

  /// Parse a wire id into a [`ValueType`].
  ///
  /// Known ids map to their named variant. Anything else becomes
  /// `Unknown(id)`.
  pub fn from_wire_id(id: u16) -> Self {
    match id {
      0x0000 => Self::Custom,
      0x0001 => Self::Ascii,
      0x0002 => Self::BigInt,
      0x0003 => Self::Blob,
      0x0004 => Self::Boolean,
      0x0005 => Self::Counter,
      0x0006 => Self::Decimal,
      0x0007 => Self::Double,
      0x0008 => Self::Float,
      0x0009 => Self::Int,
      0x000A => Self::Text,
      0x000B => Self::Timestamp,
      0x000C => Self::Uuid,
      0x000D => Self::Varchar,
      0x000E => Self::Varint,
      0x000F => Self::TimeUuid,
      0x0010 => Self::Inet,
      0x0011 => Self::Date,
      0x0012 => Self::Time,
      0x0013 => Self::SmallInt,
      0x0014 => Self::TinyInt,
      0x0020 => Self::List,
      0x0021 => Self::Map,
      0x0022 => Self::Set,
      0x0030 => Self::Udt,
      0x0031 => Self::Tuple,
      other => Self::Unknown(other),
    }
  }

  /// The CQL name of this type, as used in type text (`"bigint"`, `"list"`).
  ///
  /// `Unknown` has no CQL name and returns `"unknown"`.
  pub fn name(self) -> &'static str {
    match self {
      Self::Custom => "custom",
      Self::Ascii => "ascii",
      Self::BigInt => "bigint",
      Self::Blob => "blob",
      Self::Boolean => "boolean",
      Self::Counter => "counter",
      Self::Decimal => "decimal",
      Self::Double => "double",
      Self::Float => "float",
      Self::Int => "int",
      Self::Text => "text",
      Self::Timestamp => "timestamp",
      Self::Uuid => "uuid",
      Self::Varchar => "varchar",
      Self::Varint => "varint",
      Self::TimeUuid => "timeuuid",
      Self::Inet => "inet",
      Self::Date => "date",
      Self::Time => "time",
      Self::SmallInt => "smallint",
      Self::TinyInt => "tinyint",
      Self::List => "list",
      Self::Map => "map",
      Self::Set => "set",
      Self::Udt => "udt",
      Self::Tuple => "tuple",
      Self::Unknown(_) => "unknown",
    }
  }

  /// Look up a scalar type by its CQL name (case-insensitive).
  ///
  /// Only names that stand alone in type text resolve; parameterised
  /// names (`list`, `map`, `set`, `tuple`, `frozen`) return `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    let ty = match name.to_ascii_lowercase().as_str() {
      "custom" => Self::Custom,
      "ascii" => Self::Ascii,
      "bigint" => Self::BigInt,
      "blob" => Self::Blob,
      "boolean" => Self::Boolean,
      "counter" => Self::Counter,
      "decimal" => Self::Decimal,
      "double" => Self::Double,
      "float" => Self::Float,
      "int" => Self::Int,
      "text" => Self::Text,
      "timestamp" => Self::Timestamp,
      "uuid" => Self::Uuid,
      "varchar" => Self::Varchar,
      "varint" => Self::Varint,
      "timeuuid" => Self::TimeUuid,
      "inet" => Self::Inet,
      "date" => Self::Date,
      "time" => Self::Time,
      "smallint" => Self::SmallInt,
      "tinyint" => Self::TinyInt,
      _ => return None,
    };
    Some(ty)
  }

  /// List, map and set: the tags whose payload starts with a count header.
  pub fn is_collection(self) -> bool {
    matches!(self, Self::List | Self::Map | Self::Set)
  }

  /// Every tag except the collection, tuple and user-type ones.
  ///
  /// `Unknown` counts as scalar: its payload is opaque bytes.
  pub fn is_scalar(self) -> bool {
    !matches!(
      self,
      Self::List | Self::Map | Self::Set | Self::Tuple | Self::Udt
    )
  }
}

impl std::fmt::Display for ValueType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Unknown(id) => write!(f, "unknown({id:#06X})"),
      other => f.write_str(other.name()),
    }
  }
}
