use cql_types::{DataType, DataTypeRef, ValueType};
use cql_wire::framing::{decode_bytes, decode_count_header};
use cql_wire::{ProtocolVersion, WireError};

use crate::error::ValueError;

/// The bytes behind a value, or the absence of any.
///
/// Null travels as its own variant from the moment a cell is read, so an
/// accessor cannot reach a payload without having handled null first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload<'a> {
    Null,
    Present(&'a [u8]),
}

/// A typed, zero-copy view over one encoded cell.
///
/// A `Value` pairs a slice of someone else's buffer with the declared
/// type that says how to read it. It never copies or mutates the bytes;
/// the `'a` lifetime ties it to the buffer (usually a decoded row), so it
/// cannot outlive that buffer.
///
/// Construction normalizes the payload bounds:
///
/// ```text
/// ┌────────────┬──────────────────────────────┬──────────────────────────┐
/// │ Declared   │ payload                      │ item_count               │
/// ├────────────┼──────────────────────────────┼──────────────────────────┤
/// │ Collection │ bytes after the count header │ decoded from the header  │
/// │ Tuple      │ all bytes                    │ number of component types│
/// │ UserType   │ all bytes                    │ number of declared fields│
/// │ Primitive  │ all bytes                    │ 0                        │
/// └────────────┴──────────────────────────────┴──────────────────────────┘
/// ```
///
/// The count header is 4 bytes from protocol v3 on and 2 bytes before.
///
/// # Example
///
/// ```rust
/// use cql_types::{DataType, ValueType};
/// use cql_value::Value;
/// use cql_wire::ProtocolVersion;
///
/// let bytes = 42_i32.to_be_bytes();
/// let value = Value::new(
///     ProtocolVersion::V4,
///     DataType::primitive(ValueType::Int).unwrap(),
///     Some(&bytes),
/// )
/// .unwrap();
/// assert_eq!(value.as_i32().unwrap(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct Value<'a> {
    protocol_version: ProtocolVersion,
    data_type: DataTypeRef,
    payload: Payload<'a>,
    count: usize,
}

impl<'a> Value<'a> {
    /// Build a view over `bytes`, or a null value when `bytes` is `None`.
    ///
    /// # Errors
    ///
    /// [`ValueError::Wire`] when the declared type is a collection and the
    /// count header is truncated or negative. Other shapes never fail here.
    pub fn new(
        protocol_version: ProtocolVersion,
        data_type: DataTypeRef,
        bytes: Option<&'a [u8]>,
    ) -> Result<Self, ValueError> {
        let Some(bytes) = bytes else {
            return Ok(Self::null(protocol_version, data_type));
        };

        let (payload, count) = match data_type.as_ref() {
            DataType::Collection { kind, .. } => {
                let (count, header_width) = decode_count_header(bytes, protocol_version)?;
                tracing::trace!(
                    version = %protocol_version,
                    kind = ?kind,
                    count,
                    header_width,
                    "decoded collection header"
                );
                (&bytes[header_width..], count)
            }
            DataType::Tuple { types } => (bytes, types.len()),
            DataType::UserType { fields, .. } => (bytes, fields.len()),
            DataType::Primitive(_) => (bytes, 0),
        };

        Ok(Self {
            protocol_version,
            data_type,
            payload: Payload::Present(payload),
            count,
        })
    }

    /// A null value of the given declared type.
    ///
    /// Tuples and user types keep their static arity; every other shape
    /// reports zero items.
    pub fn null(protocol_version: ProtocolVersion, data_type: DataTypeRef) -> Self {
        let count = data_type.component_count();
        Self {
            protocol_version,
            data_type,
            payload: Payload::Null,
            count,
        }
    }

    /// Build a view from the signed-size convention of the row layer.
    ///
    /// A negative `size` means null and `buf` is not read. Otherwise the
    /// first `size` bytes of `buf` are viewed.
    ///
    /// # Errors
    ///
    /// - [`ValueError::Wire`] if `buf` is shorter than `size`.
    /// - Anything [`Value::new`] returns.
    pub fn from_sized(
        protocol_version: ProtocolVersion,
        data_type: DataTypeRef,
        buf: &'a [u8],
        size: i32,
    ) -> Result<Self, ValueError> {
        let Ok(size) = usize::try_from(size) else {
            return Ok(Self::null(protocol_version, data_type));
        };
        let bytes = buf.get(..size).ok_or(WireError::UnexpectedEof {
            offset: buf.len(),
            needed: size.saturating_sub(buf.len()),
        })?;
        Self::new(protocol_version, data_type, Some(bytes))
    }

    /// Read one `[bytes]`-framed cell from the front of a row buffer.
    ///
    /// Returns the value and the number of bytes consumed, including the
    /// 4-byte length prefix.
    ///
    /// # Errors
    ///
    /// - [`ValueError::Wire`] if the cell is truncated.
    /// - Anything [`Value::new`] returns.
    pub fn read_cell(
        protocol_version: ProtocolVersion,
        data_type: DataTypeRef,
        buf: &'a [u8],
    ) -> Result<(Self, usize), ValueError> {
        let (bytes, consumed) = decode_bytes(buf)?;
        Ok((Self::new(protocol_version, data_type, bytes)?, consumed))
    }

    // ── Introspection ─────────────────────────────────────────────────

    /// The declared logical type tag. Defined for null values too.
    pub fn value_type(&self) -> ValueType {
        self.data_type.value_type()
    }

    pub fn is_null(&self) -> bool {
        self.payload == Payload::Null
    }

    /// Whether the declared type is a list, set or map.
    pub fn is_collection(&self) -> bool {
        self.data_type.is_collection()
    }

    /// Element count for collections; static arity for tuples and user
    /// types; 0 for scalars.
    pub fn item_count(&self) -> usize {
        self.count
    }

    /// Element type of a list or set, key type of a map.
    pub fn primary_sub_type(&self) -> Option<ValueType> {
        self.data_type.primary_sub_type()
    }

    /// Value type of a map.
    pub fn secondary_sub_type(&self) -> Option<ValueType> {
        self.data_type.secondary_sub_type()
    }

    /// The shared declared-type handle, for recursing into nested types.
    pub fn data_type(&self) -> &DataTypeRef {
        &self.data_type
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn payload(&self) -> Payload<'a> {
        self.payload
    }

    /// The payload of a non-null value, whatever its declared type.
    ///
    /// For collections the count header is already stripped.
    pub fn raw(&self) -> Option<&'a [u8]> {
        match self.payload {
            Payload::Null => None,
            Payload::Present(bytes) => Some(bytes),
        }
    }

    /// Payload after the null check and the declared-type check, in that
    /// order. Every typed accessor starts here.
    pub(crate) fn checked(&self, accepted: &'static [ValueType]) -> Result<&'a [u8], ValueError> {
        let Payload::Present(bytes) = self.payload else {
            return Err(ValueError::NullValue);
        };
        let actual = self.value_type();
        if accepted.contains(&actual) {
            Ok(bytes)
        } else {
            Err(ValueError::InvalidValueType {
                expected: accepted,
                actual,
            })
        }
    }
}
