use cql_wire::framing::{decode_string, encode_string};
use cql_wire::primitives::{decode_uint16, encode_uint16};
use cql_wire::WireError;

use crate::data_type::{CollectionKind, DataType, DataTypeRef};
use crate::error::TypeError;
use crate::value_type::ValueType;

/// Deepest type nesting accepted from the wire.
///
/// Descriptors are read recursively; the limit keeps a hostile
/// `list<list<list<...>>>` from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

// ── [option] layout ───────────────────────────────────────────────────
//
//   id [short] │ parameters (depend on id)
//
//   0x0000 custom  │ [string] class name
//   0x0020 list    │ [option] element
//   0x0021 map     │ [option] key │ [option] value
//   0x0022 set     │ [option] element
//   0x0030 udt     │ [string] keyspace │ [string] name │ [short] n │ n × ([string] name │ [option])
//   0x0031 tuple   │ [short] n │ n × [option]
//   anything else  │ no parameters
//
// Custom class names are not retained; `write_option` emits an empty
// class name for them.

impl DataType {
    /// Read a type descriptor in `[option]` form.
    ///
    /// Returns `(data_type, bytes_consumed)`.
    ///
    /// # Errors
    ///
    /// - [`TypeError::Wire`] if the descriptor is truncated.
    /// - [`TypeError::UnknownValueType`] for an id this crate cannot size.
    /// - [`TypeError::NestingTooDeep`] past [`MAX_NESTING_DEPTH`].
    pub fn read_option(buf: &[u8]) -> Result<(DataTypeRef, usize), TypeError> {
        read_at_depth(buf, 0)
    }

    /// Append this type's `[option]` descriptor to `buf`.
    ///
    /// # Errors
    ///
    /// [`TypeError::Wire`] if a name or component list is too long for
    /// its `[short]` length prefix.
    pub fn write_option(&self, buf: &mut Vec<u8>) -> Result<(), TypeError> {
        encode_uint16(buf, self.value_type().wire_id());
        match self {
            Self::Primitive(ty) if ty.value_type() == ValueType::Custom => encode_string(buf, "")?,
            Self::Primitive(_) => {}
            Self::Collection {
                primary, secondary, ..
            } => {
                primary.write_option(buf)?;
                if let Some(secondary) = secondary {
                    secondary.write_option(buf)?;
                }
            }
            Self::Tuple { types } => {
                encode_uint16(buf, short_len(types.len())?);
                for ty in types {
                    ty.write_option(buf)?;
                }
            }
            Self::UserType {
                keyspace,
                type_name,
                fields,
            } => {
                encode_string(buf, keyspace)?;
                encode_string(buf, type_name)?;
                encode_uint16(buf, short_len(fields.len())?);
                for field in fields {
                    encode_string(buf, &field.name)?;
                    field.data_type.write_option(buf)?;
                }
            }
        }
        Ok(())
    }
}

fn short_len(len: usize) -> Result<u16, TypeError> {
    u16::try_from(len).map_err(|_| TypeError::Wire(WireError::LengthOverflow { length: len, width: 2 }))
}

fn read_at_depth(buf: &[u8], depth: usize) -> Result<(DataTypeRef, usize), TypeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(TypeError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let (id, mut cursor) = decode_uint16(buf)?;
    let value_type = ValueType::from_wire_id(id);

    let data_type = match value_type {
        ValueType::Custom => {
            let (_class_name, n) = decode_string(rest(buf, cursor))?;
            cursor += n;
            DataType::primitive(ValueType::Custom)?
        }
        ValueType::List | ValueType::Set | ValueType::Map => {
            let kind = match value_type {
                ValueType::List => CollectionKind::List,
                ValueType::Set => CollectionKind::Set,
                _ => CollectionKind::Map,
            };
            let (primary, n) = read_at_depth(rest(buf, cursor), depth + 1)?;
            cursor += n;
            let secondary = if kind == CollectionKind::Map {
                let (secondary, n) = read_at_depth(rest(buf, cursor), depth + 1)?;
                cursor += n;
                Some(secondary)
            } else {
                None
            };
            std::sync::Arc::new(DataType::Collection {
                kind,
                primary,
                secondary,
            })
        }
        ValueType::Tuple => {
            let (count, n) = decode_uint16(rest(buf, cursor))?;
            cursor += n;
            let mut types = Vec::with_capacity(usize::from(count).min(buf.len()));
            for _ in 0..count {
                let (ty, n) = read_at_depth(rest(buf, cursor), depth + 1)?;
                cursor += n;
                types.push(ty);
            }
            DataType::tuple(types)
        }
        ValueType::Udt => {
            let (keyspace, n) = decode_string(rest(buf, cursor))?;
            cursor += n;
            let (type_name, n) = decode_string(rest(buf, cursor))?;
            cursor += n;
            let (count, n) = decode_uint16(rest(buf, cursor))?;
            cursor += n;
            let mut fields = Vec::with_capacity(usize::from(count).min(buf.len()));
            for _ in 0..count {
                let (name, n) = decode_string(rest(buf, cursor))?;
                cursor += n;
                let (ty, n) = read_at_depth(rest(buf, cursor), depth + 1)?;
                cursor += n;
                fields.push((name.to_string(), ty));
            }
            DataType::user_type(keyspace, type_name, fields)
        }
        ValueType::Unknown(id) => return Err(TypeError::UnknownValueType { id }),
        scalar => DataType::primitive(scalar)?,
    };

    Ok((data_type, cursor))
}

/// The unread tail of `buf`; empty once `cursor` reaches the end.
fn rest(buf: &[u8], cursor: usize) -> &[u8] {
    buf.get(cursor..).unwrap_or_default()
}
