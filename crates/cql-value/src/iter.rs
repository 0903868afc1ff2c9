use std::sync::Arc;

use cql_types::{CollectionKind, DataType, DataTypeRef, ValueType};
use cql_wire::ProtocolVersion;
use cql_wire::framing::{decode_bytes, decode_sized};

use crate::error::ValueError;
use crate::value::{Payload, Value};

const COLLECTIONS: &[ValueType] = &[ValueType::List, ValueType::Set, ValueType::Map];
const MAPS: &[ValueType] = &[ValueType::Map];
const COMPOSITES: &[ValueType] = &[ValueType::Tuple, ValueType::Udt];

// ── Element layout ────────────────────────────────────────────────────
//
//   collection payload (header already stripped by Value::new):
//     v3+ : n × [bytes]        (negative length = null element)
//     v1/2: n × [short bytes]
//     maps store key, value, key, value, ... so n pairs = 2n elements
//
//   tuple / user type payload, any version:
//     [bytes] per component, in declaration order; a user type may end
//     early, and the missing trailing fields read as null
//
// Iterators stop after yielding the first error. Bytes left over after
// the last element are ignored.

impl<'a> Value<'a> {
    /// Iterate the elements of a list or set.
    ///
    /// For a map, keys and values alternate, so the iterator yields
    /// `2 × item_count()` elements; see [`entries`](Self::entries) for
    /// pairs.
    ///
    /// # Errors
    ///
    /// `NullValue` for a null value, `InvalidValueType` if the declared
    /// type is not a collection.
    pub fn items(&self) -> Result<ItemIter<'a>, ValueError> {
        let (bytes, kind, primary, secondary) = self.collection_parts(COLLECTIONS)?;
        Ok(ItemIter {
            version: self.protocol_version(),
            primary: Arc::clone(primary),
            secondary: secondary.cloned(),
            buf: bytes,
            index: 0,
            total: self.item_count().saturating_mul(kind.arity()),
            done: false,
        })
    }

    /// Iterate the `(key, value)` pairs of a map.
    ///
    /// # Errors
    ///
    /// `NullValue` for a null value, `InvalidValueType` unless the
    /// declared type is a map.
    pub fn entries(&self) -> Result<EntryIter<'a>, ValueError> {
        self.collection_parts(MAPS)?;
        Ok(EntryIter {
            items: self.items()?,
        })
    }

    /// Iterate the components of a tuple or the fields of a user type.
    ///
    /// # Errors
    ///
    /// `NullValue` for a null value, `InvalidValueType` unless the
    /// declared type is a tuple or user type.
    pub fn fields(&self) -> Result<FieldIter<'_, 'a>, ValueError> {
        let Payload::Present(bytes) = self.payload() else {
            return Err(ValueError::NullValue);
        };
        match self.data_type().as_ref() {
            DataType::Tuple { .. } | DataType::UserType { .. } => Ok(FieldIter {
                version: self.protocol_version(),
                data_type: self.data_type().as_ref(),
                buf: bytes,
                index: 0,
                done: false,
            }),
            _ => Err(ValueError::InvalidValueType {
                expected: COMPOSITES,
                actual: self.value_type(),
            }),
        }
    }

    #[allow(clippy::type_complexity)]
    fn collection_parts(
        &self,
        accepted: &'static [ValueType],
    ) -> Result<(&'a [u8], CollectionKind, &DataTypeRef, Option<&DataTypeRef>), ValueError> {
        let Payload::Present(bytes) = self.payload() else {
            return Err(ValueError::NullValue);
        };
        match self.data_type().as_ref() {
            DataType::Collection {
                kind,
                primary,
                secondary,
            } if accepted.contains(&kind.value_type()) => {
                Ok((bytes, *kind, primary, secondary.as_ref()))
            }
            _ => Err(ValueError::InvalidValueType {
                expected: accepted,
                actual: self.value_type(),
            }),
        }
    }
}

/// Elements of a collection, as values of the declared element type.
pub struct ItemIter<'a> {
    version: ProtocolVersion,
    primary: DataTypeRef,
    secondary: Option<DataTypeRef>,
    buf: &'a [u8],
    index: usize,
    total: usize,
    done: bool,
}

impl<'a> Iterator for ItemIter<'a> {
    type Item = Result<Value<'a>, ValueError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.index >= self.total {
            return None;
        }

        // Map elements alternate key, value.
        let ty = match &self.secondary {
            Some(value_type) if self.index % 2 == 1 => Arc::clone(value_type),
            _ => Arc::clone(&self.primary),
        };
        let index = self.index;
        self.index += 1;

        let result = match decode_sized(self.buf, self.version) {
            Ok((bytes, consumed)) => {
                self.buf = &self.buf[consumed..];
                Value::new(self.version, ty, bytes)
            }
            Err(e) => Err(e.into()),
        };

        if let Err(ref e) = result {
            tracing::debug!(index, error = %e, "collection element decode failed");
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.total - self.index))
        }
    }
}

/// Key/value pairs of a map.
pub struct EntryIter<'a> {
    items: ItemIter<'a>,
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = Result<(Value<'a>, Value<'a>), ValueError>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = match self.items.next()? {
            Ok(key) => key,
            Err(e) => return Some(Err(e)),
        };
        // `total` is always even for maps, so a value follows unless the
        // key decode already stopped the iterator.
        let value = self.items.next()?;
        Some(value.map(|value| (key, value)))
    }
}

/// One component of a tuple or field of a user type.
#[derive(Clone, Debug)]
pub struct Field<'v, 'a> {
    /// Field name for user types; `None` for tuple components.
    pub name: Option<&'v str>,
    pub value: Value<'a>,
}

/// Components of a tuple or fields of a user type, in declaration order.
pub struct FieldIter<'v, 'a> {
    version: ProtocolVersion,
    data_type: &'v DataType,
    buf: &'a [u8],
    index: usize,
    done: bool,
}

impl<'v, 'a> Iterator for FieldIter<'v, 'a> {
    type Item = Result<Field<'v, 'a>, ValueError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (name, ty) = self.data_type.component(self.index)?;
        let index = self.index;
        self.index += 1;

        if self.buf.is_empty() {
            return Some(Ok(Field {
                name,
                value: Value::null(self.version, Arc::clone(ty)),
            }));
        }

        let result = match decode_bytes(self.buf) {
            Ok((bytes, consumed)) => {
                self.buf = &self.buf[consumed..];
                Value::new(self.version, Arc::clone(ty), bytes)
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(value) => Some(Ok(Field { name, value })),
            Err(e) => {
                tracing::debug!(index, field = ?name, error = %e, "field decode failed");
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            self.data_type.component_count() - self.index
        };
        (remaining, Some(remaining))
    }
}
