use std::sync::Arc;

use crate::error::TypeError;
use crate::value_type::ValueType;

/// Shared, immutable handle to a declared type.
///
/// Result metadata is decoded once and then referenced by every value in
/// every row, so values hold this handle rather than a copy. Cloning it
/// is a reference-count bump.
pub type DataTypeRef = Arc<DataType>;

/// The three collection shapes. All of them carry a count header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
  List,
  Set,
  Map,
}

impl CollectionKind {
  /// The logical tag for this collection shape.
  pub fn value_type(self) -> ValueType {
    match self {
      Self::List => ValueType::List,
      Self::Set => ValueType::Set,
      Self::Map => ValueType::Map,
    }
  }

  /// Number of element types this shape is parameterised by.
  pub fn arity(self) -> usize {
    match self {
      Self::List | Self::Set => 1,
      Self::Map => 2,
    }
  }
}

/// A [`ValueType`] that is neither a collection, a tuple nor a user type.
///
/// `DataType::Primitive` carries this rather than a bare tag, so a
/// primitive can never claim a shape its variant does not have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScalarType(ValueType);

impl ScalarType {
  /// Returns `None` for list, map, set, tuple and udt.
  pub fn new(value_type: ValueType) -> Option<Self> {
    value_type.is_scalar().then_some(Self(value_type))
  }

  pub fn value_type(self) -> ValueType {
    self.0
  }
}

impl TryFrom<ValueType> for ScalarType {
  type Error = TypeError;

  fn try_from(value_type: ValueType) -> Result<Self, Self::Error> {
    Self::new(value_type).ok_or(TypeError::NotScalar { value_type })
  }
}

impl std::fmt::Display for ScalarType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// One named field of a user-defined type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserTypeField {
  pub name: String,
  pub data_type: DataTypeRef,
}

/// A declared column or field type.
///
/// Exactly one shape applies to any type, so the shape is the enum
/// variant and every consumer matches on it exhaustively:
///
/// ```text
/// ┌────────────┬──────────────────────────────┬─────────────────────────┐
/// │ Variant    │ Carries                      │ Element count comes from│
/// ├────────────┼──────────────────────────────┼─────────────────────────┤
/// │ Primitive  │ ScalarType tag               │ (none, always 0)        │
/// │ Collection │ kind + element type(s)       │ count header in payload │
/// │ Tuple      │ ordered component types      │ number of components    │
/// │ UserType   │ keyspace, name, named fields │ number of fields        │
/// └────────────┴──────────────────────────────┴─────────────────────────┘
/// ```
///
/// `Collection::secondary` is only `Some` for maps (the value type).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataType {
  Primitive(ScalarType),
  Collection {
    kind: CollectionKind,
    primary: DataTypeRef,
    secondary: Option<DataTypeRef>,
  },
  Tuple {
    types: Vec<DataTypeRef>,
  },
  UserType {
    keyspace: String,
    type_name: String,
    fields: Vec<UserTypeField>,
  },
}

impl DataType {
  /// A scalar type.
  ///
  /// # Errors
  ///
  /// [`TypeError::NotScalar`] for a collection, tuple or udt tag; those
  /// shapes are built with [`list`](Self::list), [`tuple`](Self::tuple)
  /// and friends.
  pub fn primitive(value_type: ValueType) -> Result<DataTypeRef, TypeError> {
    let scalar = ScalarType::try_from(value_type)?;
    Ok(Arc::new(Self::Primitive(scalar)))
  }

  /// `list<element>`.
  pub fn list(element: DataTypeRef) -> DataTypeRef {
    Arc::new(Self::Collection {
      kind: CollectionKind::List,
      primary: element,
      secondary: None,
    })
  }

  /// `set<element>`.
  pub fn set(element: DataTypeRef) -> DataTypeRef {
    Arc::new(Self::Collection {
      kind: CollectionKind::Set,
      primary: element,
      secondary: None,
    })
  }

  /// `map<key, value>`.
  pub fn map(key: DataTypeRef, value: DataTypeRef) -> DataTypeRef {
    Arc::new(Self::Collection {
      kind: CollectionKind::Map,
      primary: key,
      secondary: Some(value),
    })
  }

  /// `tuple<...>` with the given component types, in order.
  pub fn tuple(types: Vec<DataTypeRef>) -> DataTypeRef {
    Arc::new(Self::Tuple { types })
  }

  /// A user-defined type with the given `(name, type)` fields, in order.
  pub fn user_type(
    keyspace: impl Into<String>,
    type_name: impl Into<String>,
    fields: impl IntoIterator<Item = (String, DataTypeRef)>,
  ) -> DataTypeRef {
    Arc::new(Self::UserType {
      keyspace: keyspace.into(),
      type_name: type_name.into(),
      fields: fields
        .into_iter()
        .map(|(name, data_type)| UserTypeField { name, data_type })
        .collect(),
    })
  }

  /// The logical tag of this type.
  pub fn value_type(&self) -> ValueType {
    match self {
      Self::Primitive(ty) => ty.value_type(),
      Self::Collection { kind, .. } => kind.value_type(),
      Self::Tuple { .. } => ValueType::Tuple,
      Self::UserType { .. } => ValueType::Udt,
    }
  }

  pub fn is_collection(&self) -> bool {
    matches!(self, Self::Collection { .. })
  }

  pub fn is_tuple(&self) -> bool {
    matches!(self, Self::Tuple { .. })
  }

  pub fn is_user_type(&self) -> bool {
    matches!(self, Self::UserType { .. })
  }

  /// Element type of a list or set, key type of a map.
  pub fn primary_data_type(&self) -> Option<&DataTypeRef> {
    match self {
      Self::Collection { primary, .. } => Some(primary),
      _ => None,
    }
  }

  /// Value type of a map.
  pub fn secondary_data_type(&self) -> Option<&DataTypeRef> {
    match self {
      Self::Collection { secondary, .. } => secondary.as_ref(),
      _ => None,
    }
  }

  /// Tag of [`primary_data_type`](Self::primary_data_type).
  pub fn primary_sub_type(&self) -> Option<ValueType> {
    self.primary_data_type().map(|ty| ty.value_type())
  }

  /// Tag of [`secondary_data_type`](Self::secondary_data_type).
  pub fn secondary_sub_type(&self) -> Option<ValueType> {
    self.secondary_data_type().map(|ty| ty.value_type())
  }

  /// Static arity of a tuple or user type; 0 for every other shape.
  pub fn component_count(&self) -> usize {
    match self {
      Self::Tuple { types } => types.len(),
      Self::UserType { fields, .. } => fields.len(),
      Self::Primitive(_) | Self::Collection { .. } => 0,
    }
  }

  /// The `index`-th component of a tuple or user type.
  ///
  /// Returns the field name (user types only) and the component type.
  pub fn component(&self, index: usize) -> Option<(Option<&str>, &DataTypeRef)> {
    match self {
      Self::Tuple { types } => types.get(index).map(|ty| (None, ty)),
      Self::UserType { fields, .. } => fields
        .get(index)
        .map(|field| (Some(field.name.as_str()), &field.data_type)),
      Self::Primitive(_) | Self::Collection { .. } => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn int() -> DataTypeRef {
    DataType::primitive(ValueType::Int).unwrap()
  }

  fn text() -> DataTypeRef {
    DataType::primitive(ValueType::Text).unwrap()
  }

  #[test]
  fn shape_predicates_are_exclusive() {
    let types = [
      int(),
      DataType::list(int()),
      DataType::tuple(vec![int(), text()]),
      DataType::user_type("ks", "address", [("street".to_string(), text())]),
    ];
    for ty in &types {
      let flags = [ty.is_collection(), ty.is_tuple(), ty.is_user_type()];
      assert!(
        flags.iter().filter(|f| **f).count() <= 1,
        "more than one shape for {ty:?}"
      );
    }
    assert!(!types[0].is_collection() && !types[0].is_tuple() && !types[0].is_user_type());
  }

  #[test]
  fn composite_tags_cannot_be_primitive() {
    for tag in [ValueType::List, ValueType::Map, ValueType::Set, ValueType::Tuple, ValueType::Udt] {
      assert!(
        matches!(
          DataType::primitive(tag),
          Err(TypeError::NotScalar { value_type }) if value_type == tag
        ),
        "{tag}"
      );
      assert!(ScalarType::new(tag).is_none());
    }
  }

  #[test]
  fn primitive_reports_its_tag() {
    let ty = DataType::primitive(ValueType::Inet).unwrap();
    assert_eq!(ty.value_type(), ValueType::Inet);
    assert_eq!(ty.to_string(), "inet");
    assert!(!ty.is_collection());
  }

  #[test]
  fn map_sub_types() {
    let map = DataType::map(text(), int());
    assert_eq!(map.value_type(), ValueType::Map);
    assert_eq!(map.primary_sub_type(), Some(ValueType::Text));
    assert_eq!(map.secondary_sub_type(), Some(ValueType::Int));
  }

  #[test]
  fn list_has_no_secondary() {
    let list = DataType::list(int());
    assert_eq!(list.primary_sub_type(), Some(ValueType::Int));
    assert_eq!(list.secondary_sub_type(), None);
  }

  #[test]
  fn primitives_have_no_sub_types() {
    assert_eq!(int().primary_sub_type(), None);
    assert_eq!(int().component_count(), 0);
  }

  #[test]
  fn component_counts() {
    let tuple = DataType::tuple(vec![int(), text(), int()]);
    assert_eq!(tuple.component_count(), 3);
    assert_eq!(tuple.value_type(), ValueType::Tuple);

    let udt = DataType::user_type(
      "ks",
      "point",
      [("x".to_string(), int()), ("y".to_string(), int())],
    );
    assert_eq!(udt.component_count(), 2);
    assert_eq!(udt.value_type(), ValueType::Udt);
    let (name, ty) = udt.component(1).unwrap();
    assert_eq!(name, Some("y"));
    assert_eq!(ty.value_type(), ValueType::Int);
    assert!(udt.component(2).is_none());
  }

  #[test]
  fn handles_are_shared_not_copied() {
    let element = int();
    let list = DataType::list(Arc::clone(&element));
    assert!(Arc::ptr_eq(list.primary_data_type().unwrap(), &element));
  }
}
