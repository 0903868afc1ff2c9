#![warn(clippy::pedantic)]

pub mod error;
pub mod value_type;
pub mod data_type;
pub mod option;
pub mod parse;

pub use data_type::{CollectionKind, DataType, DataTypeRef, ScalarType, UserTypeField};
pub use error::TypeError;
pub use value_type::ValueType;
