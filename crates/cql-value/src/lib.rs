#![warn(clippy::pedantic)]

pub mod accessors;
pub mod decimal;
pub mod error;
pub mod inet;
pub mod iter;
pub mod value;

pub use decimal::Decimal;
pub use error::ValueError;
pub use inet::Inet;
pub use iter::{EntryIter, Field, FieldIter, ItemIter};
pub use value::{Payload, Value};
