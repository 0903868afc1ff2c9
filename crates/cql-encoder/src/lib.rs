#![warn(clippy::pedantic)]

pub mod error;
pub mod encoder;
pub mod row;

pub use encoder::ValueEncoder;
pub use error::EncodeError;
pub use row::RowEncoder;
