#![warn(clippy::pedantic)]

pub mod error;
pub mod framing;
pub mod primitives;
pub mod protocol;

pub use error::WireError;
pub use protocol::ProtocolVersion;
