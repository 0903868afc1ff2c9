use cql_wire::WireError;

/// Errors that can occur while encoding cell payloads.
///
/// ```text
///   EncodeError
///   ├── TooManyElements  ← count does not fit the protocol's count header
///   ├── EmptyRow         ← RowEncoder::encode with no cells
///   └── Wire(WireError)  ← oversized element, null element before v3,
///                          or a failed write
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{count} elements exceed the limit of {limit} for protocol v{version}")]
    TooManyElements {
        count: usize,
        limit: usize,
        version: u8,
    },

    #[error("no cells have been added to the row")]
    EmptyRow,

    #[error(transparent)]
    Wire(#[from] WireError),
}
