use std::io::Write;

use cql_wire::framing::write_cell;

use crate::error::EncodeError;

/// Builds a row: a run of `[bytes]` cells, one per column.
///
/// Cells are appended with chained `add_*` calls and serialized by
/// [`encode`](Self::encode) or streamed with [`write_to`](Self::write_to).
///
/// ```rust
/// use cql_encoder::RowEncoder;
///
/// let row = RowEncoder::new()
///     .add_cell(&[0, 0, 0, 1])
///     .add_null()
///     .encode()
///     .unwrap();
/// assert_eq!(row, [0, 0, 0, 4, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF]);
/// ```
#[derive(Debug, Default)]
pub struct RowEncoder {
    cells: Vec<Option<Vec<u8>>>,
}

impl RowEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a non-null cell with the given payload.
    pub fn add_cell(&mut self, payload: &[u8]) -> &mut Self {
        self.cells.push(Some(payload.to_vec()));
        self
    }

    /// Append a null cell.
    pub fn add_null(&mut self) -> &mut Self {
        self.cells.push(None);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Serialize every cell into a fresh buffer.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyRow`] if no cells were added.
    /// - [`EncodeError::Wire`] if a payload is longer than `i32::MAX`.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Stream every cell to `w`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode), plus I/O failures from `w`.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, EncodeError> {
        if self.cells.is_empty() {
            return Err(EncodeError::EmptyRow);
        }
        let mut written = 0;
        for cell in &self.cells {
            written += write_cell(w, cell.as_deref())?;
        }
        Ok(written)
    }
}
