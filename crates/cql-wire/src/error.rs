/// Errors raised while reading or writing native-protocol primitives.
///
/// Every variant that can happen mid-buffer carries the offset at which
/// the read failed, relative to the slice handed to the decoder.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete primitive could be read.
    #[error("unexpected end of input at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A 4-byte collection count header decoded to a negative value.
    #[error("negative element count {count} in collection header")]
    NegativeCount { count: i32 },

    /// A `[string]` primitive held bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in [string] at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A length or count does not fit the width the protocol allows.
    #[error("length {length} does not fit a {width}-byte size field")]
    LengthOverflow { length: usize, width: usize },

    /// A null collection element cannot be framed before protocol v3.
    #[error("protocol v{version} cannot encode a null collection element")]
    UnrepresentableNull { version: u8 },

    /// Protocol version outside the supported range.
    #[error("unsupported protocol version {version}")]
    UnsupportedProtocolVersion { version: u8 },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// `{count}` on NegativeCount keeps the sign so a corrupted header shows up
// as e.g. -16777216 rather than a huge unsigned number.
