use crate::error::WireError;

/// Lowest native protocol version this crate understands.
pub const MIN_PROTOCOL_VERSION: u8 = 1;

/// Highest native protocol version this crate understands.
pub const MAX_PROTOCOL_VERSION: u8 = 5;

/// Native protocol version a value was encoded with.
///
/// The version only matters for collections: it fixes the width of the
/// element count header and of every element's size prefix.
///
/// ```text
/// ┌─────────┬──────────────┬────────────────────────────┐
/// │ Version │ Count header │ Element size prefix        │
/// ├─────────┼──────────────┼────────────────────────────┤
/// │ 1, 2    │ [short] (2)  │ [short] (2), never null    │
/// │ 3, 4, 5 │ [int]   (4)  │ [int]   (4), negative=null │
/// └─────────┴──────────────┴────────────────────────────┘
/// ```
///
/// Tuples and user types always frame their fields with a 4-byte `[int]`,
/// whatever the version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u8);

impl ProtocolVersion {
    pub const V1: Self = Self(1);
    pub const V2: Self = Self(2);
    pub const V3: Self = Self(3);
    pub const V4: Self = Self(4);
    pub const V5: Self = Self(5);

    /// Wrap a raw version byte, rejecting versions outside `1..=5`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedProtocolVersion`] for any other value.
    pub fn new(version: u8) -> Result<Self, WireError> {
        if (MIN_PROTOCOL_VERSION..=MAX_PROTOCOL_VERSION).contains(&version) {
            Ok(Self(version))
        } else {
            Err(WireError::UnsupportedProtocolVersion { version })
        }
    }

    /// The raw version number.
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Width in bytes of a collection count header and element size prefix.
    pub fn count_width(self) -> usize {
        if self.0 >= 3 { 4 } else { 2 }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V4
    }
}

impl TryFrom<u8> for ProtocolVersion {
    type Error = WireError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        Self::new(version)
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
