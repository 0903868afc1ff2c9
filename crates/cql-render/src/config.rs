/// Configuration for rendering a value as text.
///
/// ```text
/// ┌────────────┬───────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                           │
/// ├────────────┼───────────────────────────────────────────────────┤
/// │ mode       │ CQL literal syntax or JSON                        │
/// │ null_text  │ What a null prints as in CQL mode                 │
/// │ max_items  │ Cap on elements shown per collection              │
/// │ bytes      │ Case of hex digits for blobs                      │
/// └────────────┴───────────────────────────────────────────────────┘
/// ```
///
/// `max_items` applies at every nesting level. JSON nulls are always
/// `null` regardless of `null_text`.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub null_text: String,
    /// When set, collections longer than this show the first `n`
    /// elements followed by an ellipsis marker.
    pub max_items: Option<usize>,
    pub bytes: BytesFormat,
}

impl Default for RenderConfig {
    /// CQL mode, `null`, no truncation, lowercase hex.
    fn default() -> Self {
        Self {
            mode: RenderMode::Cql,
            null_text: "null".to_string(),
            max_items: None,
            bytes: BytesFormat::default(),
        }
    }
}

/// Output syntax.
///
/// ```text
/// ┌──────┬───────────────────────────────────────────────────────────┐
/// │ Mode │ list<int> [1, 2] / map<text, int> {'a': 1}                │
/// ├──────┼───────────────────────────────────────────────────────────┤
/// │ Cql  │ [1, 2]      {'a': 1}      (1, 'x')      {f: 1}            │
/// │ Json │ [1,2]       {"a":1}       [1,"x"]       {"f":1}           │
/// └──────┴───────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Cql,
    Json,
}

/// Hex digit case for blob-like values. Both forms carry a `0x` prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BytesFormat {
    #[default]
    Hex,
    Base16Upper,
}

impl BytesFormat {
    pub(crate) fn format(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => format!("0x{}", hex::encode(bytes)),
            Self::Base16Upper => format!("0x{}", hex::encode_upper(bytes)),
        }
    }
}
