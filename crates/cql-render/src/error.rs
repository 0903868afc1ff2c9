use cql_value::ValueError;

/// Errors that can occur while rendering a value.
///
/// ```text
/// ┌──────────┬────────────────────────────────────────────────────┐
/// │ Variant  │ Cause                                              │
/// ├──────────┼────────────────────────────────────────────────────┤
/// │ Value    │ An accessor or iterator rejected the payload       │
/// │ Json     │ serde_json failed to serialize the tree            │
/// └──────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
