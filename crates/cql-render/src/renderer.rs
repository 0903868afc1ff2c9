use cql_value::Value;

use crate::config::{RenderConfig, RenderMode};
use crate::error::RenderError;
use crate::render_cql::CqlRenderer;
use crate::render_json::JsonRenderer;

/// Renders a value view into text.
///
/// ```text
/// Value<'a> ──▶ ValueRenderer::render() ──▶ String
///                       │
///                 RenderConfig
///                 (mode, null_text, max_items, bytes)
/// ```
///
/// Implementations are stateless; everything they need comes through
/// the config.
pub trait ValueRenderer {
    /// # Errors
    ///
    /// `RenderError::Value` when a payload does not decode as its
    /// declared type.
    fn render(&self, value: &Value<'_>, config: &RenderConfig) -> Result<String, RenderError>;
}

/// Dispatches to [`CqlRenderer`] or [`JsonRenderer`] on `config.mode`.
pub struct DefaultRenderer;

impl ValueRenderer for DefaultRenderer {
    fn render(&self, value: &Value<'_>, config: &RenderConfig) -> Result<String, RenderError> {
        match config.mode {
            RenderMode::Cql => CqlRenderer::render(value, config),
            RenderMode::Json => JsonRenderer::render(value, config),
        }
    }
}

/// Render `value` with the [`DefaultRenderer`].
///
/// # Errors
///
/// See [`ValueRenderer::render`].
pub fn render(value: &Value<'_>, config: &RenderConfig) -> Result<String, RenderError> {
    DefaultRenderer.render(value, config)
}

/// True once `shown` elements of `value` have been emitted and the
/// configured cap forbids more.
pub(crate) fn limit_reached(shown: usize, value: &Value<'_>, config: &RenderConfig) -> bool {
    match config.max_items {
        Some(max) if shown >= max => {
            tracing::debug!(
                value_type = %value.value_type(),
                total = value.item_count(),
                shown,
                "collection truncated"
            );
            true
        }
        _ => false,
    }
}
