use std::fmt::Display;

use cql_types::ValueType;
use cql_value::Value;
use cql_value::decimal::varint_to_string;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::renderer::limit_reached;
use crate::temporal::{format_date, format_time, format_timestamp};

/// CQL literal renderer: output can be pasted back into a CQL statement.
///
/// ```text
/// ┌───────────────────────┬──────────────────────────────────────────┐
/// │ Declared type         │ Literal                                  │
/// ├───────────────────────┼──────────────────────────────────────────┤
/// │ ascii / text / varchar│ 'it''s'                                  │
/// │ blob / custom         │ 0xcafe                                   │
/// │ timestamp             │ '2020-09-13 12:26:40.123Z'               │
/// │ date / time           │ '2022-01-08' / '13:05:00.000000007'      │
/// │ inet                  │ '10.0.0.1'                               │
/// │ float / double        │ 1.5, NaN, Infinity                       │
/// │ list / set            │ [1, 2] / {1, 2}                          │
/// │ map                   │ {'a': 1}                                 │
/// │ tuple                 │ (1, 'x')                                 │
/// │ user type             │ {street: 'Main', zip: 12345}             │
/// └───────────────────────┴──────────────────────────────────────────┘
/// ```
///
/// Truncated collections end in `...` after the last element shown.
pub struct CqlRenderer;

impl CqlRenderer {
    /// Render one value, recursing into nested elements.
    ///
    /// # Errors
    ///
    /// `RenderError::Value` if any payload fails to decode.
    pub fn render(value: &Value<'_>, config: &RenderConfig) -> Result<String, RenderError> {
        let mut out = String::new();
        write_value(&mut out, value, config)?;
        Ok(out)
    }
}

fn write_value(out: &mut String, value: &Value<'_>, config: &RenderConfig) -> Result<(), RenderError> {
    if value.is_null() {
        out.push_str(&config.null_text);
        return Ok(());
    }
    match value.value_type() {
        ValueType::List => write_items(out, value, config, '[', ']'),
        ValueType::Set => write_items(out, value, config, '{', '}'),
        ValueType::Map => write_entries(out, value, config),
        ValueType::Tuple | ValueType::Udt => write_fields(out, value, config),
        _ => write_scalar(out, value, config),
    }
}

fn write_scalar(out: &mut String, value: &Value<'_>, config: &RenderConfig) -> Result<(), RenderError> {
    match value.value_type() {
        ValueType::Ascii | ValueType::Text | ValueType::Varchar => quote(out, value.as_str()?),
        ValueType::Int => out.push_str(&value.as_i32()?.to_string()),
        ValueType::BigInt | ValueType::Counter => out.push_str(&value.as_i64()?.to_string()),
        ValueType::SmallInt => out.push_str(&value.as_i16()?.to_string()),
        ValueType::TinyInt => out.push_str(&value.as_i8()?.to_string()),
        ValueType::Timestamp => {
            let millis = value.as_i64()?;
            quote_or_raw(out, format_timestamp(millis), millis);
        }
        ValueType::Date => {
            let days = value.as_date()?;
            quote_or_raw(out, format_date(days), days);
        }
        ValueType::Time => {
            let nanos = value.as_time()?;
            quote_or_raw(out, format_time(nanos), nanos);
        }
        ValueType::Float => out.push_str(&float_literal(value.as_f32()?)),
        ValueType::Double => out.push_str(&float_literal(value.as_f64()?)),
        ValueType::Boolean => out.push_str(if value.as_bool()? { "true" } else { "false" }),
        ValueType::Uuid | ValueType::TimeUuid => out.push_str(&value.as_uuid()?.to_string()),
        ValueType::Inet => quote(out, &value.as_inet()?.to_string()),
        ValueType::Varint => out.push_str(&varint_to_string(value.as_bytes()?)),
        ValueType::Decimal => out.push_str(&value.as_decimal()?.to_string()),
        ValueType::Blob | ValueType::Custom => out.push_str(&config.bytes.format(value.as_bytes()?)),
        // Composite tags are dispatched before reaching here; anything else
        // has no literal form and prints as its raw bytes.
        _ => out.push_str(&config.bytes.format(value.raw().unwrap_or_default())),
    }
    Ok(())
}

// Out-of-range temporal values print as their raw number.
fn quote_or_raw(out: &mut String, text: Option<String>, raw: impl ToString) {
    match text {
        Some(text) => quote(out, &text),
        None => out.push_str(&raw.to_string()),
    }
}

fn write_items(
    out: &mut String,
    value: &Value<'_>,
    config: &RenderConfig,
    open: char,
    close: char,
) -> Result<(), RenderError> {
    out.push(open);
    for (i, item) in value.items()?.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if limit_reached(i, value, config) {
            out.push_str("...");
            break;
        }
        write_value(out, &item?, config)?;
    }
    out.push(close);
    Ok(())
}

fn write_entries(out: &mut String, value: &Value<'_>, config: &RenderConfig) -> Result<(), RenderError> {
    out.push('{');
    for (i, entry) in value.entries()?.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if limit_reached(i, value, config) {
            out.push_str("...");
            break;
        }
        let (key, val) = entry?;
        write_value(out, &key, config)?;
        out.push_str(": ");
        write_value(out, &val, config)?;
    }
    out.push('}');
    Ok(())
}

fn write_fields(out: &mut String, value: &Value<'_>, config: &RenderConfig) -> Result<(), RenderError> {
    let is_udt = value.value_type() == ValueType::Udt;
    out.push(if is_udt { '{' } else { '(' });
    for (i, field) in value.fields()?.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let field = field?;
        if let Some(name) = field.name {
            out.push_str(name);
            out.push_str(": ");
        }
        write_value(out, &field.value, config)?;
    }
    out.push(if is_udt { '}' } else { ')' });
    Ok(())
}

fn quote(out: &mut String, text: &str) {
    out.push('\'');
    out.push_str(&text.replace('\'', "''"));
    out.push('\'');
}

fn float_literal<T: Display + Copy + Into<f64>>(value: T) -> String {
    let wide: f64 = value.into();
    if wide.is_nan() {
        "NaN".to_string()
    } else if wide.is_infinite() && wide.is_sign_positive() {
        "Infinity".to_string()
    } else if wide.is_infinite() {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_encoder::ValueEncoder;
    use cql_types::DataType;
    use cql_wire::ProtocolVersion;

    fn cql(ty: &str, payload: &[u8]) -> String {
        let data_type = ty.parse::<DataType>().unwrap();
        let value = Value::new(ProtocolVersion::V4, data_type.into(), Some(payload)).unwrap();
        CqlRenderer::render(&value, &RenderConfig::default()).unwrap()
    }

    #[test]
    fn text_quotes_are_doubled() {
        assert_eq!(cql("text", b"it's"), "'it''s'");
    }

    #[test]
    fn float_specials() {
        let enc = ValueEncoder::default();
        assert_eq!(cql("float", &enc.float(1.5)), "1.5");
        assert_eq!(cql("double", &enc.double(f64::NAN)), "NaN");
        assert_eq!(cql("double", &enc.double(f64::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn f32_keeps_short_form() {
        let enc = ValueEncoder::default();
        assert_eq!(cql("float", &enc.float(0.1)), "0.1");
    }

    #[test]
    fn out_of_range_time_prints_raw() {
        let enc = ValueEncoder::default();
        assert_eq!(cql("time", &enc.time(-5)), "-5");
    }

    #[test]
    fn out_of_range_date_and_timestamp_print_raw() {
        let enc = ValueEncoder::default();
        assert_eq!(cql("date", &enc.date(0)), "0");
        assert_eq!(cql("timestamp", &enc.bigint(i64::MAX)), i64::MAX.to_string());
        assert_eq!(cql("date", &enc.date(1 << 31)), "'1970-01-01'");
    }

    #[test]
    fn custom_null_text() {
        let value = Value::null(ProtocolVersion::V4, DataType::primitive(ValueType::Int).unwrap());
        let config = RenderConfig {
            null_text: "NULL".to_string(),
            ..RenderConfig::default()
        };
        assert_eq!(CqlRenderer::render(&value, &config).unwrap(), "NULL");
    }
}
