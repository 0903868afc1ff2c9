use cql_types::ValueType;
use cql_value::Value;
use cql_value::decimal::{varint_to_i128, varint_to_string};
use serde_json::{Map, Number, Value as Json};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::renderer::limit_reached;
use crate::temporal::{format_date, format_time, format_timestamp};

/// JSON renderer.
///
/// Integers that fit an `i64` become JSON numbers; wider varints and all
/// decimals become strings so no precision is lost. Maps keyed by a text
/// type become objects when every key is non-null and distinct; any other
/// map becomes an array of `[key, value]` pairs. Tuples are arrays, user types are objects in declaration order.
///
/// Truncated collections simply stop; JSON has no ellipsis.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render one value as compact JSON text.
    ///
    /// # Errors
    ///
    /// - `RenderError::Value` if any payload fails to decode.
    /// - `RenderError::Json` if serialization fails.
    pub fn render(value: &Value<'_>, config: &RenderConfig) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&Self::to_json(value, config)?)?)
    }

    /// Build the `serde_json` tree for a value without serializing it.
    ///
    /// # Errors
    ///
    /// `RenderError::Value` if any payload fails to decode.
    pub fn to_json(value: &Value<'_>, config: &RenderConfig) -> Result<Json, RenderError> {
        if value.is_null() {
            return Ok(Json::Null);
        }
        match value.value_type() {
            ValueType::List | ValueType::Set => items(value, config),
            ValueType::Map => entries(value, config),
            ValueType::Tuple => {
                let mut out = Vec::with_capacity(value.item_count());
                for field in value.fields()? {
                    out.push(Self::to_json(&field?.value, config)?);
                }
                Ok(Json::Array(out))
            }
            ValueType::Udt => {
                let mut out = Map::new();
                for field in value.fields()? {
                    let field = field?;
                    let name = field.name.unwrap_or_default().to_string();
                    out.insert(name, Self::to_json(&field.value, config)?);
                }
                Ok(Json::Object(out))
            }
            _ => scalar(value, config),
        }
    }
}

fn scalar(value: &Value<'_>, config: &RenderConfig) -> Result<Json, RenderError> {
    let json = match value.value_type() {
        ValueType::Ascii | ValueType::Text | ValueType::Varchar => Json::from(value.as_str()?),
        ValueType::Int => Json::from(value.as_i32()?),
        ValueType::BigInt | ValueType::Counter => Json::from(value.as_i64()?),
        ValueType::SmallInt => Json::from(value.as_i16()?),
        ValueType::TinyInt => Json::from(value.as_i8()?),
        ValueType::Timestamp => {
            let millis = value.as_i64()?;
            format_timestamp(millis).map_or_else(|| Json::from(millis), Json::from)
        }
        ValueType::Date => {
            let days = value.as_date()?;
            format_date(days).map_or_else(|| Json::from(days), Json::from)
        }
        ValueType::Time => {
            let nanos = value.as_time()?;
            format_time(nanos).map_or_else(|| Json::from(nanos), Json::from)
        }
        ValueType::Float => float(f64::from(value.as_f32()?)),
        ValueType::Double => float(value.as_f64()?),
        ValueType::Boolean => Json::from(value.as_bool()?),
        ValueType::Uuid | ValueType::TimeUuid => Json::from(value.as_uuid()?.to_string()),
        ValueType::Inet => Json::from(value.as_inet()?.to_string()),
        ValueType::Varint => {
            let bytes = value.as_bytes()?;
            match varint_to_i128(bytes).and_then(|wide| i64::try_from(wide).ok()) {
                Some(small) => Json::from(small),
                None => Json::from(varint_to_string(bytes)),
            }
        }
        ValueType::Decimal => Json::from(value.as_decimal()?.to_string()),
        ValueType::Blob | ValueType::Custom => Json::from(config.bytes.format(value.as_bytes()?)),
        _ => Json::from(config.bytes.format(value.raw().unwrap_or_default())),
    };
    Ok(json)
}

// NaN and the infinities have no JSON number form.
fn float(value: f64) -> Json {
    match Number::from_f64(value) {
        Some(n) => Json::Number(n),
        None if value.is_nan() => Json::from("NaN"),
        None if value.is_sign_positive() => Json::from("Infinity"),
        None => Json::from("-Infinity"),
    }
}

fn items(value: &Value<'_>, config: &RenderConfig) -> Result<Json, RenderError> {
    let mut out = Vec::new();
    for (i, item) in value.items()?.enumerate() {
        if limit_reached(i, value, config) {
            break;
        }
        out.push(JsonRenderer::to_json(&item?, config)?);
    }
    Ok(Json::Array(out))
}

fn entries(value: &Value<'_>, config: &RenderConfig) -> Result<Json, RenderError> {
    let text_keys = matches!(
        value.primary_sub_type(),
        Some(ValueType::Ascii | ValueType::Text | ValueType::Varchar)
    );

    let mut rows = Vec::new();
    for (i, entry) in value.entries()?.enumerate() {
        if limit_reached(i, value, config) {
            break;
        }
        let (key, val) = entry?;
        rows.push((key, JsonRenderer::to_json(&val, config)?));
    }

    if text_keys {
        if let Some(object) = keyed_object(&rows)? {
            return Ok(Json::Object(object));
        }
        tracing::debug!("null or repeated map key, rendering entries as pairs");
    }

    let mut pairs = Vec::with_capacity(rows.len());
    for (key, val) in rows {
        pairs.push(Json::Array(vec![JsonRenderer::to_json(&key, config)?, val]));
    }
    Ok(Json::Array(pairs))
}

// A JSON object only when every key is present and distinct.
fn keyed_object(rows: &[(Value<'_>, Json)]) -> Result<Option<Map<String, Json>>, RenderError> {
    let mut object = Map::new();
    for (key, val) in rows {
        if key.is_null() {
            return Ok(None);
        }
        if object.insert(key.as_str()?.to_string(), val.clone()).is_some() {
            return Ok(None);
        }
    }
    Ok(Some(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_encoder::ValueEncoder;
    use cql_types::DataType;
    use cql_wire::ProtocolVersion;

    fn json(ty: &str, payload: &[u8]) -> String {
        let data_type = ty.parse::<DataType>().unwrap();
        let value = Value::new(ProtocolVersion::V4, data_type.into(), Some(payload)).unwrap();
        JsonRenderer::render(&value, &RenderConfig::default()).unwrap()
    }

    #[test]
    fn wide_varint_is_a_string() {
        let enc = ValueEncoder::default();
        assert_eq!(json("varint", &enc.varint(42)), "42");
        assert_eq!(
            json("varint", &enc.varint(i128::from(i64::MAX) + 1)),
            "\"9223372036854775808\""
        );
    }

    #[test]
    fn non_text_map_keys_become_pairs() {
        let enc = ValueEncoder::default();
        let payload = enc
            .map(&[(Some(enc.int(1)), Some(enc.boolean(false)))])
            .unwrap();
        assert_eq!(json("map<int, boolean>", &payload), "[[1,false]]");
    }

    #[test]
    fn text_keyed_map_is_an_object() {
        let enc = ValueEncoder::default();
        let payload = enc
            .map(&[(Some(enc.text("a")), Some(enc.int(1))), (Some(enc.text("b")), None)])
            .unwrap();
        assert_eq!(json("map<text, int>", &payload), r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn null_text_key_falls_back_to_pairs() {
        let enc = ValueEncoder::default();
        let payload = enc
            .map(&[(Some(enc.text("a")), Some(enc.int(1))), (None, Some(enc.int(2)))])
            .unwrap();
        assert_eq!(json("map<text, int>", &payload), r#"[["a",1],[null,2]]"#);
    }

    #[test]
    fn repeated_text_key_falls_back_to_pairs() {
        let enc = ValueEncoder::default();
        let payload = enc
            .map(&[(Some(enc.text("k")), Some(enc.int(1))), (Some(enc.text("k")), Some(enc.int(2)))])
            .unwrap();
        assert_eq!(json("map<text, int>", &payload), r#"[["k",1],["k",2]]"#);
    }

    #[test]
    fn nan_is_a_string() {
        let enc = ValueEncoder::default();
        assert_eq!(json("double", &enc.double(f64::NAN)), "\"NaN\"");
    }
}
