//! Turning command-line arguments into a `Value`.

use std::sync::Arc;

use anyhow::{Context, Result};
use cql_types::{DataType, DataTypeRef};
use cql_value::Value;
use cql_wire::ProtocolVersion;

use crate::ValueInput;

/// Decode hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    hex::decode(digits).with_context(|| format!("invalid hex {text:?}"))
}

pub fn declared_type(input: &ValueInput) -> Result<DataTypeRef> {
    if !input.type_hex {
        let ty: DataType = input
            .data_type
            .parse()
            .with_context(|| format!("cannot parse type {:?}", input.data_type))?;
        return Ok(Arc::new(ty));
    }

    let bytes = parse_hex(&input.data_type).context("invalid type descriptor")?;
    let (ty, consumed) =
        DataType::read_option(&bytes).context("cannot decode [option] type descriptor")?;
    if consumed < bytes.len() {
        tracing::warn!(
            trailing = bytes.len() - consumed,
            "ignoring bytes after type descriptor"
        );
    }
    Ok(ty)
}

pub fn protocol(input: &ValueInput) -> Result<ProtocolVersion> {
    ProtocolVersion::new(input.protocol).context("invalid --protocol")
}

/// Build the view over `bytes`, reading a `[bytes]` cell first when
/// `--cell` is set.
pub fn view<'a>(input: &ValueInput, data_type: DataTypeRef, bytes: &'a [u8]) -> Result<Value<'a>> {
    let version = protocol(input)?;
    if !input.cell {
        return Value::new(version, data_type, Some(bytes)).context("malformed value");
    }

    let (value, consumed) = Value::read_cell(version, data_type, bytes).context("malformed cell")?;
    if consumed < bytes.len() {
        tracing::warn!(
            trailing = bytes.len() - consumed,
            "ignoring bytes after cell"
        );
    }
    Ok(value)
}
