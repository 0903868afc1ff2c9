/// Implementation of `cqlv inspect`.
///
/// Builds the view and prints everything the introspection surface
/// reports, then one line per collection element or composite field.
///
/// # Output format
///
/// ```text
/// Type:      map<text, int>
/// Protocol:  v4
/// Null:      false
/// Items:     1
/// Sub types: text, int
/// Payload:   13 bytes
/// Hex dump:
///   0000  00 00 00 01 61 00 00 00 04 00 00 00 07
/// Entry 0: 'a' => 7
/// ```
use anyhow::{Context, Result};
use cql_render::{RenderConfig, render};
use cql_types::ValueType;
use cql_value::Value;

use crate::InspectArgs;
use crate::input::{declared_type, parse_hex, view};

/// Run the `cqlv inspect` command.
///
/// # Errors
///
/// Returns an error if the type or hex cannot be parsed, or if the
/// payload (or any element) does not decode as the declared type.
pub fn run(args: &InspectArgs) -> Result<()> {
    let data_type = declared_type(&args.input)?;
    let bytes = parse_hex(&args.input.hex)?;
    let value = view(&args.input, data_type, &bytes)?;

    println!("Type:      {}", value.data_type());
    println!("Protocol:  {}", value.protocol_version());
    println!("Null:      {}", value.is_null());
    println!("Items:     {}", value.item_count());
    if let Some(primary) = value.primary_sub_type() {
        match value.secondary_sub_type() {
            Some(secondary) => println!("Sub types: {primary}, {secondary}"),
            None => println!("Sub types: {primary}"),
        }
    }

    let Some(payload) = value.raw() else {
        return Ok(());
    };
    println!("Payload:   {} bytes", payload.len());
    if !args.no_hex && !payload.is_empty() {
        println!("Hex dump:");
        for (i, chunk) in payload.chunks(16).enumerate() {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
            println!("  {:04x}  {}", i * 16, hex.join(" "));
        }
    }

    print_breakdown(&value)
}

fn print_breakdown(value: &Value<'_>) -> Result<()> {
    let config = RenderConfig::default();
    match value.value_type() {
        ValueType::List | ValueType::Set => {
            for (i, item) in value.items()?.enumerate() {
                let item = item.with_context(|| format!("element {i} is malformed"))?;
                println!("Item {i}: {}", render(&item, &config)?);
            }
        }
        ValueType::Map => {
            for (i, entry) in value.entries()?.enumerate() {
                let (key, val) = entry.with_context(|| format!("entry {i} is malformed"))?;
                println!(
                    "Entry {i}: {} => {}",
                    render(&key, &config)?,
                    render(&val, &config)?
                );
            }
        }
        ValueType::Tuple | ValueType::Udt => {
            for (i, field) in value.fields()?.enumerate() {
                let field = field.with_context(|| format!("field {i} is malformed"))?;
                let label = field.name.map_or_else(|| i.to_string(), str::to_string);
                println!(
                    "Field {label} ({}): {}",
                    field.value.value_type(),
                    render(&field.value, &config)?
                );
            }
        }
        _ => println!("Value:     {}", render(value, &config)?),
    }
    Ok(())
}
