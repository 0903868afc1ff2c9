/// Implementation of `cqlv render`.
///
/// Prints the value on a single line in the chosen syntax:
///
/// ```text
/// $ cqlv render 'list<int>' 00000002000000040000000100000004ffffffff
/// [1, null]
/// $ cqlv render --mode json 'list<int>' 00000002000000040000000100000004ffffffff
/// [1,null]
/// ```
use anyhow::{Context, Result, bail};
use cql_render::{BytesFormat, RenderConfig, RenderMode};

use crate::RenderArgs;
use crate::input::{declared_type, parse_hex, view};

/// Run the `cqlv render` command.
///
/// # Errors
///
/// Returns an error if the type or hex cannot be parsed, the mode is
/// unknown, or the payload does not decode as the declared type.
pub fn run(args: &RenderArgs) -> Result<()> {
    let config = RenderConfig {
        mode: parse_mode(&args.mode)?,
        null_text: args.null_text.clone(),
        max_items: args.max_items,
        bytes: if args.upper_hex {
            BytesFormat::Base16Upper
        } else {
            BytesFormat::Hex
        },
    };

    let data_type = declared_type(&args.input)?;
    let bytes = parse_hex(&args.input.hex)?;
    let value = view(&args.input, data_type, &bytes)?;

    let text = cql_render::render(&value, &config)
        .with_context(|| format!("cannot render value of type {}", value.data_type()))?;
    println!("{text}");
    Ok(())
}

fn parse_mode(s: &str) -> Result<RenderMode> {
    match s.to_lowercase().as_str() {
        "cql" => Ok(RenderMode::Cql),
        "json" => Ok(RenderMode::Json),
        other => bail!("unknown render mode: {other:?} (expected cql or json)"),
    }
}
