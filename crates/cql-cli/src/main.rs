/// `cqlv`: inspect and render CQL native-protocol cell values from the
/// command line.
///
/// # Command overview
///
/// ```text
/// cqlv <COMMAND> [OPTIONS] <TYPE> <HEX>
///
/// Commands:
///   inspect    Print the view's introspection and a per-item breakdown
///   render     Print the value as a CQL literal or JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log at debug level (otherwise RUST_LOG, default warn)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (bad type text, bad hex, malformed value)|
///
/// Logs and errors go to stderr so stdout can be piped cleanly.
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_render;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Typed views over CQL native-protocol cell values.
#[derive(Parser)]
#[command(name = "cqlv", version, about = "CQL value inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (collection headers, truncation, decode failures).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print declared type, null flag, item count, payload and items.
    Inspect(InspectArgs),
    /// Render the value as a CQL literal or JSON.
    Render(RenderArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Where the value comes from: a declared type plus hex bytes.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                               │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ --protocol N │ Native protocol version 1-5 (env CQLV_PROTOCOL)      │
/// │ --cell       │ HEX is a [bytes] cell: 4-byte length, then payload   │
/// │ --type-hex   │ TYPE is a hex [option] descriptor, not CQL text      │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// HEX may contain whitespace and an optional `0x` prefix.
#[derive(clap::Args)]
pub struct ValueInput {
    /// Declared type, e.g. `map<text, list<int>>`.
    #[arg(value_name = "TYPE")]
    pub data_type: String,

    /// Payload bytes in hex.
    #[arg(value_name = "HEX")]
    pub hex: String,

    /// Native protocol version.
    #[arg(long, env = "CQLV_PROTOCOL", default_value_t = 4)]
    pub protocol: u8,

    /// Treat HEX as a length-prefixed cell (negative length = null).
    #[arg(long)]
    pub cell: bool,

    /// Treat TYPE as a hex-encoded `[option]` type descriptor.
    #[arg(long)]
    pub type_hex: bool,
}

/// Arguments for `cqlv inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: ValueInput,

    /// Skip the hex dump of the payload.
    #[arg(long)]
    pub no_hex: bool,
}

/// Arguments for `cqlv render`.
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                    │
/// ├───────────────┼─────────────────────────────────────────────────────┤
/// │ --mode        │ cql (default) | json                                │
/// │ --max-items   │ elements shown per collection (none = all)          │
/// │ --null-text   │ text for null in CQL mode (default "null")          │
/// │ --upper-hex   │ uppercase hex digits for blobs                      │
/// └───────────────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: ValueInput,

    /// Output syntax: `cql` or `json`.
    #[arg(long, default_value = "cql")]
    pub mode: String,

    /// Show at most this many elements of each collection.
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Text printed for null values in CQL mode.
    #[arg(long, default_value = "null")]
    pub null_text: String,

    /// Print blob bytes with uppercase hex digits.
    #[arg(long)]
    pub upper_hex: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Render(args) => cmd_render::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
