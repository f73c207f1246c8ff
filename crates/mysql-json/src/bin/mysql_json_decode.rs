//! `mysql-json-decode`: print a stored MySQL binary JSON value as JSON text.
//!
//! Usage:
//!   mysql-json-decode [--hex] [--pretty] [--max-depth N | --legacy-depth] [PATH]
//!
//! The value is read from PATH, or from stdin when omitted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mysql_json::cli::{read_input, run, CliError, InputFormat};
use mysql_json::{DecoderOptions, JsonbDecoder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mysql-json-decode", version, about = "Decode a MySQL binary JSON value")]
struct Cli {
    /// File holding the stored value (stdin when omitted).
    path: Option<PathBuf>,

    /// Input is hex text instead of raw bytes.
    #[arg(long)]
    hex: bool,

    /// Pretty-print the decoded JSON.
    #[arg(long)]
    pretty: bool,

    /// Maximum container nesting depth.
    #[arg(long, value_name = "N", conflicts_with = "legacy_depth")]
    max_depth: Option<usize>,

    /// Use the stricter legacy nesting limit.
    #[arg(long)]
    legacy_depth: bool,

    /// Log filter, e.g. `debug` or `mysql_json=trace` (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match decode(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn decode(cli: &Cli) -> Result<(), CliError> {
    let mut options = if cli.legacy_depth {
        DecoderOptions::legacy()
    } else {
        DecoderOptions::default()
    };
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    let format = if cli.hex {
        InputFormat::Hex
    } else {
        InputFormat::Raw
    };

    let input = read_input(cli.path.as_deref())?;
    let text = run(&JsonbDecoder::new(options), &input, format, cli.pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
