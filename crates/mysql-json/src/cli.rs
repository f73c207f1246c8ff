//! Core logic of the `mysql-json-decode` binary.
//!
//! Reads one stored value (raw bytes or hex text), decodes it and renders
//! the JSON text, either as produced by the decoder or pretty-printed.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::decoder::JsonbDecoder;
use crate::error::{JsonbError, REEXPORT_WARNING};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("{}: {}", REEXPORT_WARNING, .0)]
    Decode(#[from] JsonbError),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Input ─────────────────────────────────────────────────────────────────

/// How the stored value is given on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// The stored bytes as-is.
    #[default]
    Raw,
    /// Hex digits, optionally prefixed with `0x`. Whitespace is ignored.
    Hex,
}

/// Reads the whole input from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Turns input bytes into the stored document.
pub fn parse_input(input: &[u8], format: InputFormat) -> Result<Vec<u8>, CliError> {
    match format {
        InputFormat::Raw => Ok(input.to_vec()),
        InputFormat::Hex => {
            let digits: Vec<u8> = input
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            let digits = digits
                .strip_prefix(b"0x")
                .or_else(|| digits.strip_prefix(b"0X"))
                .unwrap_or(&digits[..]);
            Ok(hex::decode(digits)?)
        }
    }
}

// ── Decode ────────────────────────────────────────────────────────────────

/// Decodes `doc`, pretty-printing through `serde_json` when asked.
pub fn render(decoder: &JsonbDecoder, doc: &[u8], pretty: bool) -> Result<String, CliError> {
    tracing::debug!(input_len = doc.len(), pretty, "decoding document");
    if pretty {
        let value = decoder.decode_value(doc)?;
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(decoder.decode(doc)?)
    }
}

/// Parses `input` in the given format and renders it.
pub fn run(
    decoder: &JsonbDecoder,
    input: &[u8],
    format: InputFormat,
    pretty: bool,
) -> Result<String, CliError> {
    let doc = parse_input(input, format)?;
    render(decoder, &doc, pretty)
}
