//! Read-only column holding MySQL binary JSON.

use thiserror::Error;

use crate::decoder::JsonbDecoder;
use crate::error::{JsonbError, REEXPORT_WARNING};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("column `{0}` is read-only")]
    ReadOnly(String),
}

/// Text value of a column read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(String),
    /// The stored bytes could not be decoded. `warning` is the message to
    /// surface to the user.
    Unreadable {
        warning: &'static str,
        error: JsonbError,
    },
}

/// A column whose stored values are binary JSON documents written by MySQL.
#[derive(Debug, Clone)]
pub struct MysqlJsonColumn {
    name: String,
    decoder: JsonbDecoder,
}

impl MysqlJsonColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_decoder(name, JsonbDecoder::default())
    }

    pub fn with_decoder(name: impl Into<String>, decoder: JsonbDecoder) -> Self {
        Self {
            name: name.into(),
            decoder,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decodes a stored value. SQL NULL decodes to empty text.
    pub fn parse(&self, raw: Option<&[u8]>) -> Result<String, JsonbError> {
        match raw {
            None => Ok(String::new()),
            Some(raw) if raw.len() < 2 => Err(JsonbError::TruncatedInput),
            Some(raw) => self.decoder.decode(raw),
        }
    }

    /// Reads a stored value as text, logging a warning when it cannot be
    /// decoded.
    pub fn val_str(&self, raw: Option<&[u8]>) -> ColumnValue {
        match self.parse(raw) {
            Ok(text) => ColumnValue::Text(text),
            Err(error) => {
                tracing::warn!(
                    column = %self.name,
                    %error,
                    "{}",
                    REEXPORT_WARNING
                );
                ColumnValue::Unreadable {
                    warning: error.user_message(),
                    error,
                }
            }
        }
    }

    /// Writes are rejected: there is no encoder for the binary format.
    pub fn store(&mut self, _text: &str) -> Result<(), ColumnError> {
        Err(ColumnError::ReadOnly(self.name.clone()))
    }
}
