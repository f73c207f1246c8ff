//! Binary JSON decoder error type.

use mysql_json_buffers::BufferError;
use thiserror::Error;

/// Message shown to users whenever a stored value cannot be decoded,
/// whatever the underlying [`JsonbError`] was.
pub const REEXPORT_WARNING: &str =
    "Error parsing MySQL JSON format; re-export required (dump the table from MySQL and restore it)";

/// Error type for binary JSON decoding.
///
/// Any error aborts the whole decode; no partial output is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonbError {
    #[error("unexpected end of input")]
    TruncatedInput,
    #[error("container nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),
    #[error("invalid literal byte: 0x{0:02x}")]
    InvalidLiteral(u8),
    #[error("variable-length integer is unterminated or exceeds 32 bits")]
    VarintOverflow,
    #[error("malformed opaque value of SQL type {field_type}: {reason}")]
    MalformedOpaque {
        field_type: u8,
        reason: &'static str,
    },
    #[error("container declares {declared} bytes but only {available} are available")]
    InconsistentContainerLength { declared: usize, available: usize },
    #[error("unknown binary JSON type: 0x{0:02x}")]
    UnknownType(u8),
    #[error("decoded text is not valid JSON: {0}")]
    InvalidJsonText(String),
}

impl JsonbError {
    /// The generic, user-facing message for this error.
    pub fn user_message(&self) -> &'static str {
        REEXPORT_WARNING
    }
}

impl From<BufferError> for JsonbError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => JsonbError::TruncatedInput,
            BufferError::VarintUnterminated(_) | BufferError::VarintOverflow => {
                JsonbError::VarintOverflow
            }
        }
    }
}
