//! Reader error type.

use thiserror::Error;

/// Error type for [`Reader`](crate::Reader) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("variable-length integer not terminated within {0} bytes")]
    VarintUnterminated(usize),
    #[error("variable-length integer exceeds 32 bits")]
    VarintOverflow,
}
