//! mysql-json-buffers - byte-level primitives for MySQL binary JSON.
//!
//! Every read is bounds-checked against the window the [`Reader`] was created
//! for, so decoders built on top never index past the bytes they were given.

mod error;
mod reader;

pub use error::BufferError;
pub use reader::{Reader, MAX_VARINT_BYTES};
