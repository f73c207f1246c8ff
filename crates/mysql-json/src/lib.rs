//! Decoder for the binary JSON format MySQL 5.7 stores in `JSON` columns.
//!
//! A stored document is a type tag byte followed by its payload. Objects and
//! arrays come in a small (2-byte offsets) and a large (4-byte offsets)
//! layout; scalars are literals, integers, doubles, strings and opaque
//! values, the latter carrying temporal, decimal or arbitrary SQL values.
//! [`JsonbDecoder`] turns a document into JSON text the way MySQL prints it.

mod container;
mod decimal;
mod decoder;
mod error;
mod opaque;
mod scalar;
mod temporal;

pub mod cli;
pub mod column;
pub mod constants;
pub mod escape;
pub mod types;

pub use column::{ColumnError, ColumnValue, MysqlJsonColumn};
pub use constants::{DEFAULT_MAX_DEPTH, LEGACY_MAX_DEPTH};
pub use decimal::decimal_bin_size;
pub use decoder::{decode, DecoderOptions, JsonbDecoder};
pub use error::{JsonbError, REEXPORT_WARNING};
pub use scalar::append_double;
pub use temporal::MysqlTime;
pub use types::{JsonbType, TemporalKind};
