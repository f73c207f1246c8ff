//! Wire constants of the MySQL 5.7 binary JSON format.

/// Type tag of a JSON object with 2-byte offsets.
pub const JSONB_TYPE_SMALL_OBJECT: u8 = 0x00;
/// Type tag of a JSON object with 4-byte offsets.
pub const JSONB_TYPE_LARGE_OBJECT: u8 = 0x01;
/// Type tag of a JSON array with 2-byte offsets.
pub const JSONB_TYPE_SMALL_ARRAY: u8 = 0x02;
/// Type tag of a JSON array with 4-byte offsets.
pub const JSONB_TYPE_LARGE_ARRAY: u8 = 0x03;
pub const JSONB_TYPE_LITERAL: u8 = 0x04;
pub const JSONB_TYPE_INT16: u8 = 0x05;
pub const JSONB_TYPE_UINT16: u8 = 0x06;
pub const JSONB_TYPE_INT32: u8 = 0x07;
pub const JSONB_TYPE_UINT32: u8 = 0x08;
pub const JSONB_TYPE_INT64: u8 = 0x09;
pub const JSONB_TYPE_UINT64: u8 = 0x0a;
pub const JSONB_TYPE_DOUBLE: u8 = 0x0b;
pub const JSONB_TYPE_STRING: u8 = 0x0c;
/// Type tag of a SQL value tunneled through JSON.
pub const JSONB_TYPE_OPAQUE: u8 = 0x0f;

pub const JSONB_NULL_LITERAL: u8 = 0x00;
pub const JSONB_TRUE_LITERAL: u8 = 0x01;
pub const JSONB_FALSE_LITERAL: u8 = 0x02;

pub const SMALL_OFFSET_SIZE: usize = 2;
pub const LARGE_OFFSET_SIZE: usize = 4;

/// Key entries hold an offset plus a 2-byte key length.
pub const KEY_LENGTH_SIZE: usize = 2;

// SQL column type ids (`enum_field_types`) that can appear in opaque values.
pub const MYSQL_TYPE_TIMESTAMP: u8 = 7;
pub const MYSQL_TYPE_DATE: u8 = 10;
pub const MYSQL_TYPE_TIME: u8 = 11;
pub const MYSQL_TYPE_DATETIME: u8 = 12;
pub const MYSQL_TYPE_NEWDECIMAL: u8 = 246;

/// Packed temporal values are always stored as 8 bytes.
pub const PACKED_TEMPORAL_SIZE: usize = 8;

pub const DECIMAL_MAX_PRECISION: u8 = 65;
pub const DECIMAL_MAX_SCALE: u8 = 38;

/// Default container nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 150;
/// Stricter nesting limit, equal to MySQL's own JSON document depth limit.
pub const LEGACY_MAX_DEPTH: usize = 100;
