//! Value type tags of the binary JSON format.

use crate::constants::*;
use crate::error::JsonbError;

/// Offset and size width of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSize {
    /// 2-byte offsets and sizes.
    Small,
    /// 4-byte offsets and sizes.
    Large,
}

impl ContainerSize {
    pub fn is_large(self) -> bool {
        matches!(self, ContainerSize::Large)
    }

    /// Width in bytes of the offset and size fields.
    pub fn offset_size(self) -> usize {
        match self {
            ContainerSize::Small => SMALL_OFFSET_SIZE,
            ContainerSize::Large => LARGE_OFFSET_SIZE,
        }
    }

    /// Width in bytes of one key entry: offset plus 2-byte key length.
    pub fn key_entry_size(self) -> usize {
        self.offset_size() + KEY_LENGTH_SIZE
    }

    /// Width in bytes of one value entry: type tag plus offset or inlined value.
    pub fn value_entry_size(self) -> usize {
        1 + self.offset_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerType {
    pub kind: ContainerKind,
    pub size: ContainerSize,
}

impl ContainerType {
    pub fn is_object(self) -> bool {
        matches!(self.kind, ContainerKind::Object)
    }

    pub(crate) fn brackets(self) -> (u8, u8) {
        match self.kind {
            ContainerKind::Object => (b'{', b'}'),
            ContainerKind::Array => (b'[', b']'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Literal,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Double,
    String,
    Opaque,
}

impl ScalarType {
    /// Whether a value of this type is stored directly in the value entry of
    /// a container of the given size.
    pub fn is_inlined(self, size: ContainerSize) -> bool {
        match self {
            ScalarType::Literal | ScalarType::Int16 | ScalarType::UInt16 => true,
            ScalarType::Int32 | ScalarType::UInt32 => size.is_large(),
            ScalarType::Int64
            | ScalarType::UInt64
            | ScalarType::Double
            | ScalarType::String
            | ScalarType::Opaque => false,
        }
    }
}

/// A decoded type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonbType {
    Container(ContainerType),
    Scalar(ScalarType),
}

impl JsonbType {
    pub fn from_byte(tag: u8) -> Result<Self, JsonbError> {
        use ContainerKind::{Array, Object};
        use ContainerSize::{Large, Small};
        let ty = match tag {
            JSONB_TYPE_SMALL_OBJECT => Self::container(Object, Small),
            JSONB_TYPE_LARGE_OBJECT => Self::container(Object, Large),
            JSONB_TYPE_SMALL_ARRAY => Self::container(Array, Small),
            JSONB_TYPE_LARGE_ARRAY => Self::container(Array, Large),
            JSONB_TYPE_LITERAL => JsonbType::Scalar(ScalarType::Literal),
            JSONB_TYPE_INT16 => JsonbType::Scalar(ScalarType::Int16),
            JSONB_TYPE_UINT16 => JsonbType::Scalar(ScalarType::UInt16),
            JSONB_TYPE_INT32 => JsonbType::Scalar(ScalarType::Int32),
            JSONB_TYPE_UINT32 => JsonbType::Scalar(ScalarType::UInt32),
            JSONB_TYPE_INT64 => JsonbType::Scalar(ScalarType::Int64),
            JSONB_TYPE_UINT64 => JsonbType::Scalar(ScalarType::UInt64),
            JSONB_TYPE_DOUBLE => JsonbType::Scalar(ScalarType::Double),
            JSONB_TYPE_STRING => JsonbType::Scalar(ScalarType::String),
            JSONB_TYPE_OPAQUE => JsonbType::Scalar(ScalarType::Opaque),
            other => return Err(JsonbError::UnknownType(other)),
        };
        Ok(ty)
    }

    fn container(kind: ContainerKind, size: ContainerSize) -> Self {
        JsonbType::Container(ContainerType { kind, size })
    }
}

/// The three JSON literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    pub fn from_byte(byte: u8) -> Result<Self, JsonbError> {
        match byte {
            JSONB_NULL_LITERAL => Ok(Literal::Null),
            JSONB_TRUE_LITERAL => Ok(Literal::True),
            JSONB_FALSE_LITERAL => Ok(Literal::False),
            other => Err(JsonbError::InvalidLiteral(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::True => "true",
            Literal::False => "false",
        }
    }
}

/// Temporal SQL types carried as packed 8-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Time,
    Date,
    DateTime,
    Timestamp,
}

impl TemporalKind {
    /// SQL field type byte of this kind.
    pub fn field_type(self) -> u8 {
        match self {
            TemporalKind::Time => MYSQL_TYPE_TIME,
            TemporalKind::Date => MYSQL_TYPE_DATE,
            TemporalKind::DateTime => MYSQL_TYPE_DATETIME,
            TemporalKind::Timestamp => MYSQL_TYPE_TIMESTAMP,
        }
    }
}

/// How an opaque value is rendered, chosen by its SQL field type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueKind {
    Temporal(TemporalKind),
    Decimal,
    /// Any other SQL type; rendered as a base64 string.
    Other(u8),
}

impl OpaqueKind {
    pub fn from_field_type(field_type: u8) -> Self {
        match field_type {
            MYSQL_TYPE_TIME => OpaqueKind::Temporal(TemporalKind::Time),
            MYSQL_TYPE_DATE => OpaqueKind::Temporal(TemporalKind::Date),
            MYSQL_TYPE_DATETIME => OpaqueKind::Temporal(TemporalKind::DateTime),
            MYSQL_TYPE_TIMESTAMP => OpaqueKind::Temporal(TemporalKind::Timestamp),
            MYSQL_TYPE_NEWDECIMAL => OpaqueKind::Decimal,
            other => OpaqueKind::Other(other),
        }
    }
}
