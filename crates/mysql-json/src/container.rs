//! Object and array parser.
//!
//! A container is laid out as
//!
//! ```text
//! element_count | byte_length | key entries (objects only) | value entries | keys and values
//! ```
//!
//! where every offset is relative to the start of the container and the
//! header fields and offsets are 2 bytes wide in the small format and 4 in
//! the large one. A key entry is `offset | u16 length`. A value entry is a
//! type tag followed by either an offset or, for inlined scalars, the value
//! itself.

use mysql_json_buffers::Reader;

use crate::decoder::JsonbDecoder;
use crate::error::JsonbError;
use crate::escape::append_escaped;
use crate::scalar::append_scalar;
use crate::types::{ContainerType, JsonbType};

const ELEMENT_SEPARATOR: &[u8] = b", ";
const KEY_SEPARATOR: &[u8] = b"\": ";

/// Appends the container of type `ty` whose header starts at `data[0]`.
///
/// `depth` is the nesting level of this container; children are handed back
/// to the decoder at this depth, which accounts for their own level.
pub(crate) fn append_container(
    decoder: &JsonbDecoder,
    out: &mut Vec<u8>,
    ty: ContainerType,
    data: &[u8],
    depth: usize,
) -> Result<(), JsonbError> {
    let size = ty.size;
    let large = size.is_large();
    let mut header = Reader::new(data);
    let element_count = header.try_offset(large)? as usize;
    let byte_length = header.try_offset(large)? as usize;
    if byte_length > data.len() {
        return Err(JsonbError::InconsistentContainerLength {
            declared: byte_length,
            available: data.len(),
        });
    }
    let data = &data[..byte_length];

    let key_entries = header.x;
    let key_table_size = if ty.is_object() {
        element_count
            .checked_mul(size.key_entry_size())
            .ok_or(JsonbError::TruncatedInput)?
    } else {
        0
    };
    let value_entries = key_entries + key_table_size;
    let tables_end = element_count
        .checked_mul(size.value_entry_size())
        .and_then(|n| n.checked_add(value_entries))
        .ok_or(JsonbError::TruncatedInput)?;
    if tables_end > data.len() {
        return Err(JsonbError::TruncatedInput);
    }

    tracing::trace!(
        kind = ?ty.kind,
        large,
        element_count,
        byte_length,
        depth,
        "entering container"
    );

    let (open, close) = ty.brackets();
    out.push(open);
    for i in 0..element_count {
        if i > 0 {
            out.extend_from_slice(ELEMENT_SEPARATOR);
        }
        if ty.is_object() {
            let mut entry = Reader::at(data, key_entries + i * size.key_entry_size())?;
            let key_offset = entry.try_offset(large)? as usize;
            let key_length = usize::from(entry.try_u16()?);
            let key = Reader::at(data, key_offset)?.try_buf(key_length)?;
            out.push(b'"');
            append_escaped(out, key);
            out.extend_from_slice(KEY_SEPARATOR);
        }

        let mut entry = Reader::at(data, value_entries + i * size.value_entry_size())?;
        let value_type = JsonbType::from_byte(entry.try_u8()?)?;
        match value_type {
            JsonbType::Scalar(scalar) if scalar.is_inlined(size) => {
                append_scalar(out, scalar, entry.rest())?;
            }
            _ => {
                let offset = entry.try_offset(large)? as usize;
                let value = Reader::at(data, offset)?.rest();
                decoder.append_value(out, value_type, value, depth)?;
            }
        }
    }
    out.push(close);
    Ok(())
}
