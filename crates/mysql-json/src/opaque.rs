//! Opaque values: SQL values with no JSON counterpart.
//!
//! Payload layout is the SQL field type byte, a varint length and the blob.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mysql_json_buffers::Reader;

use crate::decimal::append_decimal;
use crate::error::JsonbError;
use crate::scalar::push_number;
use crate::temporal::append_temporal;
use crate::types::OpaqueKind;

/// Appends the opaque value whose payload starts at `data[0]`.
pub(crate) fn append_opaque(out: &mut Vec<u8>, data: &[u8]) -> Result<(), JsonbError> {
    let mut reader = Reader::new(data);
    let field_type = reader.try_u8()?;
    let length = reader.try_varint()? as usize;
    let blob = reader.try_buf(length)?;
    match OpaqueKind::from_field_type(field_type) {
        OpaqueKind::Temporal(kind) => append_temporal(out, kind, blob),
        OpaqueKind::Decimal => append_decimal(out, blob),
        OpaqueKind::Other(field_type) => {
            append_base64(out, field_type, blob);
            Ok(())
        }
    }
}

/// Output characters per line of base64 text.
const BASE64_LINE_LENGTH: usize = 76;

/// Appends `"base64:type<N>:<data>"` using the padded standard alphabet,
/// with a raw `\n` after every 76 characters of encoded data.
fn append_base64(out: &mut Vec<u8>, field_type: u8, blob: &[u8]) {
    out.extend_from_slice(b"\"base64:type");
    push_number(out, field_type);
    out.push(b':');
    let encoded = STANDARD.encode(blob);
    for (i, line) in encoded.as_bytes().chunks(BASE64_LINE_LENGTH).enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(line);
    }
    out.push(b'"');
}
