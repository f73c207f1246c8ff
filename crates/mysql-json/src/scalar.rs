//! Scalar value parser.

use std::fmt::Display;
use std::io::Write;

use mysql_json_buffers::Reader;

use crate::error::JsonbError;
use crate::escape::append_escaped;
use crate::opaque::append_opaque;
use crate::types::{Literal, ScalarType};

/// Smallest decimal-point position printed in fixed notation.
const MIN_DECPT_FOR_F_FORMAT: i32 = -14;
/// Largest decimal-point position printed in fixed notation when the value
/// has no fractional digits.
const MAX_DECPT_FOR_F_FORMAT: i32 = 15;

/// Appends the scalar of type `ty` whose payload starts at `data[0]`.
///
/// `data` may extend past the value; only the bytes the value needs are
/// read.
pub(crate) fn append_scalar(
    out: &mut Vec<u8>,
    ty: ScalarType,
    data: &[u8],
) -> Result<(), JsonbError> {
    let mut reader = Reader::new(data);
    match ty {
        ScalarType::Literal => {
            let literal = Literal::from_byte(reader.try_u8()?)?;
            out.extend_from_slice(literal.as_str().as_bytes());
        }
        ScalarType::Int16 => push_number(out, reader.try_i16()?),
        ScalarType::UInt16 => push_number(out, reader.try_u16()?),
        ScalarType::Int32 => push_number(out, reader.try_i32()?),
        ScalarType::UInt32 => push_number(out, reader.try_u32()?),
        ScalarType::Int64 => push_number(out, reader.try_i64()?),
        ScalarType::UInt64 => push_number(out, reader.try_u64()?),
        ScalarType::Double => append_double(out, reader.try_f64()?),
        ScalarType::String => {
            let length = reader.try_varint()? as usize;
            let bytes = reader.try_buf(length)?;
            out.push(b'"');
            append_escaped(out, bytes);
            out.push(b'"');
        }
        ScalarType::Opaque => append_opaque(out, data)?,
    }
    Ok(())
}

/// Formats `value` straight into `out`. Writes to a `Vec` cannot fail.
pub(crate) fn push_number(out: &mut Vec<u8>, value: impl Display) {
    let _ = write!(out, "{value}");
}

/// Appends a double using the shortest digits that round-trip.
///
/// Values whose decimal point falls within `[-14, 15]` are printed in fixed
/// notation (`0.001`, `100000`, `1.5`); others use `d.ddde[-]x` (`1e16`,
/// `1.5e-20`). Non-finite values print as `null`.
pub fn append_double(out: &mut Vec<u8>, value: f64) {
    if !value.is_finite() {
        out.extend_from_slice(b"null");
        return;
    }
    if value.is_sign_negative() {
        out.push(b'-');
    }
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let ndigits = digits.len() as i32;
    let decpt = exponent + 1;

    let fixed = decpt >= MIN_DECPT_FOR_F_FORMAT
        && (decpt <= MAX_DECPT_FOR_F_FORMAT || ndigits > decpt);
    if !fixed {
        out.push(digits[0]);
        if digits.len() > 1 {
            out.push(b'.');
            out.extend_from_slice(&digits[1..]);
        }
        out.push(b'e');
        push_number(out, exponent);
    } else if decpt <= 0 {
        out.extend_from_slice(b"0.");
        out.resize(out.len() + decpt.unsigned_abs() as usize, b'0');
        out.extend_from_slice(&digits);
    } else if decpt >= ndigits {
        out.extend_from_slice(&digits);
        out.resize(out.len() + (decpt - ndigits) as usize, b'0');
    } else {
        let (int, frac) = digits.split_at(decpt as usize);
        out.extend_from_slice(int);
        out.push(b'.');
        out.extend_from_slice(frac);
    }
}
