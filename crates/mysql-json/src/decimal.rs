//! Binary NEWDECIMAL values tunneled through opaque JSON values.
//!
//! The blob is `precision`, `scale`, then the binary decimal. Digits are
//! grouped by nine into big-endian 4-byte words; a leading or trailing
//! partial group uses the fewest bytes that can hold its digits. The sign is
//! carried by the high bit of the first byte (set for non-negative values),
//! and negative values store every byte inverted.

use crate::constants::{DECIMAL_MAX_PRECISION, DECIMAL_MAX_SCALE, MYSQL_TYPE_NEWDECIMAL};
use crate::error::JsonbError;

const DIG_PER_DEC: usize = 9;
const DIG_MAX: u32 = 999_999_999;
const DIG2BYTES: [usize; DIG_PER_DEC + 1] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];
const POWERS10: [u32; DIG_PER_DEC + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Byte length of the binary form of a decimal with the given precision and
/// scale.
pub fn decimal_bin_size(precision: u8, scale: u8) -> usize {
    let intg = usize::from(precision.saturating_sub(scale));
    let scale = usize::from(scale);
    (intg / DIG_PER_DEC) * 4
        + DIG2BYTES[intg % DIG_PER_DEC]
        + (scale / DIG_PER_DEC) * 4
        + DIG2BYTES[scale % DIG_PER_DEC]
}

fn malformed(reason: &'static str) -> JsonbError {
    JsonbError::MalformedOpaque {
        field_type: MYSQL_TYPE_NEWDECIMAL,
        reason,
    }
}

fn push_group(text: &mut String, value: u32, digits: usize) {
    text.push_str(&format!("{value:0digits$}"));
}

/// Appends a decimal blob as an unquoted JSON number.
///
/// The fraction always has exactly `scale` digits. A minus sign is written
/// only for non-zero values.
pub(crate) fn append_decimal(out: &mut Vec<u8>, blob: &[u8]) -> Result<(), JsonbError> {
    let (precision, scale, bin) = match blob {
        [precision, scale, bin @ ..] => (*precision, *scale, bin),
        _ => return Err(malformed("missing precision and scale")),
    };
    if precision > DECIMAL_MAX_PRECISION {
        return Err(malformed("precision out of range"));
    }
    if scale > DECIMAL_MAX_SCALE || scale > precision {
        return Err(malformed("scale out of range"));
    }
    if bin.len() != decimal_bin_size(precision, scale) {
        return Err(malformed("binary length does not match precision and scale"));
    }

    let negative = bin.first().is_some_and(|b| b & 0x80 == 0);
    let mask = if negative { 0xff } else { 0x00 };
    let mut bytes: Vec<u8> = bin.iter().map(|b| b ^ mask).collect();
    if let Some(first) = bytes.first_mut() {
        *first ^= 0x80;
    }

    let mut rest = bytes.as_slice();
    let mut take = |len: usize| -> u32 {
        let (head, tail) = rest.split_at(len);
        rest = tail;
        head.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    };

    let intg = usize::from(precision - scale);
    let scale = usize::from(scale);
    let (intg0, intg0x) = (intg / DIG_PER_DEC, intg % DIG_PER_DEC);
    let (frac0, frac0x) = (scale / DIG_PER_DEC, scale % DIG_PER_DEC);

    let mut int_text = String::with_capacity(intg);
    if intg0x > 0 {
        let value = take(DIG2BYTES[intg0x]);
        if value >= POWERS10[intg0x] {
            return Err(malformed("leading digit group out of range"));
        }
        push_group(&mut int_text, value, intg0x);
    }
    for _ in 0..intg0 {
        let value = take(4);
        if value > DIG_MAX {
            return Err(malformed("digit group out of range"));
        }
        push_group(&mut int_text, value, DIG_PER_DEC);
    }

    let mut frac_text = String::with_capacity(scale);
    for _ in 0..frac0 {
        let value = take(4);
        if value > DIG_MAX {
            return Err(malformed("digit group out of range"));
        }
        push_group(&mut frac_text, value, DIG_PER_DEC);
    }
    if frac0x > 0 {
        let value = take(DIG2BYTES[frac0x]);
        if value >= POWERS10[frac0x] {
            return Err(malformed("trailing digit group out of range"));
        }
        push_group(&mut frac_text, value, frac0x);
    }

    let non_zero = int_text.bytes().chain(frac_text.bytes()).any(|b| b != b'0');
    if negative && non_zero {
        out.push(b'-');
    }
    let int_digits = int_text.trim_start_matches('0');
    if int_digits.is_empty() {
        out.push(b'0');
    } else {
        out.extend_from_slice(int_digits.as_bytes());
    }
    if scale > 0 {
        out.push(b'.');
        out.extend_from_slice(frac_text.as_bytes());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blob: &[u8]) -> Result<String, JsonbError> {
        let mut out = Vec::new();
        append_decimal(&mut out, blob)?;
        Ok(String::from_utf8(out).expect("decimal text is ascii"))
    }

    #[test]
    fn bin_sizes() {
        assert_eq!(decimal_bin_size(5, 2), 3);
        assert_eq!(decimal_bin_size(2, 2), 1);
        assert_eq!(decimal_bin_size(9, 0), 4);
        assert_eq!(decimal_bin_size(10, 0), 5);
        assert_eq!(decimal_bin_size(20, 0), 9);
        assert_eq!(decimal_bin_size(65, 30), 30);
    }

    #[test]
    fn positive_with_fraction() {
        assert_eq!(render(&[5, 2, 0x80, 0x7b, 0x2d]).unwrap(), "123.45");
    }

    #[test]
    fn fraction_keeps_trailing_zero() {
        assert_eq!(render(&[2, 2, 0x8a]).unwrap(), "0.10");
    }

    #[test]
    fn negative_value() {
        assert_eq!(render(&[5, 2, 0x7f, 0x84, 0xd2]).unwrap(), "-123.45");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(render(&[3, 2, 0x7f, 0xff]).unwrap(), "0.00");
    }

    #[test]
    fn integer_only() {
        assert_eq!(
            render(&[20, 0, 0x8c, 0x14, 0x9a, 0xa4, 0x35, 0x0d, 0xfb, 0x38, 0xd2]).unwrap(),
            "12345678901234567890"
        );
    }

    #[test]
    fn full_and_partial_fraction_groups() {
        assert_eq!(
            render(&[10, 10, 0x80, 0x00, 0x00, 0x01, 0x05]).unwrap(),
            "0.0000000015"
        );
    }

    #[test]
    fn precision_and_scale_limits() {
        assert!(matches!(
            render(&[66, 0]),
            Err(JsonbError::MalformedOpaque { field_type: 246, .. })
        ));
        assert!(render(&[4, 5, 0x80, 0x00, 0x00]).is_err());
        assert!(render(&[65, 39]).is_err());
        assert!(render(&[5]).is_err());
    }

    #[test]
    fn zero_precision_is_zero() {
        assert_eq!(render(&[0, 0]).unwrap(), "0");
        assert_eq!(
            render(&[0, 0, 0x80]),
            Err(malformed("binary length does not match precision and scale"))
        );
        assert!(render(&[0, 1]).is_err());
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            render(&[5, 2, 0x80, 0x7b]),
            Err(malformed("binary length does not match precision and scale"))
        );
        assert!(render(&[5, 2, 0x80, 0x7b, 0x2d, 0x00]).is_err());
    }

    #[test]
    fn out_of_range_groups() {
        assert_eq!(
            render(&[2, 0, 0x80 | 100]),
            Err(malformed("leading digit group out of range"))
        );
        assert_eq!(
            render(&[9, 0, 0xbb, 0x9a, 0xca, 0x00]),
            Err(malformed("digit group out of range"))
        );
        assert_eq!(
            render(&[2, 2, 0x80 | 100]),
            Err(malformed("trailing digit group out of range"))
        );
    }
}
