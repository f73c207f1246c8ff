//! Packed temporal values tunneled through opaque JSON values.
//!
//! TIME, DATE, DATETIME and TIMESTAMP are stored as one little-endian signed
//! 64-bit integer. The low 24 bits hold microseconds; the rest packs the
//! calendar and clock fields:
//!
//! | Kind | Integer part layout (most significant first) |
//! |------|----------------------------------------------|
//! | DATE / DATETIME / TIMESTAMP | `year * 13 + month` (17+ bits), day (5), hour (5), minute (6), second (6) |
//! | TIME | hour (10), minute (6), second (6) |
//!
//! Negative values store the magnitude negated.

use mysql_json_buffers::Reader;

use crate::constants::PACKED_TEMPORAL_SIZE;
use crate::error::JsonbError;
use crate::scalar::push_number;
use crate::types::TemporalKind;

const FRAC_BITS: u32 = 24;
const FRAC_DIGITS: usize = 6;

/// Broken-down temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MysqlTime {
    pub kind: TemporalKind,
    pub neg: bool,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Microseconds.
    pub second_part: u32,
}

impl MysqlTime {
    /// Unpacks a packed temporal integer of the given kind.
    pub fn from_packed(kind: TemporalKind, packed: i64) -> Self {
        let neg = packed < 0;
        let magnitude = packed.unsigned_abs();
        let second_part = (magnitude % (1 << FRAC_BITS)) as u32;
        let int_part = magnitude >> FRAC_BITS;
        match kind {
            TemporalKind::Time => Self {
                kind,
                neg,
                year: 0,
                month: 0,
                day: 0,
                hour: ((int_part >> 12) % (1 << 10)) as u32,
                minute: ((int_part >> 6) % (1 << 6)) as u32,
                second: (int_part % (1 << 6)) as u32,
                second_part,
            },
            TemporalKind::Date | TemporalKind::DateTime | TemporalKind::Timestamp => {
                let ymd = int_part >> 17;
                let ym = ymd >> 5;
                let hms = int_part % (1 << 17);
                Self {
                    kind,
                    neg,
                    year: (ym / 13) as u32,
                    month: (ym % 13) as u32,
                    day: (ymd % (1 << 5)) as u32,
                    hour: (hms >> 12) as u32,
                    minute: ((hms >> 6) % (1 << 6)) as u32,
                    second: (hms % (1 << 6)) as u32,
                    second_part,
                }
            }
        }
    }

    /// Writes the textual form, without quotes.
    ///
    /// DATE is `YYYY-MM-DD`; DATETIME and TIMESTAMP add ` hh:mm:ss.ffffff`;
    /// TIME is `[-]hh:mm:ss.ffffff` with hours widened past two digits when
    /// needed. Fixed-width fields keep only their low digits.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self.kind {
            TemporalKind::Date => self.write_date(out),
            TemporalKind::DateTime | TemporalKind::Timestamp => {
                self.write_date(out);
                out.push(b' ');
                push_digits(out, self.hour, 2);
                self.write_clock_tail(out);
            }
            TemporalKind::Time => {
                if self.neg {
                    out.push(b'-');
                }
                if self.hour > 99 {
                    push_number(out, self.hour);
                } else {
                    push_digits(out, self.hour, 2);
                }
                self.write_clock_tail(out);
            }
        }
    }

    fn write_date(&self, out: &mut Vec<u8>) {
        push_digits(out, self.year, 4);
        out.push(b'-');
        push_digits(out, self.month, 2);
        out.push(b'-');
        push_digits(out, self.day, 2);
    }

    fn write_clock_tail(&self, out: &mut Vec<u8>) {
        out.push(b':');
        push_digits(out, self.minute, 2);
        out.push(b':');
        push_digits(out, self.second, 2);
        out.push(b'.');
        push_digits(out, self.second_part, FRAC_DIGITS);
    }
}

/// Writes the low `digits` decimal digits of `val`, zero-padded.
fn push_digits(out: &mut Vec<u8>, mut val: u32, digits: usize) {
    let start = out.len();
    out.resize(start + digits, b'0');
    for slot in out[start..].iter_mut().rev() {
        *slot = b'0' + (val % 10) as u8;
        val /= 10;
    }
}

/// Appends a quoted temporal value decoded from an opaque blob.
pub(crate) fn append_temporal(
    out: &mut Vec<u8>,
    kind: TemporalKind,
    blob: &[u8],
) -> Result<(), JsonbError> {
    if blob.len() < PACKED_TEMPORAL_SIZE {
        return Err(JsonbError::MalformedOpaque {
            field_type: kind.field_type(),
            reason: "packed temporal value is shorter than 8 bytes",
        });
    }
    let packed = Reader::new(blob).try_i64()?;
    let time = MysqlTime::from_packed(kind, packed);
    out.push(b'"');
    time.write_to(out);
    out.push(b'"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_datetime(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64, us: i64) -> i64 {
        let ymd = ((y * 13 + mo) << 5) | d;
        let hms = (h << 12) | (mi << 6) | s;
        (((ymd << 17) | hms) << 24) + us
    }

    fn render(kind: TemporalKind, packed: i64) -> String {
        let mut out = Vec::new();
        MysqlTime::from_packed(kind, packed).write_to(&mut out);
        String::from_utf8(out).expect("temporal text is ascii")
    }

    #[test]
    fn date() {
        let packed = packed_datetime(2020, 1, 1, 0, 0, 0, 0);
        assert_eq!(packed, 1_847_955_789_872_889_856);
        assert_eq!(render(TemporalKind::Date, packed), "2020-01-01");
    }

    #[test]
    fn datetime_with_microseconds() {
        let packed = packed_datetime(2021, 3, 14, 15, 9, 26, 535_897);
        assert_eq!(
            render(TemporalKind::DateTime, packed),
            "2021-03-14 15:09:26.535897"
        );
        assert_eq!(
            render(TemporalKind::Timestamp, packed),
            "2021-03-14 15:09:26.535897"
        );
    }

    #[test]
    fn datetime_always_prints_six_fraction_digits() {
        let packed = packed_datetime(1999, 12, 31, 23, 59, 59, 0);
        assert_eq!(
            render(TemporalKind::DateTime, packed),
            "1999-12-31 23:59:59.000000"
        );
    }

    #[test]
    fn zero_date() {
        assert_eq!(render(TemporalKind::Date, 0), "0000-00-00");
    }

    #[test]
    fn time_positive_and_negative() {
        let hms = (12i64 << 12) | (30 << 6) | 45;
        assert_eq!(render(TemporalKind::Time, hms << 24), "12:30:45.000000");
        let hms = (838i64 << 12) | (59 << 6) | 59;
        assert_eq!(render(TemporalKind::Time, -(hms << 24)), "-838:59:59.000000");
        let hms = (1i64 << 12) | (2 << 6) | 3;
        assert_eq!(
            render(TemporalKind::Time, (hms << 24) + 500_000),
            "01:02:03.500000"
        );
    }

    #[test]
    fn short_blob_is_malformed() {
        let mut out = Vec::new();
        assert_eq!(
            append_temporal(&mut out, TemporalKind::Date, &[0u8; 7]),
            Err(JsonbError::MalformedOpaque {
                field_type: 10,
                reason: "packed temporal value is shorter than 8 bytes",
            })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn extra_bytes_after_packed_value_are_ignored() {
        let mut blob = packed_datetime(2020, 1, 1, 0, 0, 0, 0).to_le_bytes().to_vec();
        blob.push(0xaa);
        let mut out = Vec::new();
        append_temporal(&mut out, TemporalKind::Date, &blob).expect("date decodes");
        assert_eq!(out, b"\"2020-01-01\"");
    }
}
