//! Little-endian binary reader with cursor tracking.

use crate::BufferError;

/// Maximum number of bytes a variable-length integer may occupy.
pub const MAX_VARINT_BYTES: usize = 5;

/// A bounds-checked reader over a window of a byte slice.
///
/// All multi-byte integers are little-endian, which is the on-disk byte order
/// of MySQL binary JSON. Reads never go past `end`, even when the underlying
/// slice is longer, and a failed read leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use mysql_json_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0302));
/// assert_eq!(reader.size(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `uint8[x..]`, failing when `x` lies past the end
    /// of the slice.
    pub fn at(uint8: &'a [u8], x: usize) -> Result<Self, BufferError> {
        if x > uint8.len() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(Self {
            uint8,
            x,
            end: uint8.len(),
        })
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns the unread part of the window without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.uint8[self.x..self.end]
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit little-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.array().map(u16::from_le_bytes)
    }

    /// Reads a signed 16-bit little-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.array().map(i16::from_le_bytes)
    }

    /// Reads an unsigned 32-bit little-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.array().map(u32::from_le_bytes)
    }

    /// Reads a signed 32-bit little-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_le_bytes)
    }

    /// Reads an unsigned 64-bit little-endian integer.
    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.array().map(u64::from_le_bytes)
    }

    /// Reads a signed 64-bit little-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.array().map(i64::from_le_bytes)
    }

    /// Reads a 64-bit little-endian IEEE-754 float.
    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        self.array().map(f64::from_le_bytes)
    }

    /// Reads a container offset or size field: 4 bytes when `large`,
    /// 2 bytes otherwise.
    #[inline]
    pub fn try_offset(&mut self, large: bool) -> Result<u32, BufferError> {
        if large {
            self.try_u32()
        } else {
            self.try_u16().map(u32::from)
        }
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        self.x = end;
        Ok(&self.uint8[x..end])
    }

    /// Reads a variable-length unsigned integer: 7 payload bits per byte,
    /// least significant group first, high bit set on every byte but the
    /// last.
    ///
    /// At most [`MAX_VARINT_BYTES`] bytes are examined. Running out of input
    /// before a terminator is [`BufferError::EndOfBuffer`]; five bytes with
    /// no terminator is [`BufferError::VarintUnterminated`]; a decoded value
    /// above `u32::MAX` is [`BufferError::VarintOverflow`].
    pub fn try_varint(&mut self) -> Result<u32, BufferError> {
        let limit = MAX_VARINT_BYTES.min(self.size());
        let mut value: u64 = 0;
        for i in 0..limit {
            let byte = self.uint8[self.x + i];
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                let value = u32::try_from(value).map_err(|_| BufferError::VarintOverflow)?;
                self.x += i + 1;
                return Ok(value);
            }
        }
        if limit < MAX_VARINT_BYTES {
            Err(BufferError::EndOfBuffer)
        } else {
            Err(BufferError::VarintUnterminated(MAX_VARINT_BYTES))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x01));
        assert_eq!(reader.try_u8(), Ok(0x02));
        assert_eq!(reader.try_u8(), Ok(0x03));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_u16_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Ok(0x0201));
        assert_eq!(reader.try_u16(), Ok(0x0403));
    }

    #[test]
    fn test_u32_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Ok(0x04030201));
    }

    #[test]
    fn test_signed_reads() {
        let mut data = Vec::new();
        data.extend_from_slice(&(-1000i16).to_le_bytes());
        data.extend_from_slice(&(-123_456i32).to_le_bytes());
        data.extend_from_slice(&(-9_999_999_999i64).to_le_bytes());
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Ok(-1000));
        assert_eq!(reader.try_i32(), Ok(-123_456));
        assert_eq!(reader.try_i64(), Ok(-9_999_999_999));
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_u64_and_f64() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x0102030405060708u64.to_le_bytes());
        data.extend_from_slice(&std::f64::consts::PI.to_le_bytes());
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u64(), Ok(0x0102030405060708));
        assert_eq!(reader.try_f64(), Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_partial_read_does_not_advance() {
        let data = [0x01u8, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
        assert_eq!(reader.try_buf(4), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_window_end_is_respected() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05];
        let mut reader = Reader::at(&data[..3], 1).unwrap();
        assert_eq!(reader.size(), 2);
        assert_eq!(reader.rest(), &[0x02, 0x03]);
        assert_eq!(reader.try_u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.try_u16(), Ok(0x0302));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_at() {
        let data = [0x01u8, 0x02];
        assert_eq!(Reader::at(&data, 1).map(|r| r.rest()), Ok(&[0x02u8][..]));
        assert_eq!(Reader::at(&data, 2).map(|r| r.size()), Ok(0));
        assert_eq!(Reader::at(&data, 3).map(|r| r.size()), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_offset_width() {
        let data = [0x34u8, 0x12, 0x78, 0x56];
        assert_eq!(Reader::new(&data).try_offset(false), Ok(0x1234));
        assert_eq!(Reader::new(&data).try_offset(true), Ok(0x56781234));
        assert_eq!(
            Reader::new(&data[..3]).try_offset(true),
            Err(BufferError::EndOfBuffer)
        );
    }

    // ------------------------------------------------------------------
    // Varint
    // ------------------------------------------------------------------

    #[test]
    fn test_varint_single_byte() {
        let data = [0x03u8, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_varint(), Ok(3));
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_varint_two_bytes() {
        // 300 = 0b10_0101100
        let data = [0xacu8, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_varint(), Ok(300));
        assert_eq!(reader.x, 2);
    }

    #[test]
    fn test_varint_u32_max() {
        let data = [0xffu8, 0xff, 0xff, 0xff, 0x0f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_varint(), Ok(u32::MAX));
        assert_eq!(reader.x, 5);
    }

    #[test]
    fn test_varint_above_u32() {
        let data = [0xffu8, 0xff, 0xff, 0xff, 0x1f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_varint(), Err(BufferError::VarintOverflow));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_varint_sixth_byte() {
        let data = [0x80u8, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.try_varint(),
            Err(BufferError::VarintUnterminated(MAX_VARINT_BYTES))
        );
    }

    #[test]
    fn test_varint_truncated() {
        let data = [0x80u8, 0x80];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_varint(), Err(BufferError::EndOfBuffer));
        let empty: [u8; 0] = [];
        assert_eq!(Reader::new(&empty).try_varint(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_varint_stops_at_window_end() {
        let data = [0x80u8, 0x01];
        let mut reader = Reader::new(&data[..1]);
        assert_eq!(reader.try_varint(), Err(BufferError::EndOfBuffer));
    }
}
