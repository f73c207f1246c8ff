//! String escaping for decoded keys and string values.

/// Appends `data` to `out`, escaping backslash, double quote, and the
/// `\b \t \n \f \r` control characters.
///
/// Every other byte, including the remaining control characters below 0x20,
/// is copied verbatim. Stored documents rely on this exact behaviour, so it
/// must not be widened to full JSON escaping.
///
/// # Examples
///
/// ```
/// use mysql_json::escape::append_escaped;
///
/// let mut out = Vec::new();
/// append_escaped(&mut out, b"say \"hi\"\n");
/// assert_eq!(out, b"say \\\"hi\\\"\\n");
/// ```
pub fn append_escaped(out: &mut Vec<u8>, data: &[u8]) {
    let mut last = 0;
    for (i, &byte) in data.iter().enumerate() {
        let escaped: &[u8] = match byte {
            b'\\' => b"\\\\",
            b'"' => b"\\\"",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            _ => continue,
        };
        out.extend_from_slice(&data[last..i]);
        out.extend_from_slice(escaped);
        last = i + 1;
    }
    out.extend_from_slice(&data[last..]);
}
