//! Binary JSON decoder.

use crate::constants::{DEFAULT_MAX_DEPTH, LEGACY_MAX_DEPTH};
use crate::container::append_container;
use crate::error::JsonbError;
use crate::scalar::append_scalar;
use crate::types::JsonbType;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum number of nested containers. A document nesting exactly this
    /// many containers decodes; one more fails with
    /// [`JsonbError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderOptions {
    /// Options using [`LEGACY_MAX_DEPTH`].
    pub fn legacy() -> Self {
        Self {
            max_depth: LEGACY_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes stored binary JSON documents into JSON text.
///
/// Output uses `", "` between elements and `": "` after keys, and escapes
/// only `\\`, `"`, `\n`, `\r`, `\t`, `\b` and `\f`; every other byte of a
/// string or key is copied as-is.
///
/// ```
/// use mysql_json::JsonbDecoder;
///
/// let decoder = JsonbDecoder::default();
/// let doc = [0x00, 1, 0, 12, 0, 11, 0, 1, 0, 5, 5, 0, b'a'];
/// assert_eq!(decoder.decode(&doc).unwrap(), r#"{"a": 5}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonbDecoder {
    options: DecoderOptions,
}

impl JsonbDecoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Decodes a whole document (tag byte followed by its payload) to text.
    ///
    /// Bytes of strings that are not valid UTF-8 are replaced with U+FFFD;
    /// use [`decode_into`](Self::decode_into) for the exact bytes.
    pub fn decode(&self, data: &[u8]) -> Result<String, JsonbError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        self.decode_into(data, &mut out)?;
        Ok(match String::from_utf8(out) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Decodes a whole document, appending the text to `out`.
    ///
    /// On failure `out` is restored to its length before the call.
    pub fn decode_into(&self, data: &[u8], out: &mut Vec<u8>) -> Result<(), JsonbError> {
        match data.split_first() {
            Some((&tag, payload)) => self.decode_value_with_tag(tag, payload, 0, out),
            None => {
                tracing::debug!(input_len = 0, "empty binary JSON document");
                Err(JsonbError::TruncatedInput)
            }
        }
    }

    /// Decodes a value whose type tag has already been split off, starting
    /// at nesting level `depth`.
    ///
    /// On failure `out` is restored to its length before the call.
    pub fn decode_value_with_tag(
        &self,
        tag: u8,
        payload: &[u8],
        depth: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), JsonbError> {
        let start = out.len();
        let result = JsonbType::from_byte(tag)
            .and_then(|ty| self.append_value(out, ty, payload, depth));
        if let Err(err) = &result {
            out.truncate(start);
            tracing::debug!(
                error = %err,
                tag,
                input_len = payload.len() + 1,
                "binary JSON decode failed"
            );
        }
        result
    }

    /// Decodes a whole document into a [`serde_json::Value`].
    ///
    /// Fails with [`JsonbError::InvalidJsonText`] when the produced text is
    /// not valid JSON, e.g. because a string holds raw control characters.
    pub fn decode_value(&self, data: &[u8]) -> Result<serde_json::Value, JsonbError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        self.decode_into(data, &mut out)?;
        serde_json::from_slice(&out).map_err(|err| JsonbError::InvalidJsonText(err.to_string()))
    }

    /// Dispatches a value of type `ty` found at nesting level `depth`.
    /// Containers are one level deeper than `depth`; scalars do not count.
    pub(crate) fn append_value(
        &self,
        out: &mut Vec<u8>,
        ty: JsonbType,
        payload: &[u8],
        depth: usize,
    ) -> Result<(), JsonbError> {
        match ty {
            JsonbType::Container(container) => {
                let max_depth = self.options.max_depth;
                let depth = depth
                    .checked_add(1)
                    .filter(|depth| *depth <= max_depth)
                    .ok_or(JsonbError::DepthExceeded(max_depth))?;
                append_container(self, out, container, payload, depth)
            }
            JsonbType::Scalar(scalar) => append_scalar(out, scalar, payload),
        }
    }
}

/// Decodes a whole document with the default options.
pub fn decode(data: &[u8]) -> Result<String, JsonbError> {
    JsonbDecoder::default().decode(data)
}
