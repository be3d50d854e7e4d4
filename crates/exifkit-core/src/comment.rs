//! Exif user comment handling.
//!
//! The `UserComment` tag (0x9286) stores an 8-byte charset id followed
//! by the comment text in that charset:
//!
//! - `ASCII\0\0\0` - 7-bit ASCII
//! - `JIS\0\0\0\0\0` - ISO 2022-JP
//! - `UNICODE\0` - UCS-2 in the byte order of the enclosing image
//! - eight zero bytes - undefined, treated as raw text
//!
//! Reference: Exif 2.32 specification, Section 4.6.6 (Tag 37510)

use crate::ByteOrder;
use encoding_rs::{ISO_2022_JP, UTF_16BE, UTF_16LE};

/// Charset id of a user comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    Ascii,
    Jis,
    Unicode,
    /// Eight zero bytes: charset undefined, bytes taken as-is.
    #[default]
    Undefined,
}

impl Charset {
    /// The 8-byte charset id written before the comment text.
    pub const fn id(self) -> &'static [u8; 8] {
        match self {
            Charset::Ascii => b"ASCII\0\0\0",
            Charset::Jis => b"JIS\0\0\0\0\0",
            Charset::Unicode => b"UNICODE\0",
            Charset::Undefined => &[0u8; 8],
        }
    }

    /// Identify the charset from the first 8 bytes of a comment value.
    pub fn from_id(id: &[u8]) -> Self {
        if id.len() < 8 {
            return Charset::Undefined;
        }
        match &id[..8] {
            b"ASCII\0\0\0" => Charset::Ascii,
            b"JIS\0\0\0\0\0" => Charset::Jis,
            b"UNICODE\0" => Charset::Unicode,
            _ => Charset::Undefined,
        }
    }
}

/// A decoded user comment: charset plus text.
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use]
pub struct Comment {
    charset: Charset,
    text: String,
}

impl Comment {
    /// Create a comment with an explicit charset.
    pub fn new(charset: Charset, text: impl Into<String>) -> Self {
        Self {
            charset,
            text: text.into(),
        }
    }

    /// Create an ASCII comment.
    pub fn ascii(text: impl Into<String>) -> Self {
        Self::new(Charset::Ascii, text)
    }

    /// Decode a comment from raw tag bytes.
    ///
    /// Values shorter than the 8-byte charset id decode as undefined
    /// charset with the bytes taken verbatim. UCS-2 text uses the byte
    /// order of the enclosing image.
    pub fn from_bytes(data: &[u8], bo: ByteOrder) -> Self {
        if data.len() < 8 {
            return Self::new(Charset::Undefined, String::from_utf8_lossy(data));
        }
        let charset = Charset::from_id(data);
        let body = &data[8..];
        let text = match charset {
            Charset::Ascii | Charset::Undefined => String::from_utf8_lossy(body).into_owned(),
            Charset::Jis => {
                let (s, _, _) = ISO_2022_JP.decode(body);
                s.into_owned()
            }
            Charset::Unicode => {
                let enc = match bo {
                    ByteOrder::Little => UTF_16LE,
                    ByteOrder::Big => UTF_16BE,
                };
                let (s, _, _) = enc.decode(body);
                s.into_owned()
            }
        };
        // Cameras pad with NUL or spaces to a fixed length.
        let text = text.trim_end_matches(['\0', ' ']).to_string();
        Self { charset, text }
    }

    /// Encode the comment as raw tag bytes (charset id + text).
    pub fn to_bytes(&self, bo: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.text.len());
        out.extend_from_slice(self.charset.id());
        match self.charset {
            Charset::Ascii | Charset::Undefined => out.extend_from_slice(self.text.as_bytes()),
            Charset::Jis => {
                let (bytes, _, _) = ISO_2022_JP.encode(&self.text);
                out.extend_from_slice(&bytes);
            }
            Charset::Unicode => {
                for unit in self.text.encode_utf16() {
                    out.extend_from_slice(&bo.write_u16(unit));
                }
            }
        }
        out
    }

    /// The comment text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The comment charset.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Serialized length in bytes.
    pub fn byte_len(&self) -> usize {
        match self.charset {
            Charset::Unicode => 8 + self.text.encode_utf16().count() * 2,
            Charset::Jis => 8 + ISO_2022_JP.encode(&self.text).0.len(),
            Charset::Ascii | Charset::Undefined => 8 + self.text.len(),
        }
    }
}
