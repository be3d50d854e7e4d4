//! Exif value types.
//!
//! The Exif 2.32 specification defines thirteen wire types. The library
//! adds a few internal types for values that have no wire representation
//! of their own (comments with a charset prefix, XMP properties, dates
//! and times); these encode as `Undefined` when written to an IFD.

use crate::{Error, Result};

/// Exif value type, as stored in the type field of an IFD entry.
///
/// Codes 1..13 are wire types per TIFF 6.0 / Exif 2.32. The remaining
/// variants are internal to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum TypeId {
    /// Unsigned 8-bit integer (BYTE, code 1).
    UnsignedByte,
    /// NUL-terminated ASCII string (ASCII, code 2).
    AsciiString,
    /// Unsigned 16-bit integer (SHORT, code 3).
    UnsignedShort,
    /// Unsigned 32-bit integer (LONG, code 4).
    UnsignedLong,
    /// Two LONGs, numerator and denominator (RATIONAL, code 5).
    UnsignedRational,
    /// Signed 8-bit integer (SBYTE, code 6).
    SignedByte,
    /// Opaque byte sequence (UNDEFINED, code 7).
    Undefined,
    /// Signed 16-bit integer (SSHORT, code 8).
    SignedShort,
    /// Signed 32-bit integer (SLONG, code 9).
    SignedLong,
    /// Two SLONGs, numerator and denominator (SRATIONAL, code 10).
    SignedRational,
    /// 32-bit IEEE float (FLOAT, code 11).
    TiffFloat,
    /// 64-bit IEEE double (DOUBLE, code 12).
    TiffDouble,
    /// IFD pointer, layout identical to LONG (IFD, code 13).
    TiffIfd,
    /// Exif user comment with charset prefix (internal).
    Comment,
    /// XMP text property (internal).
    XmpText,
    /// XMP alternative array (internal).
    XmpAlt,
    /// XMP bag (internal).
    XmpBag,
    /// XMP sequence (internal).
    XmpSeq,
    /// XMP language alternative (internal).
    LangAlt,
    /// Date in `YYYY:MM:DD` form (internal).
    Date,
    /// Time in `HH:MM:SS` form (internal).
    Time,
}

impl TypeId {
    /// Parse a wire type code. Fails for codes outside 1..13.
    pub fn from_wire(code: u16) -> Result<Self> {
        match code {
            1 => Ok(TypeId::UnsignedByte),
            2 => Ok(TypeId::AsciiString),
            3 => Ok(TypeId::UnsignedShort),
            4 => Ok(TypeId::UnsignedLong),
            5 => Ok(TypeId::UnsignedRational),
            6 => Ok(TypeId::SignedByte),
            7 => Ok(TypeId::Undefined),
            8 => Ok(TypeId::SignedShort),
            9 => Ok(TypeId::SignedLong),
            10 => Ok(TypeId::SignedRational),
            11 => Ok(TypeId::TiffFloat),
            12 => Ok(TypeId::TiffDouble),
            13 => Ok(TypeId::TiffIfd),
            _ => Err(Error::InvalidTypeValue(code)),
        }
    }

    /// The wire type code used when this type is written to an IFD.
    ///
    /// Internal types encode as `Undefined` (7).
    pub const fn wire_code(self) -> u16 {
        match self {
            TypeId::UnsignedByte => 1,
            TypeId::AsciiString => 2,
            TypeId::UnsignedShort => 3,
            TypeId::UnsignedLong => 4,
            TypeId::UnsignedRational => 5,
            TypeId::SignedByte => 6,
            TypeId::Undefined => 7,
            TypeId::SignedShort => 8,
            TypeId::SignedLong => 9,
            TypeId::SignedRational => 10,
            TypeId::TiffFloat => 11,
            TypeId::TiffDouble => 12,
            TypeId::TiffIfd => 13,
            TypeId::Comment
            | TypeId::XmpText
            | TypeId::XmpAlt
            | TypeId::XmpBag
            | TypeId::XmpSeq
            | TypeId::LangAlt
            | TypeId::Date
            | TypeId::Time => 7,
        }
    }

    /// Size of one element in bytes.
    ///
    /// Rationals count as one element of eight bytes. Text types are one
    /// byte per element.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            TypeId::UnsignedByte
            | TypeId::AsciiString
            | TypeId::SignedByte
            | TypeId::Undefined
            | TypeId::Comment
            | TypeId::XmpText
            | TypeId::XmpAlt
            | TypeId::XmpBag
            | TypeId::XmpSeq
            | TypeId::LangAlt
            | TypeId::Date
            | TypeId::Time => 1,
            TypeId::UnsignedShort | TypeId::SignedShort => 2,
            TypeId::UnsignedLong | TypeId::SignedLong | TypeId::TiffFloat | TypeId::TiffIfd => 4,
            TypeId::UnsignedRational | TypeId::SignedRational | TypeId::TiffDouble => 8,
        }
    }

    /// Name matching the Exif specification.
    pub const fn name(self) -> &'static str {
        match self {
            TypeId::UnsignedByte => "Byte",
            TypeId::AsciiString => "Ascii",
            TypeId::UnsignedShort => "Short",
            TypeId::UnsignedLong => "Long",
            TypeId::UnsignedRational => "Rational",
            TypeId::SignedByte => "SByte",
            TypeId::Undefined => "Undefined",
            TypeId::SignedShort => "SShort",
            TypeId::SignedLong => "SLong",
            TypeId::SignedRational => "SRational",
            TypeId::TiffFloat => "Float",
            TypeId::TiffDouble => "Double",
            TypeId::TiffIfd => "Ifd",
            TypeId::Comment => "Comment",
            TypeId::XmpText => "XmpText",
            TypeId::XmpAlt => "XmpAlt",
            TypeId::XmpBag => "XmpBag",
            TypeId::XmpSeq => "XmpSeq",
            TypeId::LangAlt => "LangAlt",
            TypeId::Date => "Date",
            TypeId::Time => "Time",
        }
    }

    /// True for the integer wire types usable as offsets in a data-area
    /// entry (strip offsets and byte counts).
    #[inline]
    pub const fn is_offset_type(self) -> bool {
        matches!(
            self,
            TypeId::UnsignedByte | TypeId::UnsignedShort | TypeId::UnsignedLong | TypeId::TiffIfd
        )
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip() {
        for code in 1..=13u16 {
            let ty = TypeId::from_wire(code).unwrap();
            assert_eq!(ty.wire_code(), code);
        }
        assert!(TypeId::from_wire(0).is_err());
        assert!(TypeId::from_wire(14).is_err());
        assert!(TypeId::from_wire(0x1000).is_err());
    }

    #[test]
    fn internal_types_encode_as_undefined() {
        assert_eq!(TypeId::Comment.wire_code(), 7);
        assert_eq!(TypeId::Date.wire_code(), 7);
        assert_eq!(TypeId::XmpText.wire_code(), 7);
    }

    #[test]
    fn element_sizes() {
        assert_eq!(TypeId::UnsignedByte.size(), 1);
        assert_eq!(TypeId::UnsignedShort.size(), 2);
        assert_eq!(TypeId::UnsignedLong.size(), 4);
        assert_eq!(TypeId::UnsignedRational.size(), 8);
        assert_eq!(TypeId::TiffDouble.size(), 8);
        assert_eq!(TypeId::TiffIfd.size(), 4);
    }
}
