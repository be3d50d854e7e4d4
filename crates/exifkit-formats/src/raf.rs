//! Fujifilm RAF raw format.
//!
//! RAF is a fixed 160-byte wrapper followed by an embedded JPEG preview
//! (which carries the EXIF) and the CFA data. The preview's offset and
//! length are big-endian u32 values at bytes 84 and 88. Writing RAF is
//! not supported.

use crate::jpeg::JpegFormat;
use crate::{MetadataFormat, ReadSeek, Result};
use exifkit_core::Error as CoreError;
use exifkit_tiff::ExifData;
use std::io::Cursor;

const RAF_MAGIC: &[u8] = b"FUJIFILMCCD-RAW ";

/// Fujifilm RAF metadata front-end (read-only).
pub struct RafFormat;

impl MetadataFormat for RafFormat {
    fn can_parse(&self, header: &[u8]) -> bool {
        header.len() >= RAF_MAGIC.len() && &header[..RAF_MAGIC.len()] == RAF_MAGIC
    }

    fn format_name(&self) -> &'static str {
        "RAF"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["raf"]
    }

    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData> {
        let data = crate::utils::read_with_limit(reader)?;
        if !self.can_parse(&data) {
            return Err(CoreError::NotAnImage("RAF").into());
        }
        if data.len() < 92 {
            return Err(CoreError::FailedToReadImageData.into());
        }
        let jpg_off =
            u32::from_be_bytes([data[84], data[85], data[86], data[87]]) as usize;
        let jpg_len =
            u32::from_be_bytes([data[88], data[89], data[90], data[91]]) as usize;
        let end = jpg_off
            .checked_add(jpg_len)
            .filter(|&e| e <= data.len())
            .ok_or_else(|| CoreError::corrupted("RAF preview exceeds file size"))?;
        if jpg_len < 12 {
            return Err(CoreError::corrupted("RAF preview too small").into());
        }
        let preview = &data[jpg_off..end];
        JpegFormat.read_metadata(&mut Cursor::new(preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_raf_magic() {
        let f = RafFormat;
        let mut h = RAF_MAGIC.to_vec();
        h.extend_from_slice(&[0u8; 16]);
        assert!(f.can_parse(&h));
        assert!(!f.can_parse(b"FUJIFILM but not raw"));
    }

    #[test]
    fn preview_out_of_range_is_corrupt() {
        let mut data = RAF_MAGIC.to_vec();
        data.resize(160, 0);
        data[84..88].copy_from_slice(&1000u32.to_be_bytes());
        data[88..92].copy_from_slice(&1000u32.to_be_bytes());
        let err = RafFormat
            .read_metadata(&mut Cursor::new(data))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Core(CoreError::CorruptedMetadata(_))
        ));
    }

    #[test]
    fn writing_is_unsupported() {
        use std::io::Cursor;
        let mut out = Vec::new();
        let err = RafFormat
            .write_metadata(
                &mut Cursor::new(RAF_MAGIC.to_vec()),
                &mut out,
                &ExifData::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Core(CoreError::WritingImageFormatUnsupported("RAF"))
        ));
    }
}
