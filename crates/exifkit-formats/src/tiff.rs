//! TIFF front-end, shared by the TIFF-based raw formats.
//!
//! Each raw format configures the generic front-end with its header
//! codec, name and extensions; CR2 additionally wires the offset writer
//! through the engine (see `cr2.rs`).

use crate::{Error, MetadataFormat, ReadSeek, Result};
use exifkit_core::Error as CoreError;
use exifkit_tiff::{decoder, encoder, reader, ExifData, HeaderFormat, TiffHeader};
use std::io::Write;

/// Configuration of a TIFF-family front-end.
#[derive(Clone)]
pub struct TiffConfig {
    pub format_name: &'static str,
    pub extensions: &'static [&'static str],
    pub header_format: HeaderFormat,
    /// Whether the format has a write path.
    pub writable: bool,
}

impl Default for TiffConfig {
    fn default() -> Self {
        Self {
            format_name: "TIFF",
            extensions: &["tif", "tiff", "dng"],
            header_format: HeaderFormat::Standard,
            writable: true,
        }
    }
}

/// Generic TIFF metadata front-end.
pub struct TiffFormat {
    config: TiffConfig,
}

impl TiffFormat {
    pub fn with_config(config: TiffConfig) -> Self {
        Self { config }
    }

    pub(crate) fn read_block(&self, data: &[u8]) -> Result<ExifData> {
        let header = TiffHeader::read(data, self.config.header_format)
            .map_err(|_| CoreError::NotAnImage(self.config.format_name))?;
        let (root_group, _) = encoder::root_for(self.config.header_format);
        let parsed = reader::read(data, &header, root_group)?;
        Ok(decoder::decode(&parsed.root, parsed.byte_order)?)
    }

    pub(crate) fn write_block(&self, data: &[u8], exif: &ExifData) -> Result<Vec<u8>> {
        let header = TiffHeader::read(data, self.config.header_format)
            .map_err(|_| CoreError::NotAnImage(self.config.format_name))?;
        Ok(encoder::encode(Some(data), &header, exif)?.bytes)
    }
}

impl Default for TiffFormat {
    fn default() -> Self {
        Self {
            config: TiffConfig::default(),
        }
    }
}

impl MetadataFormat for TiffFormat {
    fn can_parse(&self, header: &[u8]) -> bool {
        if header.len() < 4 {
            return false;
        }
        let classic_le = header.starts_with(&[0x49, 0x49, 0x2A, 0x00]);
        let classic_be = header.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]);
        match self.config.header_format {
            HeaderFormat::Standard | HeaderFormat::Cr2 => classic_le || classic_be,
            HeaderFormat::Orf => {
                (header.starts_with(b"II") || header.starts_with(b"MM"))
                    && (&header[2..4] == b"RO"
                        || &header[2..4] == b"OR"
                        || &header[2..4] == b"RS"
                        || &header[2..4] == b"SR")
            }
            HeaderFormat::Rw2 => header.starts_with(&[0x49, 0x49, 0x55, 0x00]),
        }
    }

    fn format_name(&self) -> &'static str {
        self.config.format_name
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.config.extensions
    }

    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData> {
        let data = crate::utils::read_with_limit(reader)?;
        if data.len() < 8 {
            return Err(Error::InvalidStructure("TIFF file too small".into()));
        }
        self.read_block(&data)
    }

    fn write_metadata(
        &self,
        reader: &mut dyn ReadSeek,
        output: &mut dyn Write,
        exif: &ExifData,
    ) -> Result<()> {
        if !self.config.writable {
            return Err(CoreError::WritingImageFormatUnsupported(self.config.format_name).into());
        }
        let data = crate::utils::read_with_limit(reader)?;
        if data.len() < 8 {
            return Err(Error::InvalidStructure("TIFF file too small".into()));
        }
        let out = self.write_block(&data, exif)?;
        output.write_all(&out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exifkit_core::{ByteOrder, Value};
    use exifkit_tiff::ExifKey;
    use exifkit_tags::IfdId;
    use std::io::Cursor;

    #[test]
    fn detects_classic_tiff() {
        let f = TiffFormat::default();
        assert!(f.can_parse(&[0x49, 0x49, 0x2A, 0x00]));
        assert!(f.can_parse(&[0x4D, 0x4D, 0x00, 0x2A]));
        assert!(!f.can_parse(&[0xFF, 0xD8, 0xFF, 0xE0]));
    }

    #[test]
    fn round_trips_metadata() {
        let mut exif = ExifData::new();
        exif.set(
            ExifKey::new(0x010F, IfdId::Ifd0),
            Value::Ascii("RustCam".into()),
        );
        exif.set(
            ExifKey::new(0x0131, IfdId::Ifd0),
            Value::Ascii("exifkit".into()),
        );
        let header = TiffHeader::new(ByteOrder::Little);
        let block = exifkit_tiff::encode(None, &header, &exif).unwrap().bytes;

        let f = TiffFormat::default();
        let mut cursor = Cursor::new(&block);
        let parsed = f.read_metadata(&mut cursor).unwrap();
        assert_eq!(
            parsed.get_by_name("Exif.Image.Make").unwrap().value.as_str(),
            Some("RustCam")
        );
        assert_eq!(
            parsed
                .get_by_name("Exif.Image.Software")
                .unwrap()
                .value
                .as_str(),
            Some("exifkit")
        );
    }
}
