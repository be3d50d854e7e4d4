//! Canon CR2 raw format.
//!
//! CR2 is TIFF with a 16-byte header: the classic 8 bytes, a `CR`
//! signature with version 2.0, and a pointer to IFD3 (the raw image
//! IFD) that the engine's offset writer patches after a rewrite.

use crate::tiff::{TiffConfig, TiffFormat};
use crate::{MetadataFormat, ReadSeek, Result};
use exifkit_core::Error as CoreError;
use exifkit_tiff::{ExifData, HeaderFormat};
use std::io::Write;

pub struct Cr2Format {
    inner: TiffFormat,
}

impl Cr2Format {
    pub fn new() -> Self {
        Self {
            inner: TiffFormat::with_config(TiffConfig {
                format_name: "CR2",
                extensions: &["cr2"],
                header_format: HeaderFormat::Cr2,
                writable: true,
            }),
        }
    }

    /// CR2 files cannot carry a free-form image comment.
    pub fn set_comment(&self, _comment: &str) -> Result<()> {
        Err(CoreError::InvalidSettingForImage("Image comment", "CR2").into())
    }
}

impl Default for Cr2Format {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataFormat for Cr2Format {
    fn can_parse(&self, header: &[u8]) -> bool {
        header.len() >= 10 && self.inner.can_parse(header) && &header[8..10] == b"CR"
    }

    fn format_name(&self) -> &'static str {
        "CR2"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cr2"]
    }

    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData> {
        self.inner.read_metadata(reader)
    }

    fn write_metadata(
        &self,
        reader: &mut dyn ReadSeek,
        output: &mut dyn Write,
        exif: &ExifData,
    ) -> Result<()> {
        self.inner.write_metadata(reader, output, exif)
    }
}
