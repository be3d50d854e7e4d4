//! Format front-end traits.
//!
//! Every container implements [`MetadataFormat`]: magic-byte detection,
//! metadata extraction and, where supported, metadata writing. Formats
//! without a write path inherit the default, which reports
//! `WritingImageFormatUnsupported`.

use crate::Result;
use exifkit_core::Error as CoreError;
use exifkit_tiff::ExifData;
use std::io::{Read, Seek, Write};

/// Combined trait for Read + Seek, needed for trait objects.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A container format the library can extract metadata from.
pub trait MetadataFormat: Send + Sync {
    /// Check if this format matches the file's magic bytes.
    fn can_parse(&self, header: &[u8]) -> bool;

    /// Format name, e.g. "JPEG" or "CR2".
    fn format_name(&self) -> &'static str;

    /// File extensions this format uses.
    fn extensions(&self) -> &'static [&'static str];

    /// Extract the Exif metadata from the file.
    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData>;

    /// Rewrite the file with updated metadata.
    fn write_metadata(
        &self,
        _reader: &mut dyn ReadSeek,
        _output: &mut dyn Write,
        _exif: &ExifData,
    ) -> Result<()> {
        Err(CoreError::WritingImageFormatUnsupported(self.format_name()).into())
    }
}
