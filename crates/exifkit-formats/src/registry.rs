//! Format registry with magic-byte auto-detection.
//!
//! Registration order matters: formats with distinctive signatures come
//! first, TIFF-derived raws next, generic TIFF last.

use crate::{
    ArwFormat, Cr2Format, Error, JpegFormat, MetadataFormat, NefFormat, OrfFormat, PefFormat,
    RafFormat, Result, Rw2Format, TiffFormat, WebpFormat,
};
use exifkit_tiff::ExifData;
use std::io::{Read, Seek, SeekFrom};

/// Registry of format front-ends.
pub struct FormatRegistry {
    formats: Vec<Box<dyn MetadataFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a registry with all built-in formats.
    pub fn new() -> Self {
        let mut r = Self { formats: vec![] };
        // Distinct magic bytes first.
        r.register(Box::new(JpegFormat));
        r.register(Box::new(WebpFormat));
        r.register(Box::new(RafFormat));
        // TIFF variants with their own magic.
        r.register(Box::new(OrfFormat::new()));
        r.register(Box::new(Rw2Format::new()));
        r.register(Box::new(Cr2Format::new()));
        // TIFF-based raws share the classic magic; extension lookup
        // tells them apart.
        r.register(Box::new(NefFormat::new()));
        r.register(Box::new(ArwFormat::new()));
        r.register(Box::new(PefFormat::new()));
        // Generic TIFF last.
        r.register(Box::new(TiffFormat::default()));
        r
    }

    pub fn register(&mut self, format: Box<dyn MetadataFormat>) {
        self.formats.push(format);
    }

    /// Detect the format from the file's first bytes (16 recommended).
    pub fn detect(&self, header: &[u8]) -> Option<&dyn MetadataFormat> {
        self.formats
            .iter()
            .find(|f| f.can_parse(header))
            .map(|f| f.as_ref())
    }

    /// Look up a format by name.
    pub fn get(&self, name: &str) -> Option<&dyn MetadataFormat> {
        self.formats
            .iter()
            .find(|f| f.format_name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
    }

    /// Look up a format by file extension.
    pub fn by_extension(&self, ext: &str) -> Option<&dyn MetadataFormat> {
        self.formats
            .iter()
            .find(|f| f.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|f| f.as_ref())
    }

    /// Read metadata with auto-detection.
    pub fn read_metadata<R: Read + Seek>(&self, reader: &mut R) -> Result<ExifData> {
        let mut header = [0u8; 16];
        let n = reader.read(&mut header)?;
        reader.seek(SeekFrom::Start(0))?;
        let format = self.detect(&header[..n]).ok_or(Error::UnsupportedFormat)?;
        format.read_metadata(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_order() {
        let r = FormatRegistry::new();
        assert_eq!(r.detect(&[0xFF, 0xD8, 0xFF, 0xE1]).unwrap().format_name(), "JPEG");
        assert_eq!(
            r.detect(b"RIFF\x00\x00\x00\x00WEBPVP8 ").unwrap().format_name(),
            "WebP"
        );
        assert_eq!(
            r.detect(b"FUJIFILMCCD-RAW ").unwrap().format_name(),
            "RAF"
        );
        // CR2 wins over plain TIFF.
        let mut cr2 = vec![0x49, 0x49, 0x2A, 0x00, 0x10, 0, 0, 0];
        cr2.extend_from_slice(b"CR\x02\x00");
        assert_eq!(r.detect(&cr2).unwrap().format_name(), "CR2");
        // The classic magic is shared by the TIFF-based raws; the
        // first registered one wins and extensions disambiguate.
        assert_eq!(
            r.detect(&[0x49, 0x49, 0x2A, 0x00, 8, 0, 0, 0, 0, 0]).unwrap().format_name(),
            "NEF"
        );
        assert_eq!(r.by_extension("tiff").unwrap().format_name(), "TIFF");
    }

    #[test]
    fn by_extension() {
        let r = FormatRegistry::new();
        assert_eq!(r.by_extension("ORF").unwrap().format_name(), "ORF");
        assert_eq!(r.by_extension("rw2").unwrap().format_name(), "RW2");
        assert!(r.by_extension("xyz").is_none());
    }

    #[test]
    fn unknown_magic_is_unsupported() {
        let r = FormatRegistry::new();
        let mut cursor = std::io::Cursor::new(b"????????".to_vec());
        assert!(matches!(
            r.read_metadata(&mut cursor),
            Err(Error::UnsupportedFormat)
        ));
    }
}
