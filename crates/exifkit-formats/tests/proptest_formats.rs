//! Property-based tests: envelope walkers must survive arbitrary input.

use exifkit_formats::{FormatRegistry, JpegFormat, MetadataFormat, WebpFormat};
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    /// Auto-detection plus parsing never panics on arbitrary bytes.
    #[test]
    fn registry_no_panic(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let registry = FormatRegistry::new();
        let _ = registry.read_metadata(&mut Cursor::new(&data));
    }

    /// The JPEG segment walker never panics behind a valid SOI.
    #[test]
    fn jpeg_no_panic(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut data = vec![0xFF, 0xD8, 0xFF];
        data.extend_from_slice(&body);
        let _ = JpegFormat.read_metadata(&mut Cursor::new(&data));
    }

    /// The RIFF chunk walker never panics behind a valid signature.
    #[test]
    fn webp_no_panic(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut data = b"RIFF\x00\x01\x00\x00WEBP".to_vec();
        data.extend_from_slice(&body);
        let _ = WebpFormat.read_metadata(&mut Cursor::new(&data));
    }
}
