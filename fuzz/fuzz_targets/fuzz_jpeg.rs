#![no_main]

use exifkit_formats::{JpegFormat, MetadataFormat};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Fuzz the JPEG segment walker with arbitrary data
    let mut cursor = Cursor::new(data);
    let _ = JpegFormat.read_metadata(&mut cursor);
});
