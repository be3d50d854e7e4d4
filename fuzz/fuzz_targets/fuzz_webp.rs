#![no_main]

use exifkit_formats::{MetadataFormat, WebpFormat};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Fuzz the RIFF chunk walker with arbitrary data
    let mut cursor = Cursor::new(data);
    let _ = WebpFormat.read_metadata(&mut cursor);
});
