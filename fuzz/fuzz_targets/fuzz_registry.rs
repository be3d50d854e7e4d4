#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Fuzz format auto-detection plus parsing
    let registry = exifkit_formats::FormatRegistry::new();
    let mut cursor = Cursor::new(data);
    let _ = registry.read_metadata(&mut cursor);
});
