#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the TIFF engine with arbitrary data
    let _ = exifkit_tiff::decode_block(data, exifkit_tiff::HeaderFormat::Standard);
});
