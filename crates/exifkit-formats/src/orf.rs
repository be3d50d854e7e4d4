//! Olympus ORF raw format.
//!
//! ORF is TIFF with the magic replaced by `OR` (or `SR` on the
//! SP-560UZ); writing restores the magic that was read.

use crate::tiff::{TiffConfig, TiffFormat};
use exifkit_tiff::HeaderFormat;

pub struct OrfFormat;

impl OrfFormat {
    pub fn new() -> TiffFormat {
        TiffFormat::with_config(TiffConfig {
            format_name: "ORF",
            extensions: &["orf"],
            header_format: HeaderFormat::Orf,
            writable: true,
        })
    }
}
