//! Pentax PEF raw format: TIFF with a standard header.

use crate::tiff::{TiffConfig, TiffFormat};
use exifkit_tiff::HeaderFormat;

pub struct PefFormat;

impl PefFormat {
    pub fn new() -> TiffFormat {
        TiffFormat::with_config(TiffConfig {
            format_name: "PEF",
            extensions: &["pef"],
            header_format: HeaderFormat::Standard,
            writable: true,
        })
    }
}
