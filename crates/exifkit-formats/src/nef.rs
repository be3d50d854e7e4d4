//! Nikon NEF/NRW raw format: TIFF with a standard header; the full
//! resolution image hangs off a SubIFDs array in IFD0.

use crate::tiff::{TiffConfig, TiffFormat};
use exifkit_tiff::HeaderFormat;

pub struct NefFormat;

impl NefFormat {
    pub fn new() -> TiffFormat {
        TiffFormat::with_config(TiffConfig {
            format_name: "NEF",
            extensions: &["nef", "nrw"],
            header_format: HeaderFormat::Standard,
            writable: true,
        })
    }
}
