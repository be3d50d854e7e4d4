//! Sony ARW raw format: TIFF with a standard header.

use crate::tiff::{TiffConfig, TiffFormat};
use exifkit_tiff::HeaderFormat;

pub struct ArwFormat;

impl ArwFormat {
    pub fn new() -> TiffFormat {
        TiffFormat::with_config(TiffConfig {
            format_name: "ARW",
            extensions: &["arw", "sr2"],
            header_format: HeaderFormat::Standard,
            writable: true,
        })
    }
}
