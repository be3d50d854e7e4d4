//! Panasonic RW2 raw format.
//!
//! RW2 uses magic 0x0055, a 24-byte header with the first IFD at 0x18,
//! and a vendor tag namespace in its root IFD (the PanaRaw group).
//! Writing RW2 is not supported.

use crate::tiff::{TiffConfig, TiffFormat};
use exifkit_tiff::HeaderFormat;

pub struct Rw2Format;

impl Rw2Format {
    pub fn new() -> TiffFormat {
        TiffFormat::with_config(TiffConfig {
            format_name: "RW2",
            extensions: &["rw2", "rwl"],
            header_format: HeaderFormat::Rw2,
            writable: false,
        })
    }
}
