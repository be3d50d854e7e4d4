//! The TIFF metadata engine.
//!
//! Reading builds a composite tree from the on-disk IFD structure and
//! decodes it into user-level [`ExifData`]; writing merges edits back
//! into the tree and serializes it, in place when the edits fit their
//! original slots:
//!
//! ```text
//! bytes -> TiffHeader -> reader -> TiffNode tree -> decoder -> ExifData
//! ExifData -> encoder (add_path / in-place patch) -> writer -> bytes
//! ```
//!
//! Every raw-image backend and the JPEG/WebP envelope front-ends funnel
//! their EXIF payload through this crate.
//!
//! # Example
//!
//! ```
//! use exifkit_core::{ByteOrder, Value};
//! use exifkit_tiff::{encode, decode_block, ExifData, HeaderFormat, TiffHeader};
//!
//! let mut exif = ExifData::new();
//! exif.set_by_name("Exif.Image.Make", Value::Ascii("ExampleCam".into())).unwrap();
//!
//! let header = TiffHeader::new(ByteOrder::Little);
//! let block = encode(None, &header, &exif).unwrap().bytes;
//!
//! let back = decode_block(&block, HeaderFormat::Standard).unwrap();
//! assert_eq!(back.get_by_name("Exif.Image.Make").unwrap().value.as_str(), Some("ExampleCam"));
//! ```

pub mod array;
pub mod creator;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod makernote;
pub mod metadata;
pub mod node;
pub mod path;
pub mod reader;
pub mod visitor;
pub mod writer;

pub use encoder::{encode, EncodeResult, WriteMethod};
pub use header::{HeaderFormat, OffsetId, OffsetWriter, TiffHeader};
pub use metadata::{ExifData, ExifDatum, ExifKey};
pub use node::TiffNode;
pub use reader::{read, ReadResult};

use exifkit_core::Result;

/// Parse a TIFF block and decode it straight to user-level metadata.
pub fn decode_block(data: &[u8], format: HeaderFormat) -> Result<ExifData> {
    let header = TiffHeader::read(data, format)?;
    let (root_group, _) = encoder::root_for(format);
    let parsed = reader::read(data, &header, root_group)?;
    decoder::decode(&parsed.root, parsed.byte_order)
}

/// Encode metadata against an existing TIFF block, returning the new
/// block.
pub fn encode_block(source: &[u8], format: HeaderFormat, exif: &ExifData) -> Result<Vec<u8>> {
    let header = TiffHeader::read(source, format)?;
    Ok(encode(Some(source), &header, exif)?.bytes)
}
