//! Serialization driver.
//!
//! [`WriteCtx`] wraps the output buffer: it writes the TIFF header
//! lazily before the first tree byte (so that an empty tree produces no
//! output at all) and forwards offset-writer targets discovered during
//! the tree walk. [`write_tree`] runs the whole pass: header, composite
//! tree, then the header-resident offset fixups.

use crate::header::{HeaderFormat, OffsetId, OffsetWriter, TiffHeader};
use crate::node::{TiffNode, NPOS};
use exifkit_core::Result;

/// Output sink for the tree serializer.
pub struct WriteCtx<'a> {
    buf: &'a mut Vec<u8>,
    /// Header bytes written before the first payload byte.
    pending_header: Option<Vec<u8>>,
    offset_writer: Option<&'a mut OffsetWriter>,
}

impl<'a> WriteCtx<'a> {
    pub fn new(
        buf: &'a mut Vec<u8>,
        header: Option<Vec<u8>>,
        offset_writer: Option<&'a mut OffsetWriter>,
    ) -> Self {
        Self {
            buf,
            pending_header: header,
            offset_writer,
        }
    }

    fn flush_header(&mut self) {
        if let Some(h) = self.pending_header.take() {
            self.buf.extend_from_slice(&h);
        }
    }

    /// Append bytes, returning how many were written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        self.flush_header();
        self.buf.extend_from_slice(data);
        data.len()
    }

    /// Append a single byte.
    pub fn putb(&mut self, b: u8) {
        self.flush_header();
        self.buf.push(b);
    }

    /// Record the resolved target of a header-resident offset.
    pub fn set_target(&mut self, id: OffsetId, target: usize) {
        if let Some(ow) = self.offset_writer.as_deref_mut() {
            ow.set_target(id, target as u32);
        }
    }
}

/// Serialize `root` behind `header` and patch header-resident offsets.
///
/// Returns an empty buffer when the tree has no content; callers treat
/// that as "no metadata block".
pub fn write_tree(root: &mut TiffNode, header: &TiffHeader) -> Result<Vec<u8>> {
    let mut offset_writer = OffsetWriter::new();
    if header.format == HeaderFormat::Cr2 {
        offset_writer.set_origin(
            OffsetId::Cr2RawIfd,
            TiffHeader::cr2_offset2addr(),
            header.byte_order,
        );
    }
    let mut buf = Vec::new();
    {
        let mut ctx = WriteCtx::new(&mut buf, Some(header.write()), Some(&mut offset_writer));
        let mut image_idx = NPOS;
        root.write(
            &mut ctx,
            header.byte_order,
            header.offset as usize,
            NPOS,
            NPOS,
            &mut image_idx,
        )?;
    }
    if !buf.is_empty() {
        offset_writer.write_offsets(&mut buf)?;
    }
    Ok(buf)
}
