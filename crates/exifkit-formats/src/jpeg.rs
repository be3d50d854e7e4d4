//! JPEG envelope.
//!
//! Exif metadata lives in an APP1 segment whose payload starts with
//! `"Exif\0\0"` followed by a complete TIFF block. Reading extracts
//! that block and hands it to the engine; writing re-emits the segment
//! stream with the APP1 payload replaced in place (or inserted after
//! SOI when the source had none), leaving every other segment
//! byte-identical. Everything from SOS onwards is copied verbatim.

use crate::{Error, MetadataFormat, ReadSeek, Result};
use exifkit_core::Error as CoreError;
use exifkit_tiff::{decode_block, encoder, ExifData, HeaderFormat, TiffHeader};
use exifkit_core::ByteOrder;
use std::io::Write;
use tracing::debug;

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const COM: u8 = 0xFE;
const SOS: u8 = 0xDA;

const EXIF_ID: &[u8] = b"Exif\0\0";

/// One JPEG marker segment (length bytes not included in `data`).
#[derive(Debug, Clone)]
struct Segment {
    marker: u8,
    data: Vec<u8>,
}

/// Parsed segment stream: everything before SOS, then the raw tail
/// (SOS, entropy-coded data, EOI).
struct SegmentStream {
    segments: Vec<Segment>,
    trailer: Vec<u8>,
}

fn parse_segments(data: &[u8]) -> Result<SegmentStream> {
    if data.len() < 2 || data[..2] != SOI {
        return Err(CoreError::NotAnImage("JPEG").into());
    }
    let mut segments = Vec::new();
    let mut pos = 2;
    loop {
        // Skip fill bytes before the marker.
        while pos < data.len() && data[pos] == 0xFF && data.get(pos + 1) == Some(&0xFF) {
            pos += 1;
        }
        if pos + 2 > data.len() {
            return Err(CoreError::corrupted("unterminated JPEG segment stream").into());
        }
        if data[pos] != 0xFF {
            return Err(CoreError::corrupted(format!(
                "expected JPEG marker at {pos}, found 0x{:02x}",
                data[pos]
            ))
            .into());
        }
        let marker = data[pos + 1];
        match marker {
            SOS => {
                return Ok(SegmentStream {
                    segments,
                    trailer: data[pos..].to_vec(),
                });
            }
            // Standalone markers carry no length field.
            0xD8 | 0xD9 | 0x01 | 0xD0..=0xD7 => {
                segments.push(Segment {
                    marker,
                    data: Vec::new(),
                });
                pos += 2;
            }
            _ => {
                let len = data
                    .get(pos + 2..pos + 4)
                    .map(|b| usize::from(u16::from_be_bytes([b[0], b[1]])))
                    .ok_or_else(|| CoreError::corrupted("short JPEG segment length"))?;
                if len < 2 || pos + 2 + len > data.len() {
                    return Err(
                        CoreError::corrupted(format!("JPEG segment at {pos} overruns file")).into(),
                    );
                }
                segments.push(Segment {
                    marker,
                    data: data[pos + 4..pos + 2 + len].to_vec(),
                });
                pos += 2 + len;
            }
        }
    }
}

fn write_segment(out: &mut Vec<u8>, marker: u8, data: &[u8]) -> Result<()> {
    out.push(0xFF);
    out.push(marker);
    let len = data.len() + 2;
    if len > 0xFFFF {
        return Err(CoreError::TooLargeJpegSegment("Exif").into());
    }
    out.extend_from_slice(&(len as u16).to_be_bytes());
    out.extend_from_slice(data);
    Ok(())
}

/// JPEG metadata front-end.
pub struct JpegFormat;

impl JpegFormat {
    /// Extract the raw TIFF block from the APP1 Exif segment.
    fn exif_block(stream: &SegmentStream) -> Option<&[u8]> {
        stream
            .segments
            .iter()
            .find(|s| s.marker == APP1 && s.data.starts_with(EXIF_ID))
            .map(|s| &s.data[EXIF_ID.len()..])
    }

    /// Rewrite `input` with updated metadata and, optionally, a new
    /// image comment (COM segment).
    pub fn write_with_comment(
        &self,
        reader: &mut dyn ReadSeek,
        output: &mut dyn Write,
        exif: &ExifData,
        comment: Option<&str>,
    ) -> Result<()> {
        let data = crate::utils::read_with_limit(reader)?;
        let stream = parse_segments(&data)?;

        // Encode against the old block when it parses; a fresh
        // little-endian block otherwise.
        let old_header = Self::exif_block(&stream)
            .and_then(|old| TiffHeader::read(old, HeaderFormat::Standard).ok().map(|h| (old, h)));
        let new_block = match old_header {
            Some((old, header)) => encoder::encode(Some(old), &header, exif)?.bytes,
            None => encoder::encode(None, &TiffHeader::new(ByteOrder::Little), exif)?.bytes,
        };
        let mut payload = Vec::new();
        if !new_block.is_empty() {
            if new_block.len() + EXIF_ID.len() + 2 > 0xFFFF {
                return Err(CoreError::TooLargeJpegSegment("Exif").into());
            }
            payload.extend_from_slice(EXIF_ID);
            payload.extend_from_slice(&new_block);
        }

        let had_exif = Self::exif_block(&stream).is_some();
        // Without an original Exif segment the new one goes right after
        // SOI, or after a leading JFIF APP0 if there is one.
        let insert_index = if had_exif {
            None
        } else {
            Some(usize::from(
                stream.segments.first().is_some_and(|s| s.marker == APP0),
            ))
        };

        let mut out = Vec::with_capacity(data.len() + payload.len());
        out.extend_from_slice(&SOI);
        let mut wrote_exif = false;
        let mut wrote_comment = false;
        for (i, seg) in stream.segments.iter().enumerate() {
            if insert_index == Some(i) && !payload.is_empty() {
                write_segment(&mut out, APP1, &payload)?;
                wrote_exif = true;
            }
            match seg.marker {
                APP1 if seg.data.starts_with(EXIF_ID) => {
                    // Replace the Exif segment in place; duplicates are
                    // dropped.
                    if wrote_exif {
                        debug!("dropping duplicate Exif segment");
                    } else if !payload.is_empty() {
                        write_segment(&mut out, APP1, &payload)?;
                    }
                    wrote_exif = true;
                }
                COM => match comment {
                    Some(c) => {
                        if !wrote_comment {
                            if c.len() + 2 > 0xFFFF {
                                return Err(CoreError::TooLargeJpegSegment("Comment").into());
                            }
                            write_segment(&mut out, COM, c.as_bytes())?;
                            wrote_comment = true;
                        }
                    }
                    None => write_segment(&mut out, COM, &seg.data)?,
                },
                _ => write_segment(&mut out, seg.marker, &seg.data)?,
            }
        }
        if insert_index == Some(stream.segments.len()) && !payload.is_empty() && !wrote_exif {
            write_segment(&mut out, APP1, &payload)?;
        }
        if let Some(c) = comment {
            if !wrote_comment {
                if c.len() + 2 > 0xFFFF {
                    return Err(CoreError::TooLargeJpegSegment("Comment").into());
                }
                write_segment(&mut out, COM, c.as_bytes())?;
            }
        }
        out.extend_from_slice(&stream.trailer);
        output.write_all(&out)?;
        Ok(())
    }
}

impl MetadataFormat for JpegFormat {
    fn can_parse(&self, header: &[u8]) -> bool {
        header.len() >= 3 && header[0] == 0xFF && header[1] == 0xD8 && header[2] == 0xFF
    }

    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg", "jpe"]
    }

    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData> {
        let data = crate::utils::read_with_limit(reader)?;
        let stream = parse_segments(&data)?;
        match Self::exif_block(&stream) {
            Some(block) => Ok(decode_block(block, HeaderFormat::Standard)?),
            None => Ok(ExifData::new()),
        }
    }

    fn write_metadata(
        &self,
        reader: &mut dyn ReadSeek,
        output: &mut dyn Write,
        exif: &ExifData,
    ) -> Result<()> {
        self.write_with_comment(reader, output, exif, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn minimal_jpeg_with_exif(block: &[u8]) -> Vec<u8> {
        let mut j = Vec::new();
        j.extend_from_slice(&SOI);
        // APP1 Exif segment.
        j.push(0xFF);
        j.push(APP1);
        let len = (block.len() + EXIF_ID.len() + 2) as u16;
        j.extend_from_slice(&len.to_be_bytes());
        j.extend_from_slice(EXIF_ID);
        j.extend_from_slice(block);
        // SOS + fake scan data + EOI.
        j.extend_from_slice(&[0xFF, SOS, 0x00, 0x04, 0x01, 0x00, 0x7F, 0xFF, 0xD9]);
        j
    }

    #[test]
    fn rejects_non_jpeg() {
        let f = JpegFormat;
        assert!(!f.can_parse(b"II*\0"));
        let mut cursor = std::io::Cursor::new(b"not a jpeg".to_vec());
        assert!(f.read_metadata(&mut cursor).is_err());
    }

    #[test]
    fn jpeg_without_exif_reads_empty() {
        let f = JpegFormat;
        let j = vec![0xFF, 0xD8, 0xFF, SOS, 0x00, 0x04, 0x01, 0x00, 0x7F, 0xFF, 0xD9];
        let exif = f.read_metadata(&mut std::io::Cursor::new(j)).unwrap();
        assert!(exif.is_empty());
    }

    #[test]
    fn segment_overrun_is_corrupt() {
        let j = vec![0xFF, 0xD8, 0xFF, 0xE1, 0xFF, 0xFF, 0x00];
        assert!(matches!(
            parse_segments(&j),
            Err(Error::Core(CoreError::CorruptedMetadata(_)))
        ));
    }
}
