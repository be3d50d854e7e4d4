//! WebP envelope.
//!
//! Exif metadata lives in an `EXIF` chunk of the RIFF container. The
//! extended-format `VP8X` chunk carries a flag byte announcing which
//! metadata chunks are present; adding an EXIF chunk must set the EXIF
//! bit (creating VP8X from the image chunk's dimensions if absent) and
//! the RIFF size header must be updated to match.
//!
//! Chunk order on write: VP8X, ICCP, ANIM/ANMF, ALPH, VP8/VP8L, EXIF,
//! XMP.

use crate::{Error, MetadataFormat, ReadSeek, Result};
use exifkit_core::{ByteOrder, Error as CoreError};
use exifkit_tiff::{decode_block, encoder, ExifData, HeaderFormat, TiffHeader};
use std::io::Write;

const VP8X_FLAG_EXIF: u8 = 0x08;

const EXIF_ID: &[u8] = b"Exif\0\0";

#[derive(Debug, Clone)]
struct Chunk {
    id: [u8; 4],
    data: Vec<u8>,
}

fn parse_chunks(data: &[u8]) -> Result<Vec<Chunk>> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WEBP" {
        return Err(CoreError::NotAnImage("WebP").into());
    }
    let mut chunks = Vec::new();
    let mut pos = 12;
    while pos + 8 <= data.len() {
        let id = [data[pos], data[pos + 1], data[pos + 2], data[pos + 3]];
        let size =
            u32::from_le_bytes([data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]])
                as usize;
        let padded = size + (size & 1);
        if pos + 8 + size > data.len() {
            return Err(CoreError::corrupted(format!(
                "WebP chunk {} at {pos} overruns file",
                String::from_utf8_lossy(&id)
            ))
            .into());
        }
        chunks.push(Chunk {
            id,
            data: data[pos + 8..pos + 8 + size].to_vec(),
        });
        pos += 8 + padded;
    }
    Ok(chunks)
}

/// Strip the optional `Exif\0\0` prefix some writers put in the chunk.
fn exif_chunk_block(data: &[u8]) -> &[u8] {
    data.strip_prefix(EXIF_ID).unwrap_or(data)
}

/// WebP metadata front-end.
pub struct WebpFormat;

impl WebpFormat {
    /// Canvas size from the image chunks, for a manufactured VP8X.
    fn canvas_size(chunks: &[Chunk]) -> (u32, u32) {
        for c in chunks {
            match &c.id {
                b"VP8X" if c.data.len() >= 10 => {
                    let w = u32::from_le_bytes([c.data[4], c.data[5], c.data[6], 0]) + 1;
                    let h = u32::from_le_bytes([c.data[7], c.data[8], c.data[9], 0]) + 1;
                    return (w, h);
                }
                b"VP8L" if c.data.len() >= 5 && c.data[0] == 0x2F => {
                    let bits = u32::from_le_bytes([c.data[1], c.data[2], c.data[3], c.data[4]]);
                    let w = (bits & 0x3FFF) + 1;
                    let h = ((bits >> 14) & 0x3FFF) + 1;
                    return (w, h);
                }
                b"VP8 " if c.data.len() >= 10 => {
                    let w = u32::from(u16::from_le_bytes([c.data[6], c.data[7]]) & 0x3FFF);
                    let h = u32::from(u16::from_le_bytes([c.data[8], c.data[9]]) & 0x3FFF);
                    return (w.max(1), h.max(1));
                }
                _ => {}
            }
        }
        (1, 1)
    }

    fn chunk_rank(id: &[u8; 4]) -> u8 {
        match id {
            b"VP8X" => 0,
            b"ICCP" => 1,
            b"ANIM" | b"ANMF" => 2,
            b"ALPH" => 3,
            b"VP8 " | b"VP8L" => 4,
            b"EXIF" => 5,
            b"XMP " => 6,
            _ => 7,
        }
    }
}

impl MetadataFormat for WebpFormat {
    fn can_parse(&self, header: &[u8]) -> bool {
        header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP"
    }

    fn format_name(&self) -> &'static str {
        "WebP"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["webp"]
    }

    fn read_metadata(&self, reader: &mut dyn ReadSeek) -> Result<ExifData> {
        let data = crate::utils::read_with_limit(reader)?;
        let chunks = parse_chunks(&data)?;
        match chunks.iter().find(|c| &c.id == b"EXIF") {
            Some(c) => Ok(decode_block(
                exif_chunk_block(&c.data),
                HeaderFormat::Standard,
            )?),
            None => Ok(ExifData::new()),
        }
    }

    fn write_metadata(
        &self,
        reader: &mut dyn ReadSeek,
        output: &mut dyn Write,
        exif: &ExifData,
    ) -> Result<()> {
        let data = crate::utils::read_with_limit(reader)?;
        let mut chunks = parse_chunks(&data)?;

        // Re-encode the EXIF chunk against the old block, if any.
        let old_block: Option<Vec<u8>> = chunks
            .iter()
            .find(|c| &c.id == b"EXIF")
            .map(|c| exif_chunk_block(&c.data).to_vec());
        let old_header = old_block
            .as_deref()
            .and_then(|old| TiffHeader::read(old, HeaderFormat::Standard).ok().map(|h| (old, h)));
        let new_block = match old_header {
            Some((old, header)) => encoder::encode(Some(old), &header, exif)?.bytes,
            None => encoder::encode(None, &TiffHeader::new(ByteOrder::Little), exif)?.bytes,
        };

        let (width, height) = Self::canvas_size(&chunks);
        let has_exif = !new_block.is_empty();

        chunks.retain(|c| &c.id != b"EXIF");
        if has_exif {
            chunks.push(Chunk {
                id: *b"EXIF",
                data: new_block,
            });
        }

        // Update or manufacture the VP8X flag byte.
        let vp8x = chunks.iter_mut().find(|c| &c.id == b"VP8X");
        match vp8x {
            Some(c) if c.data.len() >= 10 => {
                if has_exif {
                    c.data[0] |= VP8X_FLAG_EXIF;
                } else {
                    c.data[0] &= !VP8X_FLAG_EXIF;
                }
            }
            _ if has_exif => {
                let mut vp8x_data = vec![0u8; 10];
                vp8x_data[0] = VP8X_FLAG_EXIF;
                let w = (width - 1).to_le_bytes();
                let h = (height - 1).to_le_bytes();
                vp8x_data[4..7].copy_from_slice(&w[..3]);
                vp8x_data[7..10].copy_from_slice(&h[..3]);
                chunks.push(Chunk {
                    id: *b"VP8X",
                    data: vp8x_data,
                });
            }
            _ => {}
        }

        chunks.sort_by_key(|c| Self::chunk_rank(&c.id));

        // Reassemble with a fresh RIFF size.
        let mut body = Vec::with_capacity(data.len());
        body.extend_from_slice(b"WEBP");
        for c in &chunks {
            body.extend_from_slice(&c.id);
            let size = u32::try_from(c.data.len())
                .map_err(|_| Error::InvalidStructure("WebP chunk too large".into()))?;
            body.extend_from_slice(&size.to_le_bytes());
            body.extend_from_slice(&c.data);
            if c.data.len() & 1 == 1 {
                body.push(0);
            }
        }
        output.write_all(b"RIFF")?;
        output.write_all(&(body.len() as u32).to_le_bytes())?;
        output.write_all(&body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Lossy WebP with a 1x1 VP8 chunk and no metadata.
    fn minimal_webp() -> Vec<u8> {
        let vp8: Vec<u8> = vec![0, 0, 0, 0x9D, 0x01, 0x2A, 0x01, 0x00, 0x01, 0x00];
        let mut body = b"WEBP".to_vec();
        body.extend_from_slice(b"VP8 ");
        body.extend_from_slice(&(vp8.len() as u32).to_le_bytes());
        body.extend_from_slice(&vp8);
        let mut w = b"RIFF".to_vec();
        w.extend_from_slice(&(body.len() as u32).to_le_bytes());
        w.extend_from_slice(&body);
        w
    }

    #[test]
    fn detects_webp() {
        let f = WebpFormat;
        assert!(f.can_parse(&minimal_webp()[..12]));
        assert!(!f.can_parse(b"RIFF\x00\x00\x00\x00WAVE"));
    }

    #[test]
    fn chunk_order_vp8x_first_exif_after_image() {
        assert!(WebpFormat::chunk_rank(b"VP8X") < WebpFormat::chunk_rank(b"VP8 "));
        assert!(WebpFormat::chunk_rank(b"VP8 ") < WebpFormat::chunk_rank(b"EXIF"));
        assert!(WebpFormat::chunk_rank(b"EXIF") < WebpFormat::chunk_rank(b"XMP "));
    }

    #[test]
    fn overrunning_chunk_is_corrupt() {
        let mut bad = minimal_webp();
        let len = bad.len();
        bad[len - 12] = 0xFF; // inflate the VP8 chunk size
        assert!(parse_chunks(&bad).is_err());
    }
}
