//! JPEG envelope round trips: APP1 replacement, byte stability outside
//! the segment, and the 64 KiB segment limit.

use exifkit_core::{ByteOrder, Error as CoreError, Value};
use exifkit_formats::{Error, JpegFormat, MetadataFormat};
use exifkit_tiff::{encode, ExifData, TiffHeader};
use std::io::Cursor;

const EXIF_ID: &[u8] = b"Exif\0\0";

fn exif_block(pairs: &[(&str, Value)]) -> Vec<u8> {
    let mut exif = ExifData::new();
    for (k, v) in pairs {
        exif.set_by_name(k, v.clone()).unwrap();
    }
    let header = TiffHeader::new(ByteOrder::Little);
    encode(None, &header, &exif).unwrap().bytes
}

/// Minimal JPEG: SOI, APP1 Exif, DQT stand-in, SOS + scan + EOI.
fn jpeg_with_block(block: &[u8]) -> Vec<u8> {
    let mut j = vec![0xFF, 0xD8];
    j.push(0xFF);
    j.push(0xE1);
    let len = (block.len() + EXIF_ID.len() + 2) as u16;
    j.extend_from_slice(&len.to_be_bytes());
    j.extend_from_slice(EXIF_ID);
    j.extend_from_slice(block);
    // An unrelated segment that must survive byte-identically.
    j.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x06, 0x11, 0x22, 0x33, 0x44]);
    // SOS and entropy-coded data.
    j.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x04, 0x01, 0x00, 0x7F, 0xFF, 0xD9]);
    j
}

/// Locate the APP1 segment payload range within a JPEG.
fn app1_range(j: &[u8]) -> std::ops::Range<usize> {
    let mut pos = 2;
    while pos + 4 <= j.len() {
        let marker = j[pos + 1];
        let len = usize::from(u16::from_be_bytes([j[pos + 2], j[pos + 3]]));
        if marker == 0xE1 {
            return pos..pos + 2 + len;
        }
        pos += 2 + len;
    }
    panic!("no APP1 segment");
}

#[test]
fn trivial_key_round_trip() {
    // A JPEG whose APP1 holds Make = "Canon"; setting Artist = "Grace"
    // grows the segment by one 12-byte entry plus the 6 value bytes and
    // leaves every byte outside the APP1 payload identical.
    let source = jpeg_with_block(&exif_block(&[(
        "Exif.Image.Make",
        Value::Ascii("Canon".into()),
    )]));

    let jpeg = JpegFormat;
    let mut exif = jpeg.read_metadata(&mut Cursor::new(&source)).unwrap();
    exif.set_by_name("Exif.Image.Artist", Value::Ascii("Grace".into()))
        .unwrap();

    let mut out = Vec::new();
    jpeg.write_metadata(&mut Cursor::new(&source), &mut out, &exif)
        .unwrap();

    let src_app1 = app1_range(&source);
    let out_app1 = app1_range(&out);
    let growth = out_app1.len() - src_app1.len();
    assert!(growth <= 20, "APP1 grew by {growth} bytes");

    // Bytes outside the APP1 payload are untouched.
    assert_eq!(source[..src_app1.start], out[..out_app1.start]);
    assert_eq!(source[src_app1.end..], out[out_app1.end..]);

    // The Artist entry landed in IFD0 with type ASCII, count 6 and a
    // terminated value.
    let block = &out[out_app1.start + 4 + EXIF_ID.len()..out_app1.end];
    let parsed = exifkit_tiff::reader::read(
        block,
        &TiffHeader::read(block, exifkit_tiff::HeaderFormat::Standard).unwrap(),
        exifkit_tags::IfdId::Ifd0,
    )
    .unwrap();
    let artist = parsed
        .root
        .find(0x013B, exifkit_tags::IfdId::Ifd0)
        .expect("artist entry")
        .entry_data()
        .unwrap();
    assert_eq!(artist.type_id, exifkit_core::TypeId::AsciiString);
    assert_eq!(artist.count(), 6);
    assert_eq!(artist.data, b"Grace\0");
    // The original key survived.
    assert!(parsed.root.find(0x010F, exifkit_tags::IfdId::Ifd0).is_some());
}

#[test]
fn insert_exif_into_jpeg_without_app1() {
    let source = vec![
        0xFF, 0xD8, // SOI
        0xFF, 0xDB, 0x00, 0x06, 0x11, 0x22, 0x33, 0x44, // DQT stand-in
        0xFF, 0xDA, 0x00, 0x04, 0x01, 0x00, 0x7F, 0xFF, 0xD9,
    ];
    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Software", Value::Ascii("exifkit".into()))
        .unwrap();

    let jpeg = JpegFormat;
    let mut out = Vec::new();
    jpeg.write_metadata(&mut Cursor::new(&source), &mut out, &exif)
        .unwrap();

    // New APP1 right after SOI.
    assert_eq!(&out[..2], &[0xFF, 0xD8]);
    assert_eq!(out[2], 0xFF);
    assert_eq!(out[3], 0xE1);
    let back = jpeg.read_metadata(&mut Cursor::new(&out)).unwrap();
    assert_eq!(
        back.get_by_name("Exif.Image.Software").unwrap().value.as_str(),
        Some("exifkit")
    );
}

#[test]
fn oversized_exif_is_rejected() {
    let source = jpeg_with_block(&exif_block(&[(
        "Exif.Image.Make",
        Value::Ascii("Canon".into()),
    )]));
    let mut exif = ExifData::new();
    // 70 KB of comment does not fit a 64 KiB segment.
    exif.set_by_name(
        "Exif.Photo.UserComment",
        Value::Undefined(vec![0x41; 70 * 1024]),
    )
    .unwrap();

    let jpeg = JpegFormat;
    let mut out = Vec::new();
    let err = jpeg
        .write_metadata(&mut Cursor::new(&source), &mut out, &exif)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Core(CoreError::TooLargeJpegSegment("Exif"))
    ));
}

#[test]
fn comment_segment_is_written() {
    let source = jpeg_with_block(&exif_block(&[(
        "Exif.Image.Make",
        Value::Ascii("Canon".into()),
    )]));
    let jpeg = JpegFormat;
    let exif = jpeg.read_metadata(&mut Cursor::new(&source)).unwrap();

    let mut out = Vec::new();
    jpeg.write_with_comment(
        &mut Cursor::new(&source),
        &mut out,
        &exif,
        Some("shot on a rainy day"),
    )
    .unwrap();

    // A COM segment with the comment text appears in the output.
    let needle = b"shot on a rainy day";
    assert!(out.windows(needle.len()).any(|w| w == needle));
}
