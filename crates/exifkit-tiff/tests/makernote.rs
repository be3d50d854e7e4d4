//! Makernote integration tests against hand-built on-disk structures.

use exifkit_core::ByteOrder;
use exifkit_tags::IfdId;
use exifkit_tiff::{reader, HeaderFormat, TiffHeader, TiffNode};

/// Little-endian EXIF block with IFD0 (Make + ExifTag) and an Exif IFD
/// holding a MakerNote entry with the given payload.
fn block_with_makernote(make: &[u8], mn: &[u8]) -> Vec<u8> {
    assert_eq!(make.len(), 18, "fixture assumes an 18-byte make string");
    let mut t = Vec::new();
    // Header.
    t.extend_from_slice(b"II");
    t.extend_from_slice(&42u16.to_le_bytes());
    t.extend_from_slice(&8u32.to_le_bytes());
    // IFD0 at 8: 2 entries, value area at 38.
    t.extend_from_slice(&2u16.to_le_bytes());
    // Make, ASCII, count 18, offset 38.
    t.extend_from_slice(&0x010Fu16.to_le_bytes());
    t.extend_from_slice(&2u16.to_le_bytes());
    t.extend_from_slice(&18u32.to_le_bytes());
    t.extend_from_slice(&38u32.to_le_bytes());
    // ExifTag, LONG, count 1, value 56.
    t.extend_from_slice(&0x8769u16.to_le_bytes());
    t.extend_from_slice(&4u16.to_le_bytes());
    t.extend_from_slice(&1u32.to_le_bytes());
    t.extend_from_slice(&56u32.to_le_bytes());
    t.extend_from_slice(&0u32.to_le_bytes()); // next
    t.extend_from_slice(make); // 38..56
    // Exif IFD at 56: 1 entry, value area at 74.
    t.extend_from_slice(&1u16.to_le_bytes());
    t.extend_from_slice(&0x927Cu16.to_le_bytes());
    t.extend_from_slice(&7u16.to_le_bytes());
    t.extend_from_slice(&(mn.len() as u32).to_le_bytes());
    t.extend_from_slice(&74u32.to_le_bytes());
    t.extend_from_slice(&0u32.to_le_bytes()); // next
    assert_eq!(t.len(), 74);
    t.extend_from_slice(mn);
    t
}

/// Nikon format-3 makernote: signature, embedded big-endian TIFF
/// header, then a one-entry IFD with Version = "0100".
fn nikon3_makernote() -> Vec<u8> {
    let mut mn = Vec::new();
    mn.extend_from_slice(b"Nikon\0\x02\x10\x00\x00");
    mn.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
    // Big-endian IFD at +8 from the embedded header.
    mn.extend_from_slice(&1u16.to_be_bytes());
    mn.extend_from_slice(&0x0001u16.to_be_bytes());
    mn.extend_from_slice(&7u16.to_be_bytes()); // UNDEFINED
    mn.extend_from_slice(&4u32.to_be_bytes());
    mn.extend_from_slice(b"0100"); // inline value
    mn.extend_from_slice(&0u32.to_be_bytes()); // next
    mn
}

#[test]
fn nikon3_makernote_end_to_end() {
    let block = block_with_makernote(b"NIKON CORPORATION\0", &nikon3_makernote());
    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let mn_node = parsed
        .root
        .find(0x927C, IfdId::ExifIfd)
        .expect("MakerNote entry");
    let TiffNode::MnEntry(mn) = mn_node else {
        panic!("expected MnEntry")
    };
    let m = mn.mn.as_deref().expect("makernote identified");
    assert_eq!(m.mn_group, IfdId::Nikon3);
    // The makernote declares its own byte order; the enclosing image
    // stays little-endian.
    assert_eq!(m.byte_order(), Some(ByteOrder::Big));
    assert_eq!(parsed.byte_order, ByteOrder::Little);
    // Base offset is the makernote position plus ten.
    assert_eq!(m.mn_offset, 74);
    assert_eq!(m.base_offset(), 84);

    let version = parsed
        .root
        .find(0x0001, IfdId::Nikon3)
        .expect("nested version entry");
    assert_eq!(version.entry_data().unwrap().data, b"0100");
}

#[test]
fn makernote_byte_order_does_not_leak() {
    let block = block_with_makernote(b"NIKON CORPORATION\0", &nikon3_makernote());
    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();

    // The outer Make entry parsed with the outer little-endian order.
    let make = parsed.root.find(0x010F, IfdId::Ifd0).unwrap();
    assert_eq!(
        make.entry_data().unwrap().value.as_ref().unwrap().as_str(),
        Some("NIKON CORPORATION")
    );
}

#[test]
fn unrecognized_makernote_stays_opaque() {
    // A make with no registry row keeps the MakerNote as raw bytes.
    let mn = vec![0xAA; 40];
    let block = block_with_makernote(b"Mystery Camera Co\0", &mn);
    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();

    let mn_node = parsed.root.find(0x927C, IfdId::ExifIfd).unwrap();
    let TiffNode::MnEntry(entry) = mn_node else {
        panic!("expected MnEntry")
    };
    assert!(entry.mn.is_none());
    assert_eq!(entry.entry.data, mn);
}

#[test]
fn olympus2_makernote_relative_offsets() {
    // Olympus v2 resolves nested offsets against the makernote start:
    // a value offset of 30 means "30 bytes into the makernote".
    let mut mn = Vec::new();
    mn.extend_from_slice(b"OLYMPUS\0II\x03\x00");
    // IFD at +12, little-endian (outer order).
    mn.extend_from_slice(&1u16.to_le_bytes());
    mn.extend_from_slice(&0x0207u16.to_le_bytes()); // CameraType
    mn.extend_from_slice(&2u16.to_le_bytes());
    mn.extend_from_slice(&6u32.to_le_bytes());
    mn.extend_from_slice(&30u32.to_le_bytes()); // relative to mn start
    mn.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(mn.len(), 30);
    mn.extend_from_slice(b"E-M10\0");

    let block = block_with_makernote(b"OLYMPUS CORP.    \0", &mn);
    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let cam = parsed
        .root
        .find(0x0207, IfdId::Olympus2)
        .expect("camera type entry");
    assert_eq!(
        cam.entry_data().unwrap().value.as_ref().unwrap().as_str(),
        Some("E-M10")
    );
}
