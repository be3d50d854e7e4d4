//! Round-trip integration tests for the TIFF engine.
//!
//! Covers the read-write round-trip and edit-idempotence properties and
//! the IFD0 -> IFD1 thumbnail chain.

use exifkit_core::{ByteOrder, Comment, URational, Value};
use exifkit_tags::IfdId;
use exifkit_tiff::{
    decoder, encode, encoder, reader, ExifData, ExifKey, HeaderFormat, TiffHeader, TiffNode,
};

fn sample_exif() -> ExifData {
    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Make", Value::Ascii("ExampleCam".into()))
        .unwrap();
    exif.set_by_name("Exif.Image.Model", Value::Ascii("Model 7".into()))
        .unwrap();
    exif.set_by_name("Exif.Image.Orientation", Value::UShort(vec![6]))
        .unwrap();
    exif.set_by_name(
        "Exif.Image.XResolution",
        Value::URational(vec![URational::new(300, 1)]),
    )
    .unwrap();
    exif.set_by_name("Exif.Photo.ISOSpeedRatings", Value::UShort(vec![400]))
        .unwrap();
    exif.set_by_name(
        "Exif.Photo.ExposureTime",
        Value::URational(vec![URational::new(1, 250)]),
    )
    .unwrap();
    exif.set_by_name(
        "Exif.Photo.UserComment",
        Value::Comment(Comment::ascii("hello world")),
    )
    .unwrap();
    exif.set_by_name("Exif.GPSInfo.GPSLatitudeRef", Value::Ascii("N".into()))
        .unwrap();
    exif
}

#[test]
fn write_then_read_preserves_all_values() {
    let exif = sample_exif();
    let header = TiffHeader::new(ByteOrder::Little);
    let block = encode(None, &header, &exif).unwrap().bytes;

    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    let decoded = decoder::decode(&parsed.root, parsed.byte_order).unwrap();

    for datum in &exif {
        let back = decoded
            .get(datum.key)
            .unwrap_or_else(|| panic!("{} lost in round trip", datum.key));
        assert_eq!(back.value, datum.value, "{} changed", datum.key);
    }
}

#[test]
fn rewrite_of_parse_is_stable() {
    // write(read(bytes)) must re-parse to an equal tree modulo layout.
    let header = TiffHeader::new(ByteOrder::Little);
    let first = encode(None, &header, &sample_exif()).unwrap().bytes;

    let exif1 = exifkit_tiff::decode_block(&first, HeaderFormat::Standard).unwrap();
    let second = exifkit_tiff::encode_block(&first, HeaderFormat::Standard, &exif1).unwrap();
    let exif2 = exifkit_tiff::decode_block(&second, HeaderFormat::Standard).unwrap();

    assert_eq!(exif1.len(), exif2.len());
    for datum in &exif1 {
        assert_eq!(exif2.get(datum.key).unwrap().value, datum.value);
    }
}

#[test]
fn edit_idempotence() {
    // decode(encode(e', source)) == e' restricted to the edited keys.
    let header = TiffHeader::new(ByteOrder::Little);
    let source = encode(None, &header, &sample_exif()).unwrap().bytes;

    let mut edited = exifkit_tiff::decode_block(&source, HeaderFormat::Standard).unwrap();
    edited
        .set_by_name("Exif.Image.Model", Value::Ascii("Model 8 Mark II".into()))
        .unwrap();
    edited
        .set_by_name("Exif.Photo.ISOSpeedRatings", Value::UShort(vec![1600]))
        .unwrap();
    edited
        .set_by_name("Exif.Image.Artist", Value::Ascii("Grace".into()))
        .unwrap();

    let out = exifkit_tiff::encode_block(&source, HeaderFormat::Standard, &edited).unwrap();
    let decoded = exifkit_tiff::decode_block(&out, HeaderFormat::Standard).unwrap();

    for key in [
        "Exif.Image.Model",
        "Exif.Photo.ISOSpeedRatings",
        "Exif.Image.Artist",
    ] {
        assert_eq!(
            decoded.get_by_name(key).unwrap().value,
            edited.get_by_name(key).unwrap().value,
            "{key} not idempotent"
        );
    }
}

#[test]
fn ifd_chain_with_thumbnail() {
    // IFD0 (1 entry) -> IFD1 with a thumbnail pointer/length pair and
    // an attached data area equal to the thumbnail bytes.
    let thumb: Vec<u8> = vec![0xFF, 0xD8, 0xFF, 0xD9];
    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Make", Value::Ascii("ExampleCam".into()))
        .unwrap();
    exif.set_by_name(
        "Exif.Thumbnail.JPEGInterchangeFormat",
        Value::ULong(vec![0]),
    )
    .unwrap()
    .data_area = Some(thumb.clone());
    exif.set_by_name(
        "Exif.Thumbnail.JPEGInterchangeFormatLength",
        Value::ULong(vec![thumb.len() as u32]),
    )
    .unwrap();

    let header = TiffHeader::new(ByteOrder::Little);
    let block = encode(None, &header, &exif).unwrap().bytes;

    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let TiffNode::Directory(ifd0) = &parsed.root else {
        panic!("root is a directory")
    };
    assert_eq!(ifd0.components.len(), 1);
    let next = ifd0.next.as_deref().expect("IFD0 chains to IFD1");
    let TiffNode::Directory(ifd1) = next else {
        panic!("next is a directory")
    };
    assert_eq!(ifd1.group, IfdId::Ifd1);

    let ptr = ifd1
        .child(0x0201, IfdId::Ifd1)
        .expect("thumbnail pointer present");
    let TiffNode::DataEntry(de) = ptr else {
        panic!("0x0201 is a data entry")
    };
    assert_eq!(de.data_area, thumb);
    let len = ifd1
        .child(0x0202, IfdId::Ifd1)
        .and_then(TiffNode::entry_data)
        .and_then(|e| e.value.as_ref())
        .and_then(Value::as_u32);
    assert_eq!(len, Some(thumb.len() as u32));

    // The decoder surfaces the thumbnail bytes on the pointer datum.
    let decoded = decoder::decode(&parsed.root, parsed.byte_order).unwrap();
    let datum = decoded
        .get(ExifKey::new(0x0201, IfdId::Ifd1))
        .expect("thumbnail datum");
    assert_eq!(datum.data_area.as_deref(), Some(thumb.as_slice()));
}

#[test]
fn deleting_thumbnail_drops_partner_entry() {
    let thumb = vec![0xFF, 0xD8, 0xFF, 0xD9];
    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Make", Value::Ascii("ExampleCam".into()))
        .unwrap();
    exif.set_by_name(
        "Exif.Thumbnail.JPEGInterchangeFormat",
        Value::ULong(vec![0]),
    )
    .unwrap()
    .data_area = Some(thumb);
    exif.set_by_name(
        "Exif.Thumbnail.JPEGInterchangeFormatLength",
        Value::ULong(vec![4]),
    )
    .unwrap();
    let header = TiffHeader::new(ByteOrder::Little);
    let source = encode(None, &header, &exif).unwrap().bytes;

    exif.remove(ExifKey::new(0x0201, IfdId::Ifd1)).unwrap();
    exif.remove(ExifKey::new(0x0202, IfdId::Ifd1)).unwrap();
    let result = encode(Some(&source), &header, &exif).unwrap();
    assert_eq!(result.method, encoder::WriteMethod::Intrusive);

    let parsed = reader::read(&result.bytes, &header, IfdId::Ifd0).unwrap();
    assert!(parsed.root.find(0x0201, IfdId::Ifd1).is_none());
    assert!(parsed.root.find(0x0202, IfdId::Ifd1).is_none());
    assert!(parsed.root.find(0x010F, IfdId::Ifd0).is_some());
}
