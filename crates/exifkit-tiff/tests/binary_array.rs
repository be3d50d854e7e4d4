//! Binary-array integration tests: version-selected configurations,
//! the Nikon cipher, and element-level edit round trips.

use exifkit_core::{ByteOrder, Value};
use exifkit_tags::IfdId;
use exifkit_tiff::array::nikon_crypt;
use exifkit_tiff::{encode, reader, ExifData, ExifKey, HeaderFormat, TiffHeader, TiffNode};

const SHUTTER_COUNT: u32 = 42_000;
const SERIAL: &str = "6007465";

/// Nikon ShotInfo payload: version 0210, 5291 bytes, body enciphered
/// from byte 4 with the serial/count keys.
fn ciphered_shot_info() -> (Vec<u8>, Vec<u8>) {
    let mut clear = Vec::with_capacity(5291);
    clear.extend_from_slice(b"0210");
    clear.extend((0..5291 - 4).map(|i| (i % 251) as u8));

    let mut wire = clear.clone();
    let serial: u32 = SERIAL.parse().unwrap();
    nikon_crypt(&mut wire[4..], SHUTTER_COUNT, serial);
    (clear, wire)
}

/// Build a block whose Nikon3 makernote carries SerialNumber,
/// ShutterCount and the given ShotInfo bytes, through the engine's own
/// writer.
fn block_with_shot_info(shot_info: &[u8]) -> Vec<u8> {
    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Make", Value::Ascii("NIKON CORPORATION".into()))
        .unwrap();
    exif.set_by_name("Exif.Nikon3.SerialNumber", Value::Ascii(SERIAL.into()))
        .unwrap();
    exif.set_by_name(
        "Exif.Nikon3.ShutterCount",
        Value::ULong(vec![SHUTTER_COUNT]),
    )
    .unwrap();
    exif.set_by_name(
        "Exif.Nikon3.ShotInfo",
        Value::Undefined(shot_info.to_vec()),
    )
    .unwrap();
    let header = TiffHeader::new(ByteOrder::Little);
    encode(None, &header, &exif).unwrap().bytes
}

#[test]
fn shot_info_selects_row_and_deciphers() {
    let (clear, wire) = ciphered_shot_info();
    let block = block_with_shot_info(&wire);

    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();

    let arr_node = parsed
        .root
        .find(0x0091, IfdId::Nikon3)
        .expect("ShotInfo entry");
    let TiffNode::BinaryArray(arr) = arr_node else {
        panic!("ShotInfo is a binary array")
    };
    assert!(arr.decoded);
    // Version 0210 with size 5291 selects the third configuration row.
    assert_eq!(arr.cfg_idx, Some(2));
    assert_eq!(arr.cfg().unwrap().group, IfdId::NikonSi2);
    assert_eq!(arr.crypt_keys, Some((SHUTTER_COUNT, SERIAL.parse().unwrap())));

    // The version element survives as cleartext.
    let version = parsed.root.find(0, IfdId::NikonSi2).unwrap();
    assert_eq!(version.entry_data().unwrap().data, b"0210");

    // A deciphered element matches the cleartext payload.
    let el = parsed
        .root
        .find(100, IfdId::NikonSi2)
        .expect("element at offset 100");
    assert_eq!(el.entry_data().unwrap().data, [clear[100]]);
}

#[test]
fn unknown_version_leaves_array_opaque() {
    let mut wire = b"0999".to_vec();
    wire.resize(64, 0x55);
    let block = block_with_shot_info(&wire);
    let header = TiffHeader::read(&block, HeaderFormat::Standard).unwrap();
    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();

    let TiffNode::BinaryArray(arr) = parsed.root.find(0x0091, IfdId::Nikon3).unwrap() else {
        panic!()
    };
    assert!(!arr.decoded);
    assert_eq!(arr.entry.data, wire);
}

#[test]
fn element_edit_round_trips_through_cipher() {
    let (_, wire) = ciphered_shot_info();
    let source = block_with_shot_info(&wire);
    let header = TiffHeader::read(&source, HeaderFormat::Standard).unwrap();

    // Edit one element (byte offset 100) and re-encode.
    let mut exif = exifkit_tiff::decode_block(&source, HeaderFormat::Standard).unwrap();
    exif.set(
        ExifKey::new(100, IfdId::NikonSi2),
        Value::UByte(vec![0xEE]),
    );
    let out = encode(Some(&source), &header, &exif).unwrap().bytes;

    // Parse the output: the edited element deciphers to the new value.
    let parsed = reader::read(&out, &header, IfdId::Ifd0).unwrap();
    let el = parsed.root.find(100, IfdId::NikonSi2).unwrap();
    assert_eq!(el.entry_data().unwrap().data, [0xEE]);

    // On the wire, the re-enciphered array differs from the source
    // array in exactly the edited byte's position.
    let parsed_src = reader::read(&source, &header, IfdId::Ifd0).unwrap();
    let src_off = parsed_src
        .root
        .find(0x0091, IfdId::Nikon3)
        .and_then(TiffNode::entry_data)
        .unwrap()
        .offset as usize;
    let out_off = parsed
        .root
        .find(0x0091, IfdId::Nikon3)
        .and_then(TiffNode::entry_data)
        .unwrap()
        .offset as usize;
    let src_arr = &source[src_off..src_off + 5291];
    let out_arr = &out[out_off..out_off + 5291];
    let diffs: Vec<usize> = (0..5291).filter(|&i| src_arr[i] != out_arr[i]).collect();
    assert_eq!(diffs, vec![100]);
}

#[test]
fn canon_camera_settings_split_into_elements() {
    // Canon CameraSettings: u16 elements behind a size prefix, bare
    // IFD makernote, element values in the outer byte order.
    let mut cs = Vec::new();
    let values: Vec<u16> = (0..24).map(|i| i * 3).collect();
    cs.extend_from_slice(&(((values.len() + 1) * 2) as u16).to_le_bytes());
    for v in &values {
        cs.extend_from_slice(&v.to_le_bytes());
    }

    let mut exif = ExifData::new();
    exif.set_by_name("Exif.Image.Make", Value::Ascii("Canon".into()))
        .unwrap();
    exif.set_by_name("Exif.Canon.CameraSettings", Value::Undefined(cs))
        .unwrap();
    let header = TiffHeader::new(ByteOrder::Little);
    let block = encode(None, &header, &exif).unwrap().bytes;

    let parsed = reader::read(&block, &header, IfdId::Ifd0).unwrap();
    let TiffNode::BinaryArray(arr) = parsed.root.find(0x0001, IfdId::Canon).unwrap() else {
        panic!("CameraSettings is a binary array")
    };
    assert!(arr.decoded);
    // Element 5 (DriveMode) is values[4]: tag 0 is the size prefix.
    let el = parsed.root.find(5, IfdId::CanonCs).unwrap();
    assert_eq!(
        el.entry_data().unwrap().value.as_ref().unwrap(),
        &Value::UShort(vec![values[4]])
    );
}
