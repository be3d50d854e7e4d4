//! Property-based robustness tests for the reader.
//!
//! The reader must reject or survive arbitrary input without panicking,
//! and valid blocks it writes must parse back.

use exifkit_core::{ByteOrder, Value};
use exifkit_tags::IfdId;
use exifkit_tiff::{decode_block, encode, reader, ExifData, ExifKey, HeaderFormat, TiffHeader};
use proptest::prelude::*;

proptest! {
    /// Arbitrary bytes never panic the reader.
    #[test]
    fn reader_no_panic(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let _ = decode_block(&data, HeaderFormat::Standard);
    }

    /// Arbitrary bytes behind a valid header never panic the reader.
    #[test]
    fn reader_no_panic_valid_header(body in prop::collection::vec(any::<u8>(), 0..1024)) {
        let mut data = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        data.extend_from_slice(&body);
        let header = TiffHeader::read(&data, HeaderFormat::Standard).unwrap();
        let _ = reader::read(&data, &header, IfdId::Ifd0);
    }

    /// Every ASCII value written comes back unchanged.
    #[test]
    fn ascii_values_round_trip(s in "[ -~]{0,40}") {
        let mut exif = ExifData::new();
        exif.set(ExifKey::new(0x010F, IfdId::Ifd0), Value::Ascii(s.clone()));
        let header = TiffHeader::new(ByteOrder::Little);
        let block = encode(None, &header, &exif).unwrap().bytes;
        let back = decode_block(&block, HeaderFormat::Standard).unwrap();
        prop_assert_eq!(
            back.get(ExifKey::new(0x010F, IfdId::Ifd0)).unwrap().value.as_str(),
            Some(s.as_str())
        );
    }

    /// Short arrays round-trip in both byte orders.
    #[test]
    fn short_arrays_round_trip(
        values in prop::collection::vec(any::<u16>(), 1..16),
        big in any::<bool>()
    ) {
        let bo = if big { ByteOrder::Big } else { ByteOrder::Little };
        let mut exif = ExifData::new();
        exif.set(ExifKey::new(0x0102, IfdId::Ifd0), Value::UShort(values.clone()));
        let header = TiffHeader::new(bo);
        let block = encode(None, &header, &exif).unwrap().bytes;
        let back = decode_block(&block, HeaderFormat::Standard).unwrap();
        prop_assert_eq!(
            back.get(ExifKey::new(0x0102, IfdId::Ifd0)).unwrap().value.clone(),
            Value::UShort(values)
        );
    }
}
