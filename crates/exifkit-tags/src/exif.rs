//! Standard Exif tag tables.
//!
//! Based on the Exif 2.32 / TIFF 6.0 specifications. The IFD table is
//! shared by IFD0, IFD1 and the chained/sub image IFDs of TIFF-based
//! raw formats; the Exif, GPS and Interoperability sub-IFDs each have
//! their own namespace.

use crate::TagDef;
use exifkit_core::TypeId::*;
use phf::phf_map;

/// Well-known tag numbers referenced throughout the engine.
pub mod tags {
    /// NewSubfileType.
    pub const NEW_SUBFILE_TYPE: u16 = 0x00FE;
    /// ImageWidth.
    pub const IMAGE_WIDTH: u16 = 0x0100;
    /// StripOffsets (image data pointers).
    pub const STRIP_OFFSETS: u16 = 0x0111;
    /// StripByteCounts (image data sizes).
    pub const STRIP_BYTE_COUNTS: u16 = 0x0117;
    /// Make.
    pub const MAKE: u16 = 0x010F;
    /// Model.
    pub const MODEL: u16 = 0x0110;
    /// SubIFDs pointer array.
    pub const SUB_IFDS: u16 = 0x014A;
    /// JPEGInterchangeFormat (thumbnail pointer).
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
    /// JPEGInterchangeFormatLength (thumbnail size).
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
    /// Exif sub-IFD pointer.
    pub const EXIF_IFD_POINTER: u16 = 0x8769;
    /// GPS sub-IFD pointer.
    pub const GPS_IFD_POINTER: u16 = 0x8825;
    /// Interoperability sub-IFD pointer.
    pub const IOP_IFD_POINTER: u16 = 0xA005;
    /// MakerNote.
    pub const MAKER_NOTE: u16 = 0x927C;
    /// UserComment.
    pub const USER_COMMENT: u16 = 0x9286;
    /// Nikon serial number (cipher key), Nikon3 group.
    pub const NIKON_SERIAL_NUMBER: u16 = 0x001D;
    /// Nikon shutter count (cipher key), Nikon3 group.
    pub const NIKON_SHUTTER_COUNT: u16 = 0x00A7;
}

/// Tags of IFD0/IFD1 and the other image IFDs.
pub static IFD_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x00FE_u16 => TagDef::new("NewSubfileType", UnsignedLong),
    0x0100_u16 => TagDef::new("ImageWidth", UnsignedLong),
    0x0101_u16 => TagDef::new("ImageLength", UnsignedLong),
    0x0102_u16 => TagDef::new("BitsPerSample", UnsignedShort),
    0x0103_u16 => TagDef::new("Compression", UnsignedShort),
    0x0106_u16 => TagDef::new("PhotometricInterpretation", UnsignedShort),
    0x010E_u16 => TagDef::new("ImageDescription", AsciiString),
    0x010F_u16 => TagDef::new("Make", AsciiString),
    0x0110_u16 => TagDef::new("Model", AsciiString),
    0x0111_u16 => TagDef::new("StripOffsets", UnsignedLong),
    0x0112_u16 => TagDef::new("Orientation", UnsignedShort),
    0x0115_u16 => TagDef::new("SamplesPerPixel", UnsignedShort),
    0x0116_u16 => TagDef::new("RowsPerStrip", UnsignedLong),
    0x0117_u16 => TagDef::new("StripByteCounts", UnsignedLong),
    0x011A_u16 => TagDef::new("XResolution", UnsignedRational),
    0x011B_u16 => TagDef::new("YResolution", UnsignedRational),
    0x011C_u16 => TagDef::new("PlanarConfiguration", UnsignedShort),
    0x0128_u16 => TagDef::new("ResolutionUnit", UnsignedShort),
    0x012D_u16 => TagDef::new("TransferFunction", UnsignedShort),
    0x0131_u16 => TagDef::new("Software", AsciiString),
    0x0132_u16 => TagDef::new("DateTime", AsciiString),
    0x013B_u16 => TagDef::new("Artist", AsciiString),
    0x013E_u16 => TagDef::new("WhitePoint", UnsignedRational),
    0x013F_u16 => TagDef::new("PrimaryChromaticities", UnsignedRational),
    0x014A_u16 => TagDef::new("SubIFDs", UnsignedLong),
    0x0201_u16 => TagDef::new("JPEGInterchangeFormat", UnsignedLong),
    0x0202_u16 => TagDef::new("JPEGInterchangeFormatLength", UnsignedLong),
    0x0211_u16 => TagDef::new("YCbCrCoefficients", UnsignedRational),
    0x0212_u16 => TagDef::new("YCbCrSubSampling", UnsignedShort),
    0x0213_u16 => TagDef::new("YCbCrPositioning", UnsignedShort),
    0x0214_u16 => TagDef::new("ReferenceBlackWhite", UnsignedRational),
    0x02BC_u16 => TagDef::new("XMLPacket", UnsignedByte),
    0x8298_u16 => TagDef::new("Copyright", AsciiString),
    0x83BB_u16 => TagDef::new("IPTCNAA", UnsignedLong),
    0x8649_u16 => TagDef::new("ImageResources", UnsignedByte),
    0x8769_u16 => TagDef::new("ExifTag", UnsignedLong),
    0x8773_u16 => TagDef::new("InterColorProfile", Undefined),
    0x8825_u16 => TagDef::new("GPSTag", UnsignedLong),
    0xC612_u16 => TagDef::new("DNGVersion", UnsignedByte),
    0xC614_u16 => TagDef::new("UniqueCameraModel", AsciiString),
};

/// Tags of the Exif (Photo) sub-IFD.
pub static EXIF_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x829A_u16 => TagDef::new("ExposureTime", UnsignedRational),
    0x829D_u16 => TagDef::new("FNumber", UnsignedRational),
    0x8822_u16 => TagDef::new("ExposureProgram", UnsignedShort),
    0x8824_u16 => TagDef::new("SpectralSensitivity", AsciiString),
    0x8827_u16 => TagDef::new("ISOSpeedRatings", UnsignedShort),
    0x8830_u16 => TagDef::new("SensitivityType", UnsignedShort),
    0x9000_u16 => TagDef::new("ExifVersion", Undefined),
    0x9003_u16 => TagDef::new("DateTimeOriginal", AsciiString),
    0x9004_u16 => TagDef::new("DateTimeDigitized", AsciiString),
    0x9010_u16 => TagDef::new("OffsetTime", AsciiString),
    0x9011_u16 => TagDef::new("OffsetTimeOriginal", AsciiString),
    0x9101_u16 => TagDef::new("ComponentsConfiguration", Undefined),
    0x9102_u16 => TagDef::new("CompressedBitsPerPixel", UnsignedRational),
    0x9201_u16 => TagDef::new("ShutterSpeedValue", SignedRational),
    0x9202_u16 => TagDef::new("ApertureValue", UnsignedRational),
    0x9203_u16 => TagDef::new("BrightnessValue", SignedRational),
    0x9204_u16 => TagDef::new("ExposureBiasValue", SignedRational),
    0x9205_u16 => TagDef::new("MaxApertureValue", UnsignedRational),
    0x9206_u16 => TagDef::new("SubjectDistance", UnsignedRational),
    0x9207_u16 => TagDef::new("MeteringMode", UnsignedShort),
    0x9208_u16 => TagDef::new("LightSource", UnsignedShort),
    0x9209_u16 => TagDef::new("Flash", UnsignedShort),
    0x920A_u16 => TagDef::new("FocalLength", UnsignedRational),
    0x9214_u16 => TagDef::new("SubjectArea", UnsignedShort),
    0x927C_u16 => TagDef::new("MakerNote", Undefined),
    0x9286_u16 => TagDef::new("UserComment", Comment),
    0x9290_u16 => TagDef::new("SubSecTime", AsciiString),
    0x9291_u16 => TagDef::new("SubSecTimeOriginal", AsciiString),
    0x9292_u16 => TagDef::new("SubSecTimeDigitized", AsciiString),
    0xA000_u16 => TagDef::new("FlashpixVersion", Undefined),
    0xA001_u16 => TagDef::new("ColorSpace", UnsignedShort),
    0xA002_u16 => TagDef::new("PixelXDimension", UnsignedLong),
    0xA003_u16 => TagDef::new("PixelYDimension", UnsignedLong),
    0xA004_u16 => TagDef::new("RelatedSoundFile", AsciiString),
    0xA005_u16 => TagDef::new("InteroperabilityTag", UnsignedLong),
    0xA20B_u16 => TagDef::new("FlashEnergy", UnsignedRational),
    0xA20E_u16 => TagDef::new("FocalPlaneXResolution", UnsignedRational),
    0xA20F_u16 => TagDef::new("FocalPlaneYResolution", UnsignedRational),
    0xA210_u16 => TagDef::new("FocalPlaneResolutionUnit", UnsignedShort),
    0xA214_u16 => TagDef::new("SubjectLocation", UnsignedShort),
    0xA215_u16 => TagDef::new("ExposureIndex", UnsignedRational),
    0xA217_u16 => TagDef::new("SensingMethod", UnsignedShort),
    0xA300_u16 => TagDef::new("FileSource", Undefined),
    0xA301_u16 => TagDef::new("SceneType", Undefined),
    0xA302_u16 => TagDef::new("CFAPattern", Undefined),
    0xA401_u16 => TagDef::new("CustomRendered", UnsignedShort),
    0xA402_u16 => TagDef::new("ExposureMode", UnsignedShort),
    0xA403_u16 => TagDef::new("WhiteBalance", UnsignedShort),
    0xA404_u16 => TagDef::new("DigitalZoomRatio", UnsignedRational),
    0xA405_u16 => TagDef::new("FocalLengthIn35mmFilm", UnsignedShort),
    0xA406_u16 => TagDef::new("SceneCaptureType", UnsignedShort),
    0xA407_u16 => TagDef::new("GainControl", UnsignedShort),
    0xA408_u16 => TagDef::new("Contrast", UnsignedShort),
    0xA409_u16 => TagDef::new("Saturation", UnsignedShort),
    0xA40A_u16 => TagDef::new("Sharpness", UnsignedShort),
    0xA40C_u16 => TagDef::new("SubjectDistanceRange", UnsignedShort),
    0xA420_u16 => TagDef::new("ImageUniqueID", AsciiString),
    0xA430_u16 => TagDef::new("CameraOwnerName", AsciiString),
    0xA431_u16 => TagDef::new("BodySerialNumber", AsciiString),
    0xA432_u16 => TagDef::new("LensSpecification", UnsignedRational),
    0xA433_u16 => TagDef::new("LensMake", AsciiString),
    0xA434_u16 => TagDef::new("LensModel", AsciiString),
    0xA435_u16 => TagDef::new("LensSerialNumber", AsciiString),
};

/// Tags of the GPS sub-IFD.
pub static GPS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("GPSVersionID", UnsignedByte),
    0x0001_u16 => TagDef::new("GPSLatitudeRef", AsciiString),
    0x0002_u16 => TagDef::new("GPSLatitude", UnsignedRational),
    0x0003_u16 => TagDef::new("GPSLongitudeRef", AsciiString),
    0x0004_u16 => TagDef::new("GPSLongitude", UnsignedRational),
    0x0005_u16 => TagDef::new("GPSAltitudeRef", UnsignedByte),
    0x0006_u16 => TagDef::new("GPSAltitude", UnsignedRational),
    0x0007_u16 => TagDef::new("GPSTimeStamp", UnsignedRational),
    0x0008_u16 => TagDef::new("GPSSatellites", AsciiString),
    0x0009_u16 => TagDef::new("GPSStatus", AsciiString),
    0x000A_u16 => TagDef::new("GPSMeasureMode", AsciiString),
    0x000B_u16 => TagDef::new("GPSDOP", UnsignedRational),
    0x000C_u16 => TagDef::new("GPSSpeedRef", AsciiString),
    0x000D_u16 => TagDef::new("GPSSpeed", UnsignedRational),
    0x000E_u16 => TagDef::new("GPSTrackRef", AsciiString),
    0x000F_u16 => TagDef::new("GPSTrack", UnsignedRational),
    0x0010_u16 => TagDef::new("GPSImgDirectionRef", AsciiString),
    0x0011_u16 => TagDef::new("GPSImgDirection", UnsignedRational),
    0x0012_u16 => TagDef::new("GPSMapDatum", AsciiString),
    0x001D_u16 => TagDef::new("GPSDateStamp", AsciiString),
    0x001E_u16 => TagDef::new("GPSDifferential", UnsignedShort),
};

/// Tags of the Interoperability sub-IFD.
pub static IOP_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("InteroperabilityIndex", AsciiString),
    0x0002_u16 => TagDef::new("InteroperabilityVersion", Undefined),
    0x1000_u16 => TagDef::new("RelatedImageFileFormat", AsciiString),
    0x1001_u16 => TagDef::new("RelatedImageWidth", UnsignedLong),
    0x1002_u16 => TagDef::new("RelatedImageLength", UnsignedLong),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IfdId;

    #[test]
    fn ifd0_lookup() {
        let def = crate::tag_def(tags::MAKE, IfdId::Ifd0).unwrap();
        assert_eq!(def.name, "Make");
    }

    #[test]
    fn exif_lookup() {
        let def = crate::tag_def(0x9286, IfdId::ExifIfd).unwrap();
        assert_eq!(def.name, "UserComment");
    }

    #[test]
    fn gps_and_ifd0_namespaces_are_distinct() {
        // 0x0001 is GPSLatitudeRef in GPS but unknown in IFD0.
        assert!(crate::tag_def(0x0001, IfdId::GpsIfd).is_some());
        assert!(crate::tag_def(0x0001, IfdId::Ifd0).is_none());
    }
}
