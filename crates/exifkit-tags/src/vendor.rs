//! Makernote tag tables.
//!
//! One table per vendor namespace, hand-reduced to the tags the engine
//! and its binary arrays work with. Binary-array element tables are
//! indexed by element tag (byte offset divided by the array's tag
//! step), not by wire tag number.

use crate::TagDef;
use exifkit_core::TypeId::*;
use phf::phf_map;

/// Canon main makernote tags (bare IFD, no header).
pub static CANON_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("CameraSettings", UnsignedShort),
    0x0004_u16 => TagDef::new("ShotInfo", UnsignedShort),
    0x0005_u16 => TagDef::new("Panorama", UnsignedShort),
    0x0006_u16 => TagDef::new("ImageType", AsciiString),
    0x0007_u16 => TagDef::new("FirmwareVersion", AsciiString),
    0x0008_u16 => TagDef::new("FileNumber", UnsignedLong),
    0x0009_u16 => TagDef::new("OwnerName", AsciiString),
    0x000C_u16 => TagDef::new("SerialNumber", UnsignedLong),
    0x0010_u16 => TagDef::new("ModelID", UnsignedLong),
    0x0013_u16 => TagDef::new("ThumbnailImageValidArea", UnsignedShort),
    0x0093_u16 => TagDef::new("FileInfo", UnsignedShort),
    0x0095_u16 => TagDef::new("LensModel", AsciiString),
    0x00B4_u16 => TagDef::new("ColorSpace", UnsignedShort),
};

/// Canon CameraSettings binary array elements.
pub static CANON_CS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("Macro", UnsignedShort),
    0x0002_u16 => TagDef::new("Selftimer", UnsignedShort),
    0x0003_u16 => TagDef::new("Quality", UnsignedShort),
    0x0004_u16 => TagDef::new("FlashMode", UnsignedShort),
    0x0005_u16 => TagDef::new("DriveMode", UnsignedShort),
    0x0007_u16 => TagDef::new("FocusMode", UnsignedShort),
    0x000A_u16 => TagDef::new("ImageSize", UnsignedShort),
    0x000B_u16 => TagDef::new("EasyMode", UnsignedShort),
    0x000C_u16 => TagDef::new("DigitalZoom", UnsignedShort),
    0x000D_u16 => TagDef::new("Contrast", UnsignedShort),
    0x000E_u16 => TagDef::new("Saturation", UnsignedShort),
    0x000F_u16 => TagDef::new("Sharpness", UnsignedShort),
    0x0010_u16 => TagDef::new("ISOSpeed", UnsignedShort),
    0x0011_u16 => TagDef::new("MeteringMode", UnsignedShort),
    0x0012_u16 => TagDef::new("FocusType", UnsignedShort),
    0x0013_u16 => TagDef::new("AFPoint", UnsignedShort),
    0x0014_u16 => TagDef::new("ExposureProgram", UnsignedShort),
    0x0016_u16 => TagDef::new("LensType", UnsignedShort),
    0x0017_u16 => TagDef::new("Lens", UnsignedShort),
};

/// Canon ShotInfo binary array elements.
pub static CANON_SI_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("AutoISO", UnsignedShort),
    0x0002_u16 => TagDef::new("BaseISO", UnsignedShort),
    0x0003_u16 => TagDef::new("MeasuredEV", UnsignedShort),
    0x0004_u16 => TagDef::new("TargetAperture", UnsignedShort),
    0x0005_u16 => TagDef::new("TargetExposureTime", UnsignedShort),
    0x0007_u16 => TagDef::new("WhiteBalance", UnsignedShort),
    0x0009_u16 => TagDef::new("SequenceNumber", UnsignedShort),
    0x000E_u16 => TagDef::new("AFPointsInFocus", UnsignedShort),
    0x000F_u16 => TagDef::new("FlashExposureComp", UnsignedShort),
    0x0010_u16 => TagDef::new("AutoExposureBracketing", UnsignedShort),
    0x0013_u16 => TagDef::new("SubjectDistance", UnsignedShort),
    0x0015_u16 => TagDef::new("ApertureValue", UnsignedShort),
    0x0016_u16 => TagDef::new("ShutterSpeedValue", UnsignedShort),
    0x0017_u16 => TagDef::new("MeasuredEV2", UnsignedShort),
};

/// Nikon main makernote tags (shared by the three header formats).
pub static NIKON_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("Version", Undefined),
    0x0002_u16 => TagDef::new("ISOSpeed", UnsignedShort),
    0x0004_u16 => TagDef::new("Quality", AsciiString),
    0x0005_u16 => TagDef::new("WhiteBalance", AsciiString),
    0x0006_u16 => TagDef::new("Sharpening", AsciiString),
    0x0007_u16 => TagDef::new("Focus", AsciiString),
    0x0008_u16 => TagDef::new("FlashSetting", AsciiString),
    0x0009_u16 => TagDef::new("FlashDevice", AsciiString),
    0x000B_u16 => TagDef::new("WhiteBalanceBias", SignedShort),
    0x0011_u16 => TagDef::new("PreviewIFD", UnsignedLong),
    0x001D_u16 => TagDef::new("SerialNumber", AsciiString),
    0x001F_u16 => TagDef::new("VibrationReduction", Undefined),
    0x0023_u16 => TagDef::new("PictureControl", Undefined),
    0x0024_u16 => TagDef::new("WorldTime", Undefined),
    0x0083_u16 => TagDef::new("LensType", UnsignedByte),
    0x0084_u16 => TagDef::new("Lens", UnsignedRational),
    0x0087_u16 => TagDef::new("FlashMode", UnsignedByte),
    0x0089_u16 => TagDef::new("ShootingMode", UnsignedShort),
    0x0091_u16 => TagDef::new("ShotInfo", Undefined),
    0x0093_u16 => TagDef::new("NEFCompression", UnsignedShort),
    0x0097_u16 => TagDef::new("ColorBalance", Undefined),
    0x0098_u16 => TagDef::new("LensData", Undefined),
    0x00A7_u16 => TagDef::new("ShutterCount", UnsignedLong),
    0x00B0_u16 => TagDef::new("MultiExposure", Undefined),
};

/// Nikon LensData binary array elements.
pub static NIKON_LD_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", Undefined),
    0x0004_u16 => TagDef::new("ExitPupilPosition", UnsignedByte),
    0x0005_u16 => TagDef::new("AFAperture", UnsignedByte),
    0x0008_u16 => TagDef::new("FocusPosition", UnsignedByte),
    0x0009_u16 => TagDef::new("FocusDistance", UnsignedByte),
    0x000A_u16 => TagDef::new("FocalLength", UnsignedByte),
    0x000B_u16 => TagDef::new("LensIDNumber", UnsignedByte),
    0x000C_u16 => TagDef::new("LensFStops", UnsignedByte),
    0x000D_u16 => TagDef::new("MinFocalLength", UnsignedByte),
    0x000E_u16 => TagDef::new("MaxFocalLength", UnsignedByte),
    0x000F_u16 => TagDef::new("MaxApertureAtMinFocal", UnsignedByte),
    0x0010_u16 => TagDef::new("MaxApertureAtMaxFocal", UnsignedByte),
    0x0011_u16 => TagDef::new("MCUVersion", UnsignedByte),
    0x0012_u16 => TagDef::new("EffectiveMaxAperture", UnsignedByte),
};

/// Nikon ShotInfo binary array elements (version-dependent layouts
/// share the leading fields).
pub static NIKON_SI_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", Undefined),
    0x0004_u16 => TagDef::new("FirmwareVersion", Undefined),
};

/// Nikon VRInfo binary array elements.
pub static NIKON_VR_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", Undefined),
    0x0004_u16 => TagDef::new("VibrationReduction", UnsignedByte),
    0x0006_u16 => TagDef::new("VRMode", UnsignedByte),
};

/// Olympus main makernote tags.
pub static OLYMPUS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0200_u16 => TagDef::new("SpecialMode", UnsignedLong),
    0x0201_u16 => TagDef::new("Quality", UnsignedShort),
    0x0202_u16 => TagDef::new("Macro", UnsignedShort),
    0x0204_u16 => TagDef::new("DigitalZoom", UnsignedRational),
    0x0207_u16 => TagDef::new("CameraType", AsciiString),
    0x0209_u16 => TagDef::new("CameraID", Undefined),
    0x020B_u16 => TagDef::new("ImageWidth", UnsignedLong),
    0x020C_u16 => TagDef::new("ImageHeight", UnsignedLong),
    0x0404_u16 => TagDef::new("SerialNumber", AsciiString),
    0x2010_u16 => TagDef::new("Equipment", Undefined),
    0x2020_u16 => TagDef::new("CameraSettings", Undefined),
};

/// Olympus Equipment sub-IFD tags.
pub static OLYMPUS_EQ_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("EquipmentVersion", Undefined),
    0x0100_u16 => TagDef::new("CameraType2", AsciiString),
    0x0101_u16 => TagDef::new("SerialNumber", AsciiString),
    0x0201_u16 => TagDef::new("LensType", UnsignedByte),
    0x0202_u16 => TagDef::new("LensSerialNumber", AsciiString),
    0x0204_u16 => TagDef::new("LensFirmwareVersion", UnsignedLong),
};

/// Olympus CameraSettings sub-IFD tags.
pub static OLYMPUS_CS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("CameraSettingsVersion", Undefined),
    0x0100_u16 => TagDef::new("PreviewImageValid", UnsignedLong),
    0x0101_u16 => TagDef::new("PreviewImageStart", UnsignedLong),
    0x0102_u16 => TagDef::new("PreviewImageLength", UnsignedLong),
    0x0200_u16 => TagDef::new("ExposureMode", UnsignedShort),
    0x0501_u16 => TagDef::new("WhiteBalance2", UnsignedShort),
};

/// Fujifilm makernote tags.
pub static FUJI_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", Undefined),
    0x0010_u16 => TagDef::new("SerialNumber", AsciiString),
    0x1000_u16 => TagDef::new("Quality", AsciiString),
    0x1001_u16 => TagDef::new("Sharpness", UnsignedShort),
    0x1002_u16 => TagDef::new("WhiteBalance", UnsignedShort),
    0x1003_u16 => TagDef::new("Color", UnsignedShort),
    0x1010_u16 => TagDef::new("FlashMode", UnsignedShort),
    0x1020_u16 => TagDef::new("Macro", UnsignedShort),
    0x1021_u16 => TagDef::new("FocusMode", UnsignedShort),
    0x1030_u16 => TagDef::new("SlowSync", UnsignedShort),
    0x1031_u16 => TagDef::new("PictureMode", UnsignedShort),
};

/// Panasonic makernote tags.
pub static PANASONIC_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("Quality", UnsignedShort),
    0x0002_u16 => TagDef::new("FirmwareVersion", Undefined),
    0x0003_u16 => TagDef::new("WhiteBalance", UnsignedShort),
    0x0007_u16 => TagDef::new("FocusMode", UnsignedShort),
    0x001A_u16 => TagDef::new("ImageStabilization", UnsignedShort),
    0x001C_u16 => TagDef::new("Macro", UnsignedShort),
    0x001F_u16 => TagDef::new("ShootingMode", UnsignedShort),
    0x0025_u16 => TagDef::new("InternalSerialNumber", Undefined),
    0x0051_u16 => TagDef::new("LensType", AsciiString),
    0x0052_u16 => TagDef::new("LensSerialNumber", AsciiString),
};

/// Panasonic RW2 root IFD tags.
pub static PANA_RAW_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("Version", Undefined),
    0x0002_u16 => TagDef::new("SensorWidth", UnsignedShort),
    0x0003_u16 => TagDef::new("SensorHeight", UnsignedShort),
    0x0004_u16 => TagDef::new("SensorTopBorder", UnsignedShort),
    0x0005_u16 => TagDef::new("SensorLeftBorder", UnsignedShort),
    0x0006_u16 => TagDef::new("SensorBottomBorder", UnsignedShort),
    0x0007_u16 => TagDef::new("SensorRightBorder", UnsignedShort),
    0x0011_u16 => TagDef::new("RedBalance", UnsignedShort),
    0x0012_u16 => TagDef::new("BlueBalance", UnsignedShort),
    0x0017_u16 => TagDef::new("ISOSpeed", UnsignedShort),
    0x002E_u16 => TagDef::new("JpgFromRaw", Undefined),
};

/// Pentax makernote tags.
pub static PENTAX_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", UnsignedByte),
    0x0001_u16 => TagDef::new("Mode", UnsignedShort),
    0x0002_u16 => TagDef::new("PreviewResolution", UnsignedShort),
    0x0003_u16 => TagDef::new("PreviewLength", UnsignedLong),
    0x0004_u16 => TagDef::new("PreviewOffset", UnsignedLong),
    0x0005_u16 => TagDef::new("ModelID", UnsignedLong),
    0x0006_u16 => TagDef::new("Date", Undefined),
    0x0007_u16 => TagDef::new("Time", Undefined),
    0x0013_u16 => TagDef::new("FNumber", UnsignedShort),
    0x0014_u16 => TagDef::new("ISO", UnsignedShort),
    0x003F_u16 => TagDef::new("LensType", UnsignedByte),
};

/// Sony makernote tags (Sony1 and Sony2).
pub static SONY_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0102_u16 => TagDef::new("Quality", UnsignedLong),
    0x0104_u16 => TagDef::new("FlashExposureComp", SignedRational),
    0x0105_u16 => TagDef::new("Teleconverter", UnsignedLong),
    0x0112_u16 => TagDef::new("WhiteBalanceFineTune", UnsignedLong),
    0x0114_u16 => TagDef::new("CameraSettings", Undefined),
    0x0115_u16 => TagDef::new("WhiteBalance", UnsignedLong),
    0xB026_u16 => TagDef::new("ImageStabilization", UnsignedLong),
    0xB027_u16 => TagDef::new("LensID", UnsignedLong),
    0xB02A_u16 => TagDef::new("SequenceLength", UnsignedLong),
};

/// Sony CameraSettings binary array elements (u16 step).
pub static SONY_CS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0004_u16 => TagDef::new("DriveMode", UnsignedShort),
    0x0006_u16 => TagDef::new("WhiteBalanceFineTune", SignedShort),
    0x0010_u16 => TagDef::new("FocusMode", UnsignedShort),
    0x0011_u16 => TagDef::new("AFAreaMode", UnsignedShort),
    0x0012_u16 => TagDef::new("LocalAFAreaPoint", UnsignedShort),
    0x0015_u16 => TagDef::new("MeteringMode", UnsignedShort),
    0x0016_u16 => TagDef::new("ISOSetting", UnsignedShort),
    0x0018_u16 => TagDef::new("DynamicRangeOptimizerMode", UnsignedShort),
    0x0020_u16 => TagDef::new("DynamicRangeOptimizerLevel", UnsignedShort),
};

/// Sigma/Foveon makernote tags.
pub static SIGMA_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0002_u16 => TagDef::new("SerialNumber", AsciiString),
    0x0003_u16 => TagDef::new("DriveMode", AsciiString),
    0x0004_u16 => TagDef::new("ResolutionMode", AsciiString),
    0x0005_u16 => TagDef::new("AutofocusMode", AsciiString),
    0x0008_u16 => TagDef::new("WhiteBalance", AsciiString),
    0x000A_u16 => TagDef::new("LensRange", AsciiString),
};

/// Casio makernote tags (both variants).
pub static CASIO_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0001_u16 => TagDef::new("RecordingMode", UnsignedShort),
    0x0002_u16 => TagDef::new("Quality", UnsignedShort),
    0x0003_u16 => TagDef::new("FocusMode", UnsignedShort),
    0x0004_u16 => TagDef::new("FlashMode", UnsignedShort),
    0x0005_u16 => TagDef::new("FlashIntensity", UnsignedShort),
    0x0006_u16 => TagDef::new("ObjectDistance", UnsignedLong),
    0x0007_u16 => TagDef::new("WhiteBalance", UnsignedShort),
    0x0014_u16 => TagDef::new("CCDSensitivity", UnsignedShort),
};

/// Minolta makernote tags.
pub static MINOLTA_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("Version", Undefined),
    0x0040_u16 => TagDef::new("CompressedImageSize", UnsignedLong),
    0x0081_u16 => TagDef::new("Thumbnail", Undefined),
    0x0088_u16 => TagDef::new("ThumbnailOffset", UnsignedLong),
    0x0089_u16 => TagDef::new("ThumbnailLength", UnsignedLong),
};

#[cfg(test)]
mod tests {
    use crate::IfdId;

    #[test]
    fn nikon_shot_info_known() {
        let def = crate::tag_def(0x0091, IfdId::Nikon3).unwrap();
        assert_eq!(def.name, "ShotInfo");
    }

    #[test]
    fn canon_cs_elements_use_element_tags() {
        assert_eq!(crate::tag_name(0x0001, IfdId::CanonCs), "Macro");
        assert_eq!(crate::tag_name(0x0010, IfdId::CanonCs), "ISOSpeed");
    }

    #[test]
    fn pana_raw_namespace() {
        assert_eq!(crate::tag_name(0x0002, IfdId::PanaRaw), "SensorWidth");
    }
}
