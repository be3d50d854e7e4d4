//! Group (IFD) identifiers.
//!
//! A group is the logical namespace a tag number is interpreted in:
//! the primary image IFD, a sub-IFD like the Exif or GPS IFD, a vendor
//! makernote, or a synthetic group holding the elements of a binary
//! array. The discriminant values are arranged so that every
//! makernote-scoped group compares greater than or equal to
//! [`IfdId::MakerNote`]; the writer relies on this to decide which
//! directories keep their insertion order.

/// Group identifier. Pure discriminator, no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[must_use]
pub enum IfdId {
    /// Primary image IFD.
    Ifd0 = 1,
    /// Thumbnail IFD (chained from IFD0).
    Ifd1 = 2,
    /// Second chained image IFD (TIFF-based raws).
    Ifd2 = 3,
    /// Third chained image IFD (CR2 raw image data).
    Ifd3 = 4,
    /// Exif sub-IFD (tag 0x8769).
    ExifIfd = 5,
    /// GPS sub-IFD (tag 0x8825).
    GpsIfd = 6,
    /// Interoperability sub-IFD (tag 0xA005).
    IopIfd = 7,
    SubImage1 = 10,
    SubImage2 = 11,
    SubImage3 = 12,
    SubImage4 = 13,
    SubImage5 = 14,
    SubImage6 = 15,
    SubImage7 = 16,
    SubImage8 = 17,
    SubImage9 = 18,
    /// Thumbnail sub-IFD of NEF files.
    SubThumb1 = 19,
    /// Root IFD of Panasonic RW2 images.
    PanaRaw = 30,

    /// The undecoded MakerNote entry itself (tag 0x927C).
    MakerNote = 100,
    Canon = 101,
    /// Canon camera settings binary array.
    CanonCs = 102,
    /// Canon shot info binary array.
    CanonSi = 103,
    /// Canon panorama binary array.
    CanonPa = 104,
    /// Canon file info binary array.
    CanonFi = 105,
    Nikon1 = 110,
    Nikon2 = 111,
    Nikon3 = 112,
    /// Nikon vibration reduction binary array.
    NikonVr = 113,
    /// Nikon picture control binary array.
    NikonPc = 114,
    /// Nikon world time binary array.
    NikonWt = 115,
    NikonLd1 = 116,
    NikonLd2 = 117,
    NikonLd3 = 118,
    NikonSi1 = 119,
    NikonSi2 = 120,
    NikonCb1 = 121,
    NikonCb2 = 122,
    Olympus = 130,
    Olympus2 = 131,
    /// Olympus equipment sub-IFD.
    OlympusEq = 132,
    /// Olympus camera settings sub-IFD.
    OlympusCs = 133,
    OmSystem = 134,
    Fuji = 140,
    Pentax = 145,
    PentaxDng = 146,
    Samsung2 = 150,
    /// Samsung picture wizard binary array.
    SamsungPw = 151,
    Sigma = 155,
    Sony1 = 160,
    Sony2 = 161,
    SonyCs1 = 162,
    SonyCs2 = 163,
    Panasonic = 170,
    Casio = 175,
    Casio2 = 176,
    Minolta = 180,
}

impl IfdId {
    /// True for groups nested inside a makernote. Directories of these
    /// groups preserve insertion order on write instead of sorting by
    /// tag.
    #[inline]
    pub fn is_makernote(self) -> bool {
        self >= IfdId::MakerNote
    }

    /// The group label used in `Exif.<Group>.<Name>` keys.
    pub fn label(self) -> &'static str {
        use IfdId::*;
        match self {
            Ifd0 => "Image",
            Ifd1 => "Thumbnail",
            Ifd2 => "Image2",
            Ifd3 => "Image3",
            ExifIfd => "Photo",
            GpsIfd => "GPSInfo",
            IopIfd => "Iop",
            SubImage1 => "SubImage1",
            SubImage2 => "SubImage2",
            SubImage3 => "SubImage3",
            SubImage4 => "SubImage4",
            SubImage5 => "SubImage5",
            SubImage6 => "SubImage6",
            SubImage7 => "SubImage7",
            SubImage8 => "SubImage8",
            SubImage9 => "SubImage9",
            SubThumb1 => "SubThumb1",
            PanaRaw => "PanasonicRaw",
            MakerNote => "MakerNote",
            Canon => "Canon",
            CanonCs => "CanonCs",
            CanonSi => "CanonSi",
            CanonPa => "CanonPa",
            CanonFi => "CanonFi",
            Nikon1 => "Nikon1",
            Nikon2 => "Nikon2",
            Nikon3 => "Nikon3",
            NikonVr => "NikonVr",
            NikonPc => "NikonPc",
            NikonWt => "NikonWt",
            NikonLd1 => "NikonLd1",
            NikonLd2 => "NikonLd2",
            NikonLd3 => "NikonLd3",
            NikonSi1 => "NikonSi1",
            NikonSi2 => "NikonSi2",
            NikonCb1 => "NikonCb1",
            NikonCb2 => "NikonCb2",
            Olympus => "Olympus",
            Olympus2 => "Olympus2",
            OlympusEq => "OlympusEq",
            OlympusCs => "OlympusCs",
            OmSystem => "OMSystem",
            Fuji => "Fujifilm",
            Pentax => "Pentax",
            PentaxDng => "PentaxDng",
            Samsung2 => "Samsung2",
            SamsungPw => "SamsungPreview",
            Sigma => "Sigma",
            Sony1 => "Sony1",
            Sony2 => "Sony2",
            SonyCs1 => "SonyCs",
            SonyCs2 => "SonyCs2",
            Panasonic => "Panasonic",
            Casio => "Casio",
            Casio2 => "Casio2",
            Minolta => "Minolta",
        }
    }

    /// Inverse of [`IfdId::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        use IfdId::*;
        let all = [
            Ifd0, Ifd1, Ifd2, Ifd3, ExifIfd, GpsIfd, IopIfd, SubImage1, SubImage2, SubImage3,
            SubImage4, SubImage5, SubImage6, SubImage7, SubImage8, SubImage9, SubThumb1, PanaRaw,
            MakerNote, Canon, CanonCs, CanonSi, CanonPa, CanonFi, Nikon1, Nikon2, Nikon3, NikonVr,
            NikonPc, NikonWt, NikonLd1, NikonLd2, NikonLd3, NikonSi1, NikonSi2, NikonCb1, NikonCb2,
            Olympus, Olympus2, OlympusEq, OlympusCs, OmSystem, Fuji, Pentax, PentaxDng, Samsung2,
            SamsungPw, Sigma, Sony1, Sony2, SonyCs1, SonyCs2, Panasonic, Casio, Casio2, Minolta,
        ];
        all.into_iter().find(|g| g.label() == label)
    }

    /// The n-th SubImage group (1-based), if in range.
    pub fn sub_image(n: usize) -> Option<Self> {
        use IfdId::*;
        [
            SubImage1, SubImage2, SubImage3, SubImage4, SubImage5, SubImage6, SubImage7, SubImage8,
            SubImage9,
        ]
        .get(n.checked_sub(1)?)
        .copied()
    }
}

impl std::fmt::Display for IfdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn makernote_ordering() {
        assert!(!IfdId::Ifd0.is_makernote());
        assert!(!IfdId::ExifIfd.is_makernote());
        assert!(!IfdId::PanaRaw.is_makernote());
        assert!(IfdId::MakerNote.is_makernote());
        assert!(IfdId::Canon.is_makernote());
        assert!(IfdId::NikonSi2.is_makernote());
        assert!(IfdId::Casio2.is_makernote());
    }

    #[test]
    fn label_round_trip() {
        for g in [
            IfdId::Ifd0,
            IfdId::ExifIfd,
            IfdId::GpsIfd,
            IfdId::Nikon3,
            IfdId::PanaRaw,
            IfdId::SonyCs1,
        ] {
            assert_eq!(IfdId::from_label(g.label()), Some(g));
        }
        assert_eq!(IfdId::from_label("NoSuchGroup"), None);
    }

    #[test]
    fn sub_image_index() {
        assert_eq!(IfdId::sub_image(1), Some(IfdId::SubImage1));
        assert_eq!(IfdId::sub_image(9), Some(IfdId::SubImage9));
        assert_eq!(IfdId::sub_image(0), None);
        assert_eq!(IfdId::sub_image(10), None);
    }
}
