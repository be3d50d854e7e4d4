//! Group identifiers and static tag tables for Exif metadata.
//!
//! - [`IfdId`] - the group (namespace) a tag lives in
//! - [`TagDef`] - name and expected type of a known tag
//! - [`tag_def`] / [`tag_name`] / [`lookup_name`] - registry queries
//!
//! Tag keys use the `Exif.<Group>.<Name>` syntax, e.g.
//! `Exif.Image.Make` or `Exif.Photo.ISOSpeedRatings`:
//!
//! ```
//! use exifkit_tags::{parse_key, IfdId};
//!
//! let (tag, group) = parse_key("Exif.Image.Artist").unwrap();
//! assert_eq!(tag, 0x013B);
//! assert_eq!(group, IfdId::Ifd0);
//! ```

pub mod exif;
mod group;
pub mod vendor;

pub use group::IfdId;

use exifkit_core::TypeId;

/// Definition of a known tag: its name and expected on-disk type.
#[derive(Debug, Clone, Copy)]
pub struct TagDef {
    /// Tag name, e.g. "Make".
    pub name: &'static str,
    /// Expected type. Cameras deviate; readers accept what is stored.
    pub type_id: TypeId,
}

impl TagDef {
    pub const fn new(name: &'static str, type_id: TypeId) -> Self {
        Self { name, type_id }
    }
}

/// Look up the definition of `(tag, group)`, if the tag is known.
pub fn tag_def(tag: u16, group: IfdId) -> Option<&'static TagDef> {
    let table = table_for(group)?;
    table.get(&tag)
}

/// The name of `(tag, group)`; unknown tags print as `0xNNNN`.
pub fn tag_name(tag: u16, group: IfdId) -> String {
    match tag_def(tag, group) {
        Some(def) => def.name.to_string(),
        None => format!("0x{tag:04x}"),
    }
}

/// Reverse lookup: find the tag number for `name` within `group`.
///
/// Accepts hexadecimal names (`0xNNNN`) for tags missing from the
/// tables.
pub fn lookup_name(name: &str, group: IfdId) -> Option<u16> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u16::from_str_radix(hex, 16).ok();
    }
    let table = table_for(group)?;
    table
        .entries()
        .find(|(_, def)| def.name == name)
        .map(|(&tag, _)| tag)
}

/// Parse an `Exif.<Group>.<Name>` key into `(tag, group)`.
pub fn parse_key(key: &str) -> Option<(u16, IfdId)> {
    let mut parts = key.splitn(3, '.');
    if parts.next()? != "Exif" {
        return None;
    }
    let group = IfdId::from_label(parts.next()?)?;
    let tag = lookup_name(parts.next()?, group)?;
    Some((tag, group))
}

/// Format `(tag, group)` as an `Exif.<Group>.<Name>` key.
pub fn format_key(tag: u16, group: IfdId) -> String {
    format!("Exif.{}.{}", group.label(), tag_name(tag, group))
}

fn table_for(group: IfdId) -> Option<&'static phf::Map<u16, TagDef>> {
    use IfdId::*;
    let table = match group {
        Ifd0 | Ifd1 | Ifd2 | Ifd3 | SubImage1 | SubImage2 | SubImage3 | SubImage4 | SubImage5
        | SubImage6 | SubImage7 | SubImage8 | SubImage9 | SubThumb1 => &exif::IFD_TAGS,
        ExifIfd => &exif::EXIF_TAGS,
        GpsIfd => &exif::GPS_TAGS,
        IopIfd => &exif::IOP_TAGS,
        PanaRaw => &vendor::PANA_RAW_TAGS,
        Canon => &vendor::CANON_TAGS,
        CanonCs => &vendor::CANON_CS_TAGS,
        CanonSi => &vendor::CANON_SI_TAGS,
        Nikon1 | Nikon2 | Nikon3 => &vendor::NIKON_TAGS,
        NikonLd1 | NikonLd2 | NikonLd3 => &vendor::NIKON_LD_TAGS,
        NikonSi1 | NikonSi2 => &vendor::NIKON_SI_TAGS,
        NikonVr => &vendor::NIKON_VR_TAGS,
        Olympus | Olympus2 | OmSystem => &vendor::OLYMPUS_TAGS,
        OlympusEq => &vendor::OLYMPUS_EQ_TAGS,
        OlympusCs => &vendor::OLYMPUS_CS_TAGS,
        Fuji => &vendor::FUJI_TAGS,
        Panasonic => &vendor::PANASONIC_TAGS,
        Pentax | PentaxDng => &vendor::PENTAX_TAGS,
        Sony1 | Sony2 => &vendor::SONY_TAGS,
        SonyCs1 | SonyCs2 => &vendor::SONY_CS_TAGS,
        Sigma => &vendor::SIGMA_TAGS,
        Casio | Casio2 => &vendor::CASIO_TAGS,
        Minolta => &vendor::MINOLTA_TAGS,
        _ => return None,
    };
    Some(table)
}
