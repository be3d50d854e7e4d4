//! Makernote identification and headers.
//!
//! The MakerNote tag (0x927C) holds a vendor-specific blob, usually a
//! nested IFD behind a short vendor header. A static registry maps the
//! camera make to a probe that checks the header signature and decides
//! the makernote group, the byte order and the base offset nested
//! offsets are relative to.
//!
//! Base-offset conventions vary: Olympus v1, Nikon v2, Pentax, Sigma,
//! Sony and Casio reference the outer TIFF; Olympus v2, OM System,
//! Fuji, Pentax-DNG and Samsung reference the makernote start; Nikon
//! v3 embeds a complete TIFF header and references makernote start +
//! 10.

use crate::node::IfdMakernote;
use crate::writer::WriteCtx;
use exifkit_core::ByteOrder;
use exifkit_tags::IfdId;
use tracing::debug;

const OLYMPUS_SIG: &[u8] = b"OLYMP\0\x01\x00";
const OLYMPUS2_SIG: &[u8] = b"OLYMPUS\0II\x03\x00";
const OM_SYSTEM_SIG: &[u8] = b"OM SYSTEM\0\0\0II\x04\x00";
const FUJI_SIG: &[u8] = b"FUJIFILM\x0c\x00\x00\x00";
const NIKON2_SIG: &[u8] = b"Nikon\0\x01\x00";
const NIKON3_SIG: &[u8] = b"Nikon\0\x02\x10\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
const PANASONIC_SIG: &[u8] = b"Panasonic\0\0\0";
const PENTAX_SIG: &[u8] = b"AOC\0MM";
const PENTAX_DNG_SIG: &[u8] = b"PENTAX \0MM";
const SIGMA_SIG1: &[u8] = b"SIGMA\0\0\0\x01\x00";
const SIGMA_SIG2: &[u8] = b"FOVEON\0\0\x01\x00";
const SONY_SIG: &[u8] = b"SONY DSC \0\0\0";
const CASIO2_SIG: &[u8] = b"QVC\0\0\0";

/// Minimum bytes for an IFD with one entry and no next pointer.
const MIN_IFD: usize = 14;
/// Minimum bytes for an IFD with one entry and a next pointer.
const MIN_IFD_NEXT: usize = 18;

/// A parsed (or manufactured) makernote header.
#[derive(Debug, Clone)]
pub enum MnHeader {
    /// Bare IFD, no header (Canon, Minolta, Nikon v1, Sony v2, Casio).
    None,
    /// Headerless with offsets relative to the makernote (Samsung).
    Samsung,
    Olympus,
    Olympus2,
    OmSystem,
    Fuji {
        /// IFD offset read from the header (normally 12).
        start: u32,
    },
    Nikon2,
    Nikon3 {
        /// Byte order of the embedded TIFF header.
        byte_order: Option<ByteOrder>,
        /// IFD offset relative to the makernote start (10 + embedded
        /// first-IFD offset).
        start: u32,
    },
    Panasonic,
    Pentax,
    PentaxDng,
    Sigma {
        /// True when the `FOVEON` signature variant was seen.
        foveon: bool,
    },
    Sony,
    Casio2,
}

impl MnHeader {
    /// Serialized header size.
    pub fn size(&self) -> usize {
        match self {
            MnHeader::None | MnHeader::Samsung => 0,
            MnHeader::Olympus => OLYMPUS_SIG.len(),
            MnHeader::Olympus2 => OLYMPUS2_SIG.len(),
            MnHeader::OmSystem => OM_SYSTEM_SIG.len(),
            MnHeader::Fuji { .. } => FUJI_SIG.len(),
            MnHeader::Nikon2 => NIKON2_SIG.len(),
            MnHeader::Nikon3 { .. } => NIKON3_SIG.len(),
            MnHeader::Panasonic => PANASONIC_SIG.len(),
            MnHeader::Pentax => PENTAX_SIG.len(),
            MnHeader::PentaxDng => PENTAX_DNG_SIG.len(),
            MnHeader::Sigma { .. } => SIGMA_SIG1.len(),
            MnHeader::Sony => SONY_SIG.len(),
            MnHeader::Casio2 => CASIO2_SIG.len(),
        }
    }

    /// Offset of the nested IFD, relative to the makernote start.
    pub fn ifd_offset(&self) -> usize {
        match self {
            MnHeader::Fuji { start } => *start as usize,
            MnHeader::Nikon3 { start, .. } => *start as usize,
            other => other.size(),
        }
    }

    /// The byte order the header declares, if any. `None` inherits the
    /// enclosing image's byte order.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        match self {
            MnHeader::Fuji { .. } => Some(ByteOrder::Little),
            MnHeader::Casio2 => Some(ByteOrder::Big),
            MnHeader::Nikon3 { byte_order, .. } => *byte_order,
            _ => None,
        }
    }

    /// Absolute base for offsets inside the makernote, given the
    /// makernote's position in the outer TIFF.
    pub fn base_offset(&self, mn_offset: usize) -> usize {
        match self {
            MnHeader::Olympus2
            | MnHeader::OmSystem
            | MnHeader::Fuji { .. }
            | MnHeader::PentaxDng
            | MnHeader::Samsung => mn_offset,
            MnHeader::Nikon3 { .. } => mn_offset + 10,
            _ => 0,
        }
    }

    /// Emit the header. `bo` is the byte order of the makernote IFD;
    /// only Nikon v3 re-encodes it into the header.
    pub fn write(&self, ctx: &mut WriteCtx, bo: ByteOrder) -> usize {
        match self {
            MnHeader::None | MnHeader::Samsung => 0,
            MnHeader::Olympus => ctx.write(OLYMPUS_SIG),
            MnHeader::Olympus2 => ctx.write(OLYMPUS2_SIG),
            MnHeader::OmSystem => ctx.write(OM_SYSTEM_SIG),
            MnHeader::Fuji { .. } => ctx.write(FUJI_SIG),
            MnHeader::Nikon2 => ctx.write(NIKON2_SIG),
            MnHeader::Nikon3 { .. } => {
                // Ten signature bytes, then a fresh embedded TIFF
                // header; any gap before the original IFD is dropped.
                let mut len = ctx.write(&NIKON3_SIG[..10]);
                len += ctx.write(&bo.marker());
                len += ctx.write(&bo.write_u16(crate::header::TIFF_MAGIC));
                len += ctx.write(&bo.write_u32(8));
                len
            }
            MnHeader::Panasonic => ctx.write(PANASONIC_SIG),
            MnHeader::Pentax => ctx.write(PENTAX_SIG),
            MnHeader::PentaxDng => ctx.write(PENTAX_DNG_SIG),
            MnHeader::Sigma { foveon } => {
                if *foveon {
                    ctx.write(SIGMA_SIG2)
                } else {
                    ctx.write(SIGMA_SIG1)
                }
            }
            MnHeader::Sony => ctx.write(SONY_SIG),
            MnHeader::Casio2 => ctx.write(CASIO2_SIG),
        }
    }
}

type ProbeFn = fn(u16, IfdId, &[u8], ByteOrder) -> Option<IfdMakernote>;

struct MnRegistryRow {
    make: &'static str,
    probe: ProbeFn,
}

const fn r(make: &'static str, probe: ProbeFn) -> MnRegistryRow {
    MnRegistryRow { make, probe }
}

static REGISTRY: &[MnRegistryRow] = &[
    r("Canon", probe_bare_canon),
    r("FOVEON", probe_sigma),
    r("FUJI", probe_fuji),
    r("KONICA MINOLTA", probe_bare_minolta),
    r("Minolta", probe_bare_minolta),
    r("NIKON", probe_nikon),
    r("OLYMPUS", probe_olympus),
    r("OM Digital", probe_om_system),
    r("Panasonic", probe_panasonic),
    r("PENTAX", probe_pentax),
    r("RICOH", probe_pentax),
    r("SAMSUNG", probe_samsung),
    r("SIGMA", probe_sigma),
    r("SONY", probe_sony),
    r("CASIO", probe_casio),
];

/// Probe the MakerNote bytes against the registry entry matching the
/// camera make. Returns `None` when no registry row matches or the
/// blob is too small; the MakerNote then stays an opaque entry.
pub fn identify(
    tag: u16,
    group: IfdId,
    make: &str,
    data: &[u8],
    byte_order: ByteOrder,
) -> Option<IfdMakernote> {
    let row = REGISTRY.iter().find(|r| make.starts_with(r.make))?;
    let mn = (row.probe)(tag, group, data, byte_order);
    if let Some(mn) = &mn {
        debug!(group = %mn.mn_group, "identified makernote");
    }
    mn
}

/// Construct an empty makernote for a group, used when user edits
/// materialize a makernote that the source image did not have.
pub fn create_for_group(tag: u16, group: IfdId, mn_group: IfdId) -> Option<IfdMakernote> {
    let (header, has_next) = match mn_group {
        IfdId::Canon | IfdId::Minolta | IfdId::Nikon1 | IfdId::Casio => (MnHeader::None, true),
        IfdId::Sony2 => (MnHeader::None, true),
        IfdId::Nikon2 => (MnHeader::Nikon2, true),
        IfdId::Nikon3 => (
            MnHeader::Nikon3 {
                byte_order: None,
                start: 18,
            },
            true,
        ),
        IfdId::Olympus => (MnHeader::Olympus, true),
        IfdId::Olympus2 => (MnHeader::Olympus2, true),
        IfdId::OmSystem => (MnHeader::OmSystem, true),
        IfdId::Fuji => (MnHeader::Fuji { start: 12 }, true),
        IfdId::Panasonic => (MnHeader::Panasonic, false),
        IfdId::Pentax => (MnHeader::Pentax, true),
        IfdId::PentaxDng => (MnHeader::PentaxDng, true),
        IfdId::Samsung2 => (MnHeader::Samsung, true),
        IfdId::Sigma => (MnHeader::Sigma { foveon: false }, true),
        IfdId::Sony1 => (MnHeader::Sony, false),
        IfdId::Casio2 => (MnHeader::Casio2, true),
        _ => return None,
    };
    Some(IfdMakernote::new(tag, group, mn_group, header, has_next))
}

fn probe_bare(tag: u16, group: IfdId, data: &[u8], mn_group: IfdId) -> Option<IfdMakernote> {
    if data.len() < MIN_IFD {
        return None;
    }
    Some(IfdMakernote::new(tag, group, mn_group, MnHeader::None, true))
}

fn probe_bare_canon(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    probe_bare(tag, group, data, IfdId::Canon)
}

fn probe_bare_minolta(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    probe_bare(tag, group, data, IfdId::Minolta)
}

fn probe_olympus(tag: u16, group: IfdId, data: &[u8], bo: ByteOrder) -> Option<IfdMakernote> {
    // Some Olympus files carry an overwritten OM System header.
    if data.len() >= 14 && &data[..14] == &OM_SYSTEM_SIG[..14] {
        return probe_om_system(tag, group, data, bo);
    }
    if data.len() >= 10 && &data[..10] == &OLYMPUS2_SIG[..10] {
        if data.len() < OLYMPUS2_SIG.len() + MIN_IFD_NEXT {
            return None;
        }
        return Some(IfdMakernote::new(
            tag,
            group,
            IfdId::Olympus2,
            MnHeader::Olympus2,
            true,
        ));
    }
    if data.len() < OLYMPUS_SIG.len() + MIN_IFD_NEXT || &data[..6] != &OLYMPUS_SIG[..6] {
        return None;
    }
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Olympus,
        MnHeader::Olympus,
        true,
    ))
}

fn probe_om_system(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() < OM_SYSTEM_SIG.len() + MIN_IFD_NEXT || &data[..14] != &OM_SYSTEM_SIG[..14] {
        return None;
    }
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Olympus2,
        MnHeader::OmSystem,
        true,
    ))
}

fn probe_fuji(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() < FUJI_SIG.len() + MIN_IFD_NEXT || &data[..8] != &FUJI_SIG[..8] {
        return None;
    }
    // The IFD offset lives at byte 8, always little-endian.
    let start = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Fuji,
        MnHeader::Fuji { start },
        true,
    ))
}

fn probe_nikon(tag: u16, group: IfdId, data: &[u8], bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() >= 6 && &data[..6] == b"Nikon\0" {
        match data.get(6) {
            Some(0x02) => {
                // Format 3: embedded TIFF header at byte 10.
                if data.len() < NIKON3_SIG.len() + MIN_IFD_NEXT {
                    return None;
                }
                let th = crate::header::TiffHeader::read(
                    &data[10..],
                    crate::header::HeaderFormat::Standard,
                )
                .ok()?;
                return Some(IfdMakernote::new(
                    tag,
                    group,
                    IfdId::Nikon3,
                    MnHeader::Nikon3 {
                        byte_order: Some(th.byte_order),
                        start: 10 + th.offset,
                    },
                    true,
                ));
            }
            _ => {
                // Format 2: short header, outer byte order.
                if data.len() < NIKON2_SIG.len() + MIN_IFD_NEXT {
                    return None;
                }
                return Some(IfdMakernote::new(
                    tag,
                    group,
                    IfdId::Nikon2,
                    MnHeader::Nikon2,
                    true,
                ));
            }
        }
    }
    // Format 1: no header, plain IFD.
    let _ = bo;
    probe_bare(tag, group, data, IfdId::Nikon1)
}

fn probe_panasonic(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    // Panasonic makernote IFDs have no next pointer.
    if data.len() < PANASONIC_SIG.len() + MIN_IFD || &data[..9] != &PANASONIC_SIG[..9] {
        return None;
    }
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Panasonic,
        MnHeader::Panasonic,
        false,
    ))
}

fn probe_pentax(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() >= 7 && &data[..7] == &PENTAX_DNG_SIG[..7] {
        if data.len() < PENTAX_DNG_SIG.len() + MIN_IFD_NEXT {
            return None;
        }
        return Some(IfdMakernote::new(
            tag,
            group,
            IfdId::PentaxDng,
            MnHeader::PentaxDng,
            true,
        ));
    }
    if data.len() < PENTAX_SIG.len() + MIN_IFD_NEXT || &data[..3] != &PENTAX_SIG[..3] {
        return None;
    }
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Pentax,
        MnHeader::Pentax,
        true,
    ))
}

fn probe_samsung(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() < MIN_IFD {
        return None;
    }
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Samsung2,
        MnHeader::Samsung,
        true,
    ))
}

fn probe_sigma(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() < SIGMA_SIG1.len() + MIN_IFD_NEXT {
        return None;
    }
    let foveon = if &data[..8] == &SIGMA_SIG2[..8] {
        true
    } else if &data[..8] == &SIGMA_SIG1[..8] {
        false
    } else {
        return None;
    };
    Some(IfdMakernote::new(
        tag,
        group,
        IfdId::Sigma,
        MnHeader::Sigma { foveon },
        true,
    ))
}

fn probe_sony(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() >= SONY_SIG.len() && &data[..SONY_SIG.len()] == SONY_SIG {
        if data.len() < SONY_SIG.len() + MIN_IFD {
            return None;
        }
        // Sony1 makernote IFDs have no next pointer.
        return Some(IfdMakernote::new(
            tag,
            group,
            IfdId::Sony1,
            MnHeader::Sony,
            false,
        ));
    }
    // DSLR models store a bare IFD.
    probe_bare(tag, group, data, IfdId::Sony2)
}

fn probe_casio(tag: u16, group: IfdId, data: &[u8], _bo: ByteOrder) -> Option<IfdMakernote> {
    if data.len() >= CASIO2_SIG.len() && &data[..CASIO2_SIG.len()] == CASIO2_SIG {
        if data.len() < CASIO2_SIG.len() + MIN_IFD_NEXT {
            return None;
        }
        return Some(IfdMakernote::new(
            tag,
            group,
            IfdId::Casio2,
            MnHeader::Casio2,
            true,
        ));
    }
    probe_bare(tag, group, data, IfdId::Casio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exifkit_tags::exif::tags;

    fn mn(make: &str, data: &[u8]) -> Option<IfdMakernote> {
        identify(
            tags::MAKER_NOTE,
            IfdId::ExifIfd,
            make,
            data,
            ByteOrder::Little,
        )
    }

    #[test]
    fn canon_is_a_bare_ifd() {
        let data = vec![0u8; 32];
        let m = mn("Canon", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Canon);
        assert_eq!(m.header.size(), 0);
        assert_eq!(m.base_offset(), 0);
    }

    #[test]
    fn nikon3_reads_embedded_header() {
        let mut data = NIKON3_SIG[..10].to_vec();
        data.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
        data.extend_from_slice(&[0u8; 24]);
        let mut m = mn("NIKON CORPORATION", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Nikon3);
        assert_eq!(m.byte_order(), Some(ByteOrder::Big));
        assert_eq!(m.header.ifd_offset(), 18);
        m.mn_offset = 100;
        assert_eq!(m.base_offset(), 110);
    }

    #[test]
    fn nikon_without_signature_is_format1() {
        let data = vec![0u8; 32];
        let m = mn("NIKON", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Nikon1);
    }

    #[test]
    fn olympus_v2_uses_makernote_base() {
        let mut data = OLYMPUS2_SIG.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        let mut m = mn("OLYMPUS IMAGING CORP.", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Olympus2);
        m.mn_offset = 0x400;
        assert_eq!(m.base_offset(), 0x400);
    }

    #[test]
    fn fuji_forces_little_endian() {
        let mut data = FUJI_SIG.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        let m = mn("FUJIFILM", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Fuji);
        assert_eq!(m.header.byte_order(), Some(ByteOrder::Little));
        assert_eq!(m.header.ifd_offset(), 12);
    }

    #[test]
    fn sony_header_variant_has_no_next_pointer() {
        let mut data = SONY_SIG.to_vec();
        data.extend_from_slice(&[0u8; 20]);
        let m = mn("SONY", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Sony1);
        assert!(!m.ifd.has_next);
    }

    #[test]
    fn too_small_blob_stays_opaque() {
        assert!(mn("Canon", &[0u8; 8]).is_none());
        assert!(mn("OLYMPUS", b"OLYMP\0\x01\x00tiny").is_none());
    }

    #[test]
    fn unknown_make_stays_opaque() {
        assert!(mn("Acme Cameras", &[0u8; 64]).is_none());
    }

    #[test]
    fn casio_qvc_forces_big_endian() {
        let mut data = CASIO2_SIG.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        let m = mn("CASIO COMPUTER CO.,LTD.", &data).unwrap();
        assert_eq!(m.mn_group, IfdId::Casio2);
        assert_eq!(m.header.byte_order(), Some(ByteOrder::Big));
    }
}
