//! Binary-array sub-parser.
//!
//! Several makernote entries are opaque `Undefined` blobs that are
//! really fixed-layout records: Canon CameraSettings, Nikon ShotInfo,
//! Sony CameraSettings and friends. A [`ArrayCfg`] describes how to
//! split such an entry into [`BinaryElement`]s: the element step, an
//! optional size prefix, an optional cipher and the treatment of gaps
//! between defined fields.
//!
//! Complex arrays carry several candidate configurations in an
//! [`ArraySet`] table; a selector function inspects the bytes (usually
//! a version prefix, sometimes the total size) and picks the row.
//!
//! [`BinaryElement`]: crate::node::BinaryElement

use crate::node::{BinaryArray, BinaryElement, EntryData, TiffNode};
use crate::writer::WriteCtx;
use exifkit_core::{ByteOrder, Error, Result, TypeId, Value};
use exifkit_tags::{exif::tags, IfdId};
use tracing::{trace, warn};

/// Selects the configuration row for a complex array from the entry's
/// raw bytes, or `None` to leave the entry undecoded.
pub type CfgSelFn = fn(u16, &[u8]) -> Option<usize>;

/// One named field of a binary array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayDef {
    /// Byte offset of the field from the start of the array.
    pub idx: usize,
    pub type_id: TypeId,
    pub count: usize,
}

impl ArrayDef {
    pub const fn new(idx: usize, type_id: TypeId, count: usize) -> Self {
        Self {
            idx,
            type_id,
            count,
        }
    }

    /// Size of the field in bytes.
    pub fn size(&self) -> usize {
        self.count * self.type_id.size()
    }
}

impl Default for ArrayDef {
    fn default() -> Self {
        Self::new(0, TypeId::Undefined, 1)
    }
}

/// Cipher applied to an array's raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crypt {
    /// Nikon xlat-table XOR stream keyed by serial number and shutter
    /// count, applied from `start` to the end of the array.
    Nikon { start: usize },
}

/// Configuration of one binary-array layout.
#[derive(Debug)]
pub struct ArrayCfg {
    /// Group of the child elements.
    pub group: IfdId,
    /// Byte order override; `None` inherits the enclosing IFD's.
    pub byte_order: Option<ByteOrder>,
    /// Type of the array entry and of the size prefix, if any.
    pub el_type: TypeId,
    pub crypt: Option<Crypt>,
    /// Whether the first element is a size prefix.
    pub has_size: bool,
    /// Whether the write pads the array out to the last defined field.
    pub has_fillers: bool,
    /// Whether gaps between defined fields merge into single elements.
    pub concat_gaps: bool,
    /// Layout of elements without an [`ArrayDef`] row.
    pub el_default: ArrayDef,
}

impl ArrayCfg {
    /// Bytes per element tag: element tags are `byte offset / step`.
    pub fn tag_step(&self) -> usize {
        self.el_default.size().max(1)
    }
}

/// A configuration with its field table; complex arrays have several.
#[derive(Debug)]
pub struct ArraySet {
    pub cfg: ArrayCfg,
    pub defs: &'static [ArrayDef],
}

const fn cfg(
    group: IfdId,
    byte_order: Option<ByteOrder>,
    el_type: TypeId,
    crypt: Option<Crypt>,
    has_size: bool,
    has_fillers: bool,
    concat_gaps: bool,
    el_default: ArrayDef,
) -> ArrayCfg {
    ArrayCfg {
        group,
        byte_order,
        el_type,
        crypt,
        has_size,
        has_fillers,
        concat_gaps,
        el_default,
    }
}

const U16_EL: ArrayDef = ArrayDef::new(0, TypeId::UnsignedShort, 1);
const U8_EL: ArrayDef = ArrayDef::new(0, TypeId::UnsignedByte, 1);

/// Canon CameraSettings (0x0001): u16 fields behind a size prefix; the
/// lens description spans three shorts.
pub static CANON_CS_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::CanonCs,
        None,
        TypeId::UnsignedShort,
        None,
        true,
        false,
        false,
        U16_EL,
    ),
    defs: &[ArrayDef::new(46, TypeId::UnsignedShort, 3)],
}];

/// Canon ShotInfo (0x0004).
pub static CANON_SI_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::CanonSi,
        None,
        TypeId::UnsignedShort,
        None,
        true,
        false,
        false,
        U16_EL,
    ),
    defs: &[],
}];

/// Canon Panorama (0x0005), no size prefix.
pub static CANON_PA_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::CanonPa,
        None,
        TypeId::UnsignedShort,
        None,
        false,
        false,
        false,
        U16_EL,
    ),
    defs: &[],
}];

/// Canon FileInfo (0x0093).
pub static CANON_FI_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::CanonFi,
        None,
        TypeId::UnsignedShort,
        None,
        true,
        false,
        false,
        U16_EL,
    ),
    defs: &[],
}];

/// Nikon VRInfo (0x001F): version bytes then u8 flags.
pub static NIKON_VR_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::NikonVr,
        None,
        TypeId::Undefined,
        None,
        false,
        false,
        false,
        U8_EL,
    ),
    defs: &[ArrayDef::new(0, TypeId::Undefined, 4)],
}];

/// Nikon PictureControl (0x0023): version plus two fixed-width names.
pub static NIKON_PC_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::NikonPc,
        None,
        TypeId::Undefined,
        None,
        false,
        true,
        true,
        U8_EL,
    ),
    defs: &[
        ArrayDef::new(0, TypeId::Undefined, 4),
        ArrayDef::new(4, TypeId::AsciiString, 20),
        ArrayDef::new(24, TypeId::AsciiString, 20),
        ArrayDef::new(48, TypeId::UnsignedByte, 1),
        ArrayDef::new(49, TypeId::UnsignedByte, 1),
    ],
}];

/// Nikon WorldTime (0x0024).
pub static NIKON_WT_SET: &[ArraySet] = &[ArraySet {
    cfg: cfg(
        IfdId::NikonWt,
        None,
        TypeId::Undefined,
        None,
        false,
        false,
        false,
        U8_EL,
    ),
    defs: &[
        ArrayDef::new(0, TypeId::SignedShort, 1),
        ArrayDef::new(2, TypeId::UnsignedByte, 1),
        ArrayDef::new(3, TypeId::UnsignedByte, 1),
    ],
}];

const VERSION_DEF: &[ArrayDef] = &[ArrayDef::new(0, TypeId::Undefined, 4)];

/// Nikon ShotInfo (0x0091): layout and cipher depend on the version
/// prefix; the enciphered region starts after the version bytes.
pub static NIKON_SI_SET: &[ArraySet] = &[
    ArraySet {
        cfg: cfg(
            IfdId::NikonSi1,
            None,
            TypeId::Undefined,
            None,
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
    ArraySet {
        cfg: cfg(
            IfdId::NikonSi2,
            None,
            TypeId::Undefined,
            Some(Crypt::Nikon { start: 4 }),
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
    ArraySet {
        cfg: cfg(
            IfdId::NikonSi2,
            None,
            TypeId::Undefined,
            Some(Crypt::Nikon { start: 4 }),
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
];

/// Select the Nikon ShotInfo row by version prefix and total size.
pub fn nikon_si_selector(_tag: u16, data: &[u8]) -> Option<usize> {
    let version = data.get(0..4)?;
    match (version, data.len()) {
        (b"0208", 4160) => Some(1),
        (b"0210", 5291) => Some(2),
        (v, _) if v.starts_with(b"01") => Some(0),
        _ => None,
    }
}

/// Nikon ColorBalance (0x0097).
pub static NIKON_CB_SET: &[ArraySet] = &[
    ArraySet {
        cfg: cfg(
            IfdId::NikonCb1,
            None,
            TypeId::Undefined,
            None,
            false,
            false,
            false,
            U16_EL,
        ),
        defs: VERSION_DEF,
    },
    ArraySet {
        cfg: cfg(
            IfdId::NikonCb2,
            None,
            TypeId::Undefined,
            Some(Crypt::Nikon { start: 4 }),
            false,
            false,
            false,
            U16_EL,
        ),
        defs: VERSION_DEF,
    },
];

/// Select the Nikon ColorBalance row by version prefix.
pub fn nikon_cb_selector(_tag: u16, data: &[u8]) -> Option<usize> {
    let version = data.get(0..4)?;
    if version.starts_with(b"01") {
        Some(0)
    } else if version.starts_with(b"02") {
        Some(1)
    } else {
        None
    }
}

/// Nikon LensData (0x0098): enciphered from version 0201 on.
pub static NIKON_LD_SET: &[ArraySet] = &[
    ArraySet {
        cfg: cfg(
            IfdId::NikonLd1,
            None,
            TypeId::Undefined,
            None,
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
    ArraySet {
        cfg: cfg(
            IfdId::NikonLd2,
            None,
            TypeId::Undefined,
            None,
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
    ArraySet {
        cfg: cfg(
            IfdId::NikonLd3,
            None,
            TypeId::Undefined,
            Some(Crypt::Nikon { start: 4 }),
            false,
            false,
            false,
            U8_EL,
        ),
        defs: VERSION_DEF,
    },
];

/// Select the Nikon LensData row by version prefix.
pub fn nikon_ld_selector(_tag: u16, data: &[u8]) -> Option<usize> {
    let version = data.get(0..4)?;
    match version {
        b"0100" => Some(0),
        b"0101" => Some(1),
        v if v >= b"0201".as_slice() && v.iter().all(u8::is_ascii_digit) => Some(2),
        _ => None,
    }
}

/// Sony CameraSettings (0x0114): big-endian u16 fields, layout selected
/// by the total size of the record.
pub static SONY_CS_SET: &[ArraySet] = &[
    ArraySet {
        cfg: cfg(
            IfdId::SonyCs1,
            Some(ByteOrder::Big),
            TypeId::UnsignedShort,
            None,
            false,
            false,
            false,
            U16_EL,
        ),
        defs: &[],
    },
    ArraySet {
        cfg: cfg(
            IfdId::SonyCs2,
            Some(ByteOrder::Big),
            TypeId::UnsignedShort,
            None,
            false,
            false,
            false,
            U16_EL,
        ),
        defs: &[],
    },
];

/// Select the Sony CameraSettings row by record size.
pub fn sony_cs_selector(_tag: u16, data: &[u8]) -> Option<usize> {
    match data.len() {
        280 => Some(0),
        364 => Some(1),
        _ => None,
    }
}

/// Cipher keys `(shutter count, serial)` from the enclosing tree.
pub fn nikon_crypt_keys(root: &TiffNode) -> Option<(u32, u32)> {
    let count = root
        .find(tags::NIKON_SHUTTER_COUNT, IfdId::Nikon3)?
        .entry_data()?
        .value
        .as_ref()?
        .as_u32()?;
    let serial_node = root.find(tags::NIKON_SERIAL_NUMBER, IfdId::Nikon3)?;
    let serial_str = serial_node.entry_data()?.value.as_ref()?.as_str()?;
    let digits: String = serial_str.chars().take_while(char::is_ascii_digit).collect();
    let serial = digits.parse().unwrap_or(0);
    Some((count, serial))
}

/// Nikon XOR stream cipher. The stream depends only on the keys, so
/// enciphering is the same operation as deciphering.
pub fn nikon_crypt(data: &mut [u8], count: u32, serial: u32) {
    let mut key = 0u8;
    for i in 0..4 {
        key ^= ((count >> (i * 8)) & 0xFF) as u8;
    }
    let ci = XLAT[0][(serial & 0xFF) as usize];
    let mut cj = XLAT[1][usize::from(key)];
    let mut ck = 0x60u8;
    for b in data.iter_mut() {
        cj = cj.wrapping_add(ci.wrapping_mul(ck));
        ck = ck.wrapping_add(1);
        *b ^= cj;
    }
}

/// Decompose a binary array entry into its elements. Runs as a
/// post-processing pass once the whole tree is available, because the
/// cipher keys live in sibling entries that may follow the array;
/// `crypt_keys` are the keys harvested from the tree, if any.
pub fn decode_array(
    arr: &mut BinaryArray,
    crypt_keys: Option<(u32, u32)>,
    outer_bo: ByteOrder,
) -> Result<()> {
    if arr.decoded {
        return Ok(());
    }
    if arr.cfg_idx.is_none() {
        let Some(sel) = arr.sel else { return Ok(()) };
        arr.cfg_idx = sel(arr.entry.tag, &arr.entry.data);
        if arr.cfg_idx.is_none() {
            // Unknown variant: the entry stays opaque.
            trace!(tag = arr.entry.tag, "binary array variant not recognized");
            return Ok(());
        }
    }
    let Some(cfg) = arr.cfg() else { return Ok(()) };
    let size = arr.entry.data.len();
    if size == 0 {
        return Ok(());
    }
    let bo = cfg.byte_order.unwrap_or(outer_bo);

    if let Some(Crypt::Nikon { start }) = cfg.crypt {
        match crypt_keys {
            Some((count, serial)) if start < size => {
                nikon_crypt(&mut arr.entry.data[start..], count, serial);
                arr.crypt_keys = Some((count, serial));
            }
            _ => {
                // Without keys the structure is still split, the field
                // values just stay enciphered.
                warn!(tag = arr.entry.tag, "cipher keys not found, array left enciphered");
            }
        }
    }

    let step = cfg.tag_step();
    let group = cfg.group;
    let defs = arr.defs();
    if let Some(w) = defs.windows(2).find(|w| w[0].idx + w[0].size() > w[1].idx) {
        return Err(Error::corrupted(format!(
            "overlapping binary array fields at offset {}",
            w[1].idx
        )));
    }

    if cfg.has_size {
        let declared = Value::read(cfg.el_type, &arr.entry.data, 1, bo)
            .ok()
            .and_then(|v| v.u32_at(0))
            .unwrap_or(0);
        if declared as usize != size {
            trace!(
                tag = arr.entry.tag,
                declared,
                actual = size,
                "binary array size prefix differs from entry size"
            );
        }
    }

    let mut elements = Vec::new();
    let mut pos = 0usize;
    let mut idx_no = 0u32;
    while pos < size {
        let def = match defs.iter().find(|d| d.idx == pos) {
            Some(d) => *d,
            None if cfg.concat_gaps => {
                // Merge the gap up to the next defined field into one
                // element.
                let next = defs
                    .iter()
                    .map(|d| d.idx)
                    .filter(|&i| i > pos)
                    .min()
                    .unwrap_or(size);
                ArrayDef::new(pos, cfg.el_default.type_id, (next - pos) / cfg.el_default.type_id.size().max(1))
            }
            None => ArrayDef::new(pos, cfg.el_default.type_id, cfg.el_default.count),
        };
        let el_size = def.size().max(1).min(size - pos);
        let count = el_size / def.type_id.size().max(1);
        let tag = (pos / step) as u16;
        let mut entry = EntryData::new(tag, group, def.type_id);
        entry.data = arr.entry.data[pos..pos + el_size].to_vec();
        entry.idx = idx_no;
        entry.value = Value::read(def.type_id, &entry.data, count, bo).ok();
        elements.push(TiffNode::BinaryElement(BinaryElement { entry, def }));
        idx_no += 1;
        pos += def.size().max(1);
    }
    arr.elements = elements;
    arr.decoded = true;
    Ok(())
}

/// Serialize a decoded array: elements in tag order, gaps zero-filled,
/// optional size prefix and trailing fillers, the whole buffer
/// re-enciphered when the configuration has a cipher.
pub fn write_array(arr: &mut BinaryArray, ctx: &mut WriteCtx, outer_bo: ByteOrder) -> Result<usize> {
    let Some(cfg) = arr.cfg() else {
        ctx.write(&arr.entry.data);
        return Ok(arr.entry.data.len());
    };
    let bo = cfg.byte_order.unwrap_or(outer_bo);
    arr.elements.sort_by_key(TiffNode::tag);

    let mut mio: Vec<u8> = Vec::with_capacity(arr.entry.data.len());
    if cfg.has_size {
        let total = arr.array_size();
        match cfg.el_type.size() {
            2 => mio.extend_from_slice(
                &bo.write_u16(u16::try_from(total).map_err(|_| Error::OffsetOutOfRange)?),
            ),
            4 => mio.extend_from_slice(
                &bo.write_u32(u32::try_from(total).map_err(|_| Error::OffsetOutOfRange)?),
            ),
            _ => {}
        }
    }
    let step = cfg.tag_step();
    for el in &arr.elements {
        // The manufactured size element is rebuilt above.
        if cfg.has_size && el.tag() == 0 {
            continue;
        }
        let new_idx = usize::from(el.tag()) * step;
        if new_idx > mio.len() {
            mio.resize(new_idx, 0);
        }
        let Some(e) = el.entry_data() else { continue };
        mio.extend_from_slice(&e.data);
    }
    if cfg.has_fillers {
        if let Some(last) = arr.defs().last() {
            let end = last.idx + last.size();
            if end > mio.len() {
                mio.resize(end, 0);
            }
        }
    }

    if let Some(Crypt::Nikon { start }) = cfg.crypt {
        if let Some((count, serial)) = arr.crypt_keys {
            if start < mio.len() {
                nikon_crypt(&mut mio[start..], count, serial);
            }
        }
    }

    ctx.write(&mio);
    Ok(mio.len())
}

/// Nikon xlat cipher tables.
#[rustfmt::skip]
static XLAT: [[u8; 256]; 2] = [
    [
        0xc1, 0xbf, 0x6d, 0x0d, 0x59, 0xc5, 0x13, 0x9d, 0x83, 0x61, 0x6b, 0x4f, 0xc7, 0x7f, 0x3d, 0x3d,
        0x53, 0x59, 0xe3, 0xc7, 0xe9, 0x2f, 0x95, 0xa7, 0x95, 0x1f, 0xdf, 0x7f, 0x2b, 0x29, 0xc7, 0x0d,
        0xdf, 0x07, 0xef, 0x71, 0x89, 0x3d, 0x13, 0x3d, 0x3b, 0x13, 0xfb, 0x0d, 0x89, 0xc1, 0x65, 0x1f,
        0xb3, 0x0d, 0x6b, 0x29, 0xe3, 0xfb, 0xef, 0xa3, 0x6b, 0x47, 0x7f, 0x95, 0x35, 0xa7, 0x47, 0x4f,
        0xc7, 0xf1, 0x59, 0x95, 0x35, 0x11, 0x29, 0x61, 0xf1, 0x3d, 0xb3, 0x2b, 0x0d, 0x43, 0x89, 0xc1,
        0x9d, 0x9d, 0x89, 0x65, 0xf1, 0xe9, 0xdf, 0xbf, 0x3d, 0x7f, 0x53, 0x97, 0xe5, 0xe9, 0x95, 0x17,
        0x1d, 0x3d, 0x8b, 0xfb, 0xc7, 0xe3, 0x67, 0xa7, 0x07, 0xf1, 0x71, 0xa7, 0x53, 0xb5, 0x29, 0x89,
        0xe5, 0x2b, 0xa7, 0x17, 0x29, 0xe9, 0x4f, 0xc5, 0x65, 0x6d, 0x6b, 0xef, 0x0d, 0x89, 0x49, 0x2f,
        0xb3, 0x43, 0x53, 0x65, 0x1d, 0x49, 0xa3, 0x13, 0x89, 0x59, 0xef, 0x6b, 0xef, 0x65, 0x1d, 0x0b,
        0x59, 0x13, 0xe3, 0x4f, 0x9d, 0xb3, 0x29, 0x43, 0x2b, 0x07, 0x1d, 0x95, 0x59, 0x59, 0x47, 0xfb,
        0xe5, 0xe9, 0x61, 0x47, 0x2f, 0x35, 0x7f, 0x17, 0x7f, 0xef, 0x7f, 0x95, 0x95, 0x71, 0xd3, 0xa3,
        0x0b, 0x71, 0xa3, 0xad, 0x0b, 0x3b, 0xb5, 0xfb, 0xa3, 0xbf, 0x4f, 0x83, 0x1d, 0xad, 0xe9, 0x2f,
        0x71, 0x65, 0xa3, 0xe5, 0x07, 0x35, 0x3d, 0x0d, 0xb5, 0xe9, 0xe5, 0x47, 0x3b, 0x9d, 0xef, 0x35,
        0xa3, 0xbf, 0xb3, 0xdf, 0x53, 0xd3, 0x97, 0x53, 0x49, 0x71, 0x07, 0x35, 0x61, 0x71, 0x2f, 0x43,
        0x2f, 0x11, 0xdf, 0x17, 0x97, 0xfb, 0x95, 0x3b, 0x7f, 0x6b, 0xd3, 0x25, 0xbf, 0xad, 0xc7, 0xc5,
        0xc5, 0xb5, 0x8b, 0xef, 0x2f, 0xd3, 0x07, 0x6b, 0x25, 0x49, 0x95, 0x25, 0x49, 0x6d, 0x71, 0xc7,
    ],
    [
        0xa7, 0xbc, 0xc9, 0xad, 0x91, 0xdf, 0x85, 0xe5, 0xd4, 0x78, 0xd5, 0x17, 0x46, 0x7c, 0x29, 0x4c,
        0x4d, 0x03, 0xe9, 0x25, 0x68, 0x11, 0x86, 0xb3, 0xbd, 0xf7, 0x6f, 0x61, 0x22, 0xa2, 0x26, 0x34,
        0x2a, 0xbe, 0x1e, 0x46, 0x14, 0x68, 0x9d, 0x44, 0x18, 0xc2, 0x40, 0xf4, 0x7e, 0x5f, 0x1b, 0xad,
        0x0b, 0x94, 0xb6, 0x67, 0xb4, 0x0b, 0xe1, 0xea, 0x95, 0x9c, 0x66, 0xdc, 0xe7, 0x5d, 0x6c, 0x05,
        0xda, 0xd5, 0xdf, 0x7a, 0xef, 0xf6, 0xdb, 0x1f, 0x82, 0x4c, 0xc0, 0x68, 0x47, 0xa1, 0xbd, 0xee,
        0x39, 0x50, 0x56, 0x4a, 0xdd, 0xdf, 0xa5, 0xf8, 0xc6, 0xda, 0xca, 0x90, 0xca, 0x01, 0x42, 0x9d,
        0x8b, 0x0c, 0x73, 0x43, 0x75, 0x05, 0x94, 0xde, 0x24, 0xb3, 0x80, 0x34, 0xe5, 0x2c, 0xdc, 0x9b,
        0x3f, 0xca, 0x33, 0x45, 0xd0, 0xdb, 0x5f, 0xf5, 0x52, 0xc3, 0x21, 0xda, 0xe2, 0x22, 0x72, 0x6b,
        0x3e, 0xd0, 0x5b, 0xa8, 0x87, 0x8c, 0x06, 0x5d, 0x0f, 0xdd, 0x09, 0x19, 0x93, 0xd0, 0xb9, 0xfc,
        0x8b, 0x0f, 0x84, 0x60, 0x33, 0x1c, 0x9b, 0x45, 0xf1, 0xf0, 0xa3, 0x94, 0x3a, 0x12, 0x77, 0x33,
        0x4d, 0x44, 0x78, 0x28, 0x3c, 0x9e, 0xfd, 0x65, 0x57, 0x16, 0x94, 0x6b, 0xfb, 0x59, 0xd0, 0xc8,
        0x22, 0x36, 0xdb, 0xd2, 0x63, 0x98, 0x43, 0xa1, 0x04, 0x87, 0x86, 0xf7, 0xa6, 0x26, 0xbb, 0xd6,
        0x59, 0x4d, 0xbf, 0x6a, 0x2e, 0xaa, 0x2b, 0xef, 0xe6, 0x78, 0xb6, 0x4e, 0xe0, 0x2f, 0xdc, 0x7c,
        0xbe, 0x57, 0x19, 0x32, 0x7e, 0x2a, 0xd0, 0xb8, 0xba, 0x29, 0x00, 0x3c, 0x52, 0x7d, 0xa8, 0x49,
        0x3b, 0x2d, 0xeb, 0x25, 0x49, 0xfa, 0xa3, 0xaa, 0x39, 0xa7, 0xc5, 0xa7, 0x50, 0x11, 0x36, 0xfb,
        0xc6, 0x67, 0x4a, 0xf5, 0xa5, 0x12, 0x65, 0x7e, 0xb0, 0xdf, 0xaf, 0x4e, 0xb3, 0x61, 0x7f, 0x2f,
    ],
];
