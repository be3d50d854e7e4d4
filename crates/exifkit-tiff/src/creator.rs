//! Node and path construction tables.
//!
//! Two static tables drive tree building:
//!
//! - the *tree table* maps a group to its parent position `(parent
//!   extended tag, parent group)` and is walked leaf-to-root by
//!   [`get_path`];
//! - the *factory table* maps `(extended tag, group)` to the node kind
//!   [`create`] produces; a lookup miss produces a plain entry.
//!
//! The `ALL` synthetic tag acts as a wildcard for any tag of a group
//! without a more specific row.

use crate::array;
use crate::node::{
    BinaryArray, DataEntry, Directory, EntryData, MnEntry, SizeEntry, SubIfd, TiffNode,
};
use crate::path::{ext, PathItem, TiffPath};
use exifkit_core::TypeId;
use exifkit_tags::{exif::tags, IfdId};

/// One row of the tree table: where a group hangs in the composite
/// tree under a given root.
struct TreeRow {
    root: u32,
    group: IfdId,
    parent_ext: u32,
    parent_group: IfdId,
}

const fn t(root: u32, group: IfdId, parent_ext: u32, parent_group: IfdId) -> TreeRow {
    TreeRow {
        root,
        group,
        parent_ext,
        parent_group,
    }
}

#[rustfmt::skip]
static TREE_TABLE: &[TreeRow] = &[
    // Standard TIFF root.
    t(ext::ROOT, IfdId::Ifd0,      ext::ROOT,   IfdId::Ifd0),
    t(ext::ROOT, IfdId::Ifd1,      ext::NEXT,   IfdId::Ifd0),
    t(ext::ROOT, IfdId::Ifd2,      ext::NEXT,   IfdId::Ifd1),
    t(ext::ROOT, IfdId::Ifd3,      ext::NEXT,   IfdId::Ifd2),
    t(ext::ROOT, IfdId::ExifIfd,   0x8769,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::GpsIfd,    0x8825,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::IopIfd,    0xA005,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::SubImage1, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage2, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage3, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage4, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage5, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage6, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage7, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage8, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubImage9, 0x014A,      IfdId::Ifd0),
    t(ext::ROOT, IfdId::SubThumb1, 0x014A,      IfdId::Ifd1),
    // Makernote groups hang off the MakerNote tag in the Exif IFD.
    t(ext::ROOT, IfdId::MakerNote, 0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Canon,     0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Nikon1,    0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Nikon2,    0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Nikon3,    0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Olympus,   0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Olympus2,  0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::OmSystem,  0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Fuji,      0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Pentax,    0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::PentaxDng, 0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Samsung2,  0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Sigma,     0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Sony1,     0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Sony2,     0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Panasonic, 0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Casio,     0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Casio2,    0x927C,      IfdId::ExifIfd),
    t(ext::ROOT, IfdId::Minolta,   0x927C,      IfdId::ExifIfd),
    // Binary-array element groups.
    t(ext::ROOT, IfdId::CanonCs,   0x0001,      IfdId::Canon),
    t(ext::ROOT, IfdId::CanonSi,   0x0004,      IfdId::Canon),
    t(ext::ROOT, IfdId::CanonPa,   0x0005,      IfdId::Canon),
    t(ext::ROOT, IfdId::CanonFi,   0x0093,      IfdId::Canon),
    t(ext::ROOT, IfdId::NikonVr,   0x001F,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonPc,   0x0023,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonWt,   0x0024,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonSi1,  0x0091,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonSi2,  0x0091,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonCb1,  0x0097,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonCb2,  0x0097,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonLd1,  0x0098,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonLd2,  0x0098,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::NikonLd3,  0x0098,      IfdId::Nikon3),
    t(ext::ROOT, IfdId::OlympusEq, 0x2010,      IfdId::Olympus2),
    t(ext::ROOT, IfdId::OlympusCs, 0x2020,      IfdId::Olympus2),
    t(ext::ROOT, IfdId::SonyCs1,   0x0114,      IfdId::Sony1),
    t(ext::ROOT, IfdId::SonyCs2,   0x0114,      IfdId::Sony1),
    // Panasonic RW2 root: the PanaRaw IFD replaces IFD0.
    t(ext::PANA, IfdId::PanaRaw,   ext::PANA,   IfdId::PanaRaw),
    t(ext::PANA, IfdId::ExifIfd,   0x8769,      IfdId::PanaRaw),
    t(ext::PANA, IfdId::GpsIfd,    0x8825,      IfdId::PanaRaw),
    t(ext::PANA, IfdId::IopIfd,    0xA005,      IfdId::ExifIfd),
];

/// Build the path from `root` down to `(ext_tag, group)`, top of stack
/// being the root step.
pub fn get_path(ext_tag: u32, group: IfdId, root: u32) -> TiffPath {
    let mut path = TiffPath::new();
    let mut ext_tag = ext_tag;
    let mut group = group;
    loop {
        path.push(PathItem::new(ext_tag, group));
        if ext_tag == root {
            break;
        }
        let row = TREE_TABLE
            .iter()
            .find(|r| r.root == root && r.group == group)
            .or_else(|| {
                // Vendor sub-trees are shared between roots.
                TREE_TABLE
                    .iter()
                    .find(|r| r.root == ext::ROOT && r.group == group)
            });
        match row {
            Some(r) => {
                ext_tag = r.parent_ext;
                group = r.parent_group;
            }
            None => {
                // Unknown group: hang it directly off the root IFD.
                ext_tag = root;
                group = if root == ext::PANA {
                    IfdId::PanaRaw
                } else {
                    IfdId::Ifd0
                };
            }
        }
    }
    path
}

/// Node kind produced for a factory row.
enum Factory {
    Directory(IfdId),
    SubIfd(IfdId),
    DataEntry { size_tag: u16 },
    SizeEntry { data_tag: u16 },
    ImageEntry { size_tag: u16 },
    ImageSize { data_tag: u16 },
    MnEntry,
    BinaryArray(&'static [array::ArraySet], Option<array::CfgSelFn>),
}

struct FactoryRow {
    ext_tag: u32,
    group: IfdId,
    factory: Factory,
}

const fn f(ext_tag: u32, group: IfdId, factory: Factory) -> FactoryRow {
    FactoryRow {
        ext_tag,
        group,
        factory,
    }
}

fn factory_table() -> &'static [FactoryRow] {
    use Factory as F;
    static TABLE: std::sync::OnceLock<Vec<FactoryRow>> = std::sync::OnceLock::new();
    TABLE.get_or_init(|| {
        let mut rows = vec![
            f(ext::NEXT, IfdId::Ifd0, F::Directory(IfdId::Ifd1)),
            f(ext::NEXT, IfdId::Ifd1, F::Directory(IfdId::Ifd2)),
            f(ext::NEXT, IfdId::Ifd2, F::Directory(IfdId::Ifd3)),
            f(0x8769, IfdId::Ifd0, F::SubIfd(IfdId::ExifIfd)),
            f(0x8825, IfdId::Ifd0, F::SubIfd(IfdId::GpsIfd)),
            f(0x8769, IfdId::PanaRaw, F::SubIfd(IfdId::ExifIfd)),
            f(0x8825, IfdId::PanaRaw, F::SubIfd(IfdId::GpsIfd)),
            f(0xA005, IfdId::ExifIfd, F::SubIfd(IfdId::IopIfd)),
            f(0x014A, IfdId::Ifd0, F::SubIfd(IfdId::SubImage1)),
            f(0x014A, IfdId::Ifd1, F::SubIfd(IfdId::SubThumb1)),
            f(0x0201, IfdId::Ifd1, F::DataEntry { size_tag: 0x0202 }),
            f(0x0202, IfdId::Ifd1, F::SizeEntry { data_tag: 0x0201 }),
            f(0x0201, IfdId::SubThumb1, F::DataEntry { size_tag: 0x0202 }),
            f(0x0202, IfdId::SubThumb1, F::SizeEntry { data_tag: 0x0201 }),
            f(u32::from(tags::MAKER_NOTE), IfdId::ExifIfd, F::MnEntry),
            f(0x2010, IfdId::Olympus2, F::SubIfd(IfdId::OlympusEq)),
            f(0x2020, IfdId::Olympus2, F::SubIfd(IfdId::OlympusCs)),
            f(0x0001, IfdId::Canon, F::BinaryArray(array::CANON_CS_SET, None)),
            f(0x0004, IfdId::Canon, F::BinaryArray(array::CANON_SI_SET, None)),
            f(0x0005, IfdId::Canon, F::BinaryArray(array::CANON_PA_SET, None)),
            f(0x0093, IfdId::Canon, F::BinaryArray(array::CANON_FI_SET, None)),
            f(0x001F, IfdId::Nikon3, F::BinaryArray(array::NIKON_VR_SET, None)),
            f(0x0023, IfdId::Nikon3, F::BinaryArray(array::NIKON_PC_SET, None)),
            f(0x0024, IfdId::Nikon3, F::BinaryArray(array::NIKON_WT_SET, None)),
            f(
                0x0091,
                IfdId::Nikon3,
                F::BinaryArray(array::NIKON_SI_SET, Some(array::nikon_si_selector)),
            ),
            f(
                0x0097,
                IfdId::Nikon3,
                F::BinaryArray(array::NIKON_CB_SET, Some(array::nikon_cb_selector)),
            ),
            f(
                0x0098,
                IfdId::Nikon3,
                F::BinaryArray(array::NIKON_LD_SET, Some(array::nikon_ld_selector)),
            ),
            f(
                0x0114,
                IfdId::Sony1,
                F::BinaryArray(array::SONY_CS_SET, Some(array::sony_cs_selector)),
            ),
            f(
                0x0114,
                IfdId::Sony2,
                F::BinaryArray(array::SONY_CS_SET, Some(array::sony_cs_selector)),
            ),
        ];
        // Strip pairs of the image IFDs.
        for group in [
            IfdId::Ifd0,
            IfdId::Ifd1,
            IfdId::Ifd2,
            IfdId::Ifd3,
            IfdId::SubImage1,
            IfdId::SubImage2,
            IfdId::SubImage3,
            IfdId::SubImage4,
            IfdId::SubImage5,
            IfdId::SubImage6,
            IfdId::SubImage7,
            IfdId::SubImage8,
            IfdId::SubImage9,
            IfdId::PanaRaw,
        ] {
            rows.push(f(
                u32::from(tags::STRIP_OFFSETS),
                group,
                F::ImageEntry {
                    size_tag: tags::STRIP_BYTE_COUNTS,
                },
            ));
            rows.push(f(
                u32::from(tags::STRIP_BYTE_COUNTS),
                group,
                F::ImageSize {
                    data_tag: tags::STRIP_OFFSETS,
                },
            ));
        }
        rows
    })
}

/// Produce the node for `(ext_tag, group)`. A lookup miss produces a
/// plain entry.
pub fn create(ext_tag: u32, group: IfdId) -> TiffNode {
    let tag = (ext_tag & 0xFFFF) as u16;
    let row = factory_table()
        .iter()
        .find(|r| (r.ext_tag == ext_tag || r.ext_tag == ext::ALL) && r.group == group);
    let Some(row) = row else {
        return TiffNode::entry(tag, group, TypeId::Undefined);
    };
    match &row.factory {
        Factory::Directory(child_group) => {
            TiffNode::Directory(Directory::new(tag, *child_group))
        }
        Factory::SubIfd(child_group) => TiffNode::SubIfd(SubIfd {
            entry: EntryData::new(tag, group, TypeId::UnsignedLong),
            child_group: *child_group,
            ifds: Vec::new(),
        }),
        Factory::DataEntry { size_tag } => TiffNode::DataEntry(DataEntry {
            entry: EntryData::new(tag, group, TypeId::UnsignedLong),
            size_tag: *size_tag,
            size_group: group,
            data_area: Vec::new(),
        }),
        Factory::SizeEntry { data_tag } | Factory::ImageSize { data_tag } => {
            TiffNode::SizeEntry(SizeEntry {
                entry: EntryData::new(tag, group, TypeId::UnsignedLong),
                data_tag: *data_tag,
                data_group: group,
            })
        }
        Factory::ImageEntry { size_tag } => TiffNode::ImageEntry(crate::node::ImageEntry {
            entry: EntryData::new(tag, group, TypeId::UnsignedLong),
            size_tag: *size_tag,
            size_group: group,
            strips: Vec::new(),
        }),
        Factory::MnEntry => TiffNode::MnEntry(MnEntry {
            entry: EntryData::new(tag, group, TypeId::Undefined),
            mn: None,
        }),
        Factory::BinaryArray(sets, sel) => TiffNode::BinaryArray(BinaryArray::new(
            EntryData::new(tag, group, TypeId::Undefined),
            *sets,
            *sel,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_for_exif_tag() {
        let p = get_path(0x9286, IfdId::ExifIfd, ext::ROOT);
        // Top of stack is the root step.
        let mut p = p;
        assert_eq!(p.pop().unwrap().ext_tag, ext::ROOT);
        assert_eq!(p.pop().unwrap().ext_tag, 0x8769);
        let leaf = p.pop().unwrap();
        assert_eq!(leaf.tag(), 0x9286);
        assert_eq!(leaf.group, IfdId::ExifIfd);
        assert!(p.is_empty());
    }

    #[test]
    fn path_for_thumbnail_tag_goes_via_next() {
        let mut p = get_path(0x0201, IfdId::Ifd1, ext::ROOT);
        assert_eq!(p.pop().unwrap().ext_tag, ext::ROOT);
        let step = p.pop().unwrap();
        assert_eq!(step.ext_tag, ext::NEXT);
        assert_eq!(step.group, IfdId::Ifd0);
        assert_eq!(p.pop().unwrap().tag(), 0x0201);
    }

    #[test]
    fn path_for_makernote_element() {
        let mut p = get_path(0x0001, IfdId::CanonCs, ext::ROOT);
        assert_eq!(p.pop().unwrap().ext_tag, ext::ROOT);
        assert_eq!(p.pop().unwrap().ext_tag, 0x8769);
        assert_eq!(p.pop().unwrap().ext_tag, 0x927C);
        let arr = p.pop().unwrap();
        assert_eq!(arr.ext_tag, 0x0001);
        assert_eq!(arr.group, IfdId::Canon);
        let leaf = p.pop().unwrap();
        assert_eq!(leaf.group, IfdId::CanonCs);
    }

    #[test]
    fn pana_root_replaces_ifd0() {
        let mut p = get_path(0x8827, IfdId::ExifIfd, ext::PANA);
        assert_eq!(p.pop().unwrap().ext_tag, ext::PANA);
        let step = p.pop().unwrap();
        assert_eq!(step.ext_tag, 0x8769);
        assert_eq!(step.group, IfdId::PanaRaw);
    }

    #[test]
    fn create_falls_back_to_plain_entry() {
        let node = create(0xBEEF, IfdId::Ifd0);
        assert!(matches!(node, TiffNode::Entry(_)));
    }

    #[test]
    fn create_knows_special_nodes() {
        assert!(matches!(create(0x8769, IfdId::Ifd0), TiffNode::SubIfd(_)));
        assert!(matches!(
            create(u32::from(tags::MAKER_NOTE), IfdId::ExifIfd),
            TiffNode::MnEntry(_)
        ));
        assert!(matches!(
            create(0x0111, IfdId::Ifd0),
            TiffNode::ImageEntry(_)
        ));
        assert!(matches!(
            create(0x0091, IfdId::Nikon3),
            TiffNode::BinaryArray(_)
        ));
    }
}
