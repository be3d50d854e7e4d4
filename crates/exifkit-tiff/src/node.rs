//! The composite IFD tree.
//!
//! A parsed TIFF structure is a strict tree of [`TiffNode`]s: directories
//! own entries, sub-IFD entries own nested directories, the MakerNote
//! entry owns an [`IfdMakernote`], and binary arrays own their elements.
//! The same tree is produced by the reader on parse and by
//! [`TiffNode::add_path`] when the encoder materializes user edits.
//!
//! On-disk layout emitted by [`TiffNode::write`], per directory:
//!
//! ```text
//! offset + 0       : u16  entry count
//! offset + 2       : entries, 12 bytes each
//! offset + 2 + 12n : u32  next-IFD offset (if the directory chains)
//! value area       : values larger than 4 bytes, 2-byte aligned
//! data area        : data-entry payloads and sub-IFDs, 2-byte aligned
//! image area       : image strips, root level only
//! ```

use crate::array::{ArrayCfg, ArrayDef, ArraySet, CfgSelFn};
use crate::creator;
use crate::makernote::MnHeader;
use crate::path::{ext, TiffPath};
use crate::writer::WriteCtx;
use exifkit_core::{ByteOrder, Error, Result, TypeId, Value};
use exifkit_tags::{exif::tags, IfdId};
use tracing::warn;

/// Sentinel for "not inside a write pass" index arguments.
pub const NPOS: usize = usize::MAX;

/// State common to all entry-shaped nodes.
///
/// `data` holds the raw value bytes in the byte order of the source and
/// is the canonical representation for writing; `value` is the parsed
/// form. `idx` preserves the original appearance order for sort
/// tie-breaking.
#[derive(Debug, Clone)]
pub struct EntryData {
    pub tag: u16,
    pub group: IfdId,
    pub type_id: TypeId,
    pub data: Vec<u8>,
    pub value: Option<Value>,
    /// On-disk offset of the value field; 0 if the value was inline.
    pub offset: u32,
    pub idx: u32,
}

impl EntryData {
    pub fn new(tag: u16, group: IfdId, type_id: TypeId) -> Self {
        Self {
            tag,
            group,
            type_id,
            data: Vec::new(),
            value: None,
            offset: 0,
            idx: 0,
        }
    }

    /// Number of elements, derived from the raw data size.
    pub fn count(&self) -> usize {
        let step = self.type_id.size().max(1);
        (self.data.len() + step / 2) / step
    }

    /// Raw value size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Replace the value, re-encoding the raw bytes.
    pub fn set_value(&mut self, value: Value, bo: ByteOrder) {
        self.type_id = value.type_id();
        self.data = value.to_bytes(bo);
        self.value = Some(value);
    }
}

/// An IFD: ordered children plus an optional chained next-IFD.
#[derive(Debug)]
pub struct Directory {
    pub tag: u16,
    pub group: IfdId,
    pub components: Vec<TiffNode>,
    /// Whether the directory is followed by a 4-byte next-IFD pointer.
    pub has_next: bool,
    pub next: Option<Box<TiffNode>>,
}

impl Directory {
    pub fn new(tag: u16, group: IfdId) -> Self {
        Self {
            tag,
            group,
            components: Vec::new(),
            has_next: true,
            next: None,
        }
    }

    pub fn without_next(tag: u16, group: IfdId) -> Self {
        Self {
            has_next: false,
            ..Self::new(tag, group)
        }
    }

    /// Find a direct child by tag and group.
    pub fn child(&self, tag: u16, group: IfdId) -> Option<&TiffNode> {
        self.components
            .iter()
            .find(|c| c.tag() == tag && c.group() == group)
    }

    pub fn child_mut(&mut self, tag: u16, group: IfdId) -> Option<&mut TiffNode> {
        self.components
            .iter_mut()
            .find(|c| c.tag() == tag && c.group() == group)
    }
}

/// A plain leaf entry.
#[derive(Debug)]
pub struct Entry {
    pub entry: EntryData,
}

/// An entry whose value points into a separate data area, with sizes
/// held by a partner [`SizeEntry`] in the same directory (e.g. the JPEG
/// thumbnail pointer in IFD1). The referenced range, after base-offset
/// adjustment, must lie within the source; the strips of a data entry
/// are contiguous.
#[derive(Debug)]
pub struct DataEntry {
    pub entry: EntryData,
    pub size_tag: u16,
    pub size_group: IfdId,
    /// The referenced bytes, attached once the partner size entry is
    /// known.
    pub data_area: Vec<u8>,
}

/// An entry pointing at image strips (StripOffsets and friends).
/// Strips need not be contiguous; on write they move to the image area
/// at the root level, or to the data area inside makernotes.
#[derive(Debug)]
pub struct ImageEntry {
    pub entry: EntryData,
    pub size_tag: u16,
    pub size_group: IfdId,
    pub strips: Vec<Vec<u8>>,
}

/// The partner entry holding the sizes for a [`DataEntry`] or
/// [`ImageEntry`].
#[derive(Debug)]
pub struct SizeEntry {
    pub entry: EntryData,
    pub data_tag: u16,
    pub data_group: IfdId,
}

/// An entry whose value is a list of pointers to nested directories.
#[derive(Debug)]
pub struct SubIfd {
    pub entry: EntryData,
    /// Group given to newly created nested directories.
    pub child_group: IfdId,
    pub ifds: Vec<Directory>,
}

/// Placeholder for the MakerNote tag; wraps an [`IfdMakernote`] once
/// the makernote format has been identified.
#[derive(Debug)]
pub struct MnEntry {
    pub entry: EntryData,
    pub mn: Option<Box<IfdMakernote>>,
}

/// An identified makernote: vendor header plus nested IFD. The
/// makernote may use its own byte order and resolves nested offsets
/// against its own base.
#[derive(Debug)]
pub struct IfdMakernote {
    pub tag: u16,
    pub group: IfdId,
    pub mn_group: IfdId,
    pub header: MnHeader,
    pub ifd: Directory,
    /// Position of the makernote within the outer TIFF.
    pub mn_offset: usize,
    /// Byte order of the enclosing image.
    pub image_byte_order: Option<ByteOrder>,
}

impl IfdMakernote {
    pub fn new(tag: u16, group: IfdId, mn_group: IfdId, header: MnHeader, has_next: bool) -> Self {
        let mut ifd = Directory::new(tag, mn_group);
        ifd.has_next = has_next;
        Self {
            tag,
            group,
            mn_group,
            header,
            ifd,
            mn_offset: 0,
            image_byte_order: None,
        }
    }

    /// Effective byte order for the nested IFD: the header's own order
    /// if it declares one, else the enclosing image's.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.header.byte_order().or(self.image_byte_order)
    }

    /// Absolute reference point for offsets inside the makernote.
    pub fn base_offset(&self) -> usize {
        self.header.base_offset(self.mn_offset)
    }

    fn size(&self) -> usize {
        self.header.size() + dir_size(&self.ifd)
    }
}

/// An entry whose raw bytes decompose into [`BinaryElement`]s at fixed
/// offsets, according to a static configuration table.
#[derive(Debug)]
pub struct BinaryArray {
    pub entry: EntryData,
    pub sets: &'static [ArraySet],
    pub sel: Option<CfgSelFn>,
    /// Index of the selected configuration within `sets`.
    pub cfg_idx: Option<usize>,
    /// Child elements; every node in here is a
    /// [`TiffNode::BinaryElement`].
    pub elements: Vec<TiffNode>,
    pub decoded: bool,
    /// `(shutter count, serial)` cipher keys captured at decode time,
    /// reused to re-encipher on write.
    pub crypt_keys: Option<(u32, u32)>,
}

impl BinaryArray {
    pub fn new(entry: EntryData, sets: &'static [ArraySet], sel: Option<CfgSelFn>) -> Self {
        Self {
            entry,
            sets,
            sel,
            cfg_idx: if sel.is_none() { Some(0) } else { None },
            elements: Vec::new(),
            decoded: false,
            crypt_keys: None,
        }
    }

    pub fn cfg(&self) -> Option<&'static ArrayCfg> {
        Some(&self.sets.get(self.cfg_idx?)?.cfg)
    }

    pub fn defs(&self) -> &'static [ArrayDef] {
        self.cfg_idx
            .and_then(|i| self.sets.get(i))
            .map(|s| s.defs)
            .unwrap_or(&[])
    }

    /// Serialized array size: extent of the topmost element, extended
    /// to the last defined element when the array writes fillers.
    pub fn array_size(&self) -> usize {
        let Some(cfg) = self.cfg() else {
            return self.entry.size();
        };
        if self.elements.is_empty() {
            return 0;
        }
        let step = cfg.tag_step();
        let mut top_tag = 0usize;
        let mut top_size = step;
        for el in &self.elements {
            let t = usize::from(el.tag());
            if t >= top_tag {
                top_tag = t;
                top_size = el.size();
            }
        }
        let mut sz = top_tag * step + top_size;
        if cfg.has_fillers {
            if let Some(last) = self.defs().last() {
                sz = sz.max(last.idx + last.size());
            }
        }
        sz
    }
}

/// One field of a binary array. The element tag is its byte offset
/// divided by the array's tag step.
#[derive(Debug)]
pub struct BinaryElement {
    pub entry: EntryData,
    pub def: ArrayDef,
}

/// A node of the composite tree.
#[derive(Debug)]
pub enum TiffNode {
    Directory(Directory),
    Entry(Entry),
    DataEntry(DataEntry),
    ImageEntry(ImageEntry),
    SizeEntry(SizeEntry),
    SubIfd(SubIfd),
    MnEntry(MnEntry),
    Makernote(IfdMakernote),
    BinaryArray(BinaryArray),
    BinaryElement(BinaryElement),
}

impl TiffNode {
    /// Create a plain entry node.
    pub fn entry(tag: u16, group: IfdId, type_id: TypeId) -> Self {
        TiffNode::Entry(Entry {
            entry: EntryData::new(tag, group, type_id),
        })
    }

    pub fn tag(&self) -> u16 {
        match self {
            TiffNode::Directory(d) => d.tag,
            TiffNode::Makernote(m) => m.tag,
            _ => self.entry_data().map_or(0, |e| e.tag),
        }
    }

    pub fn group(&self) -> IfdId {
        match self {
            TiffNode::Directory(d) => d.group,
            TiffNode::Makernote(m) => m.mn_group,
            _ => self.entry_data().map_or(IfdId::Ifd0, |e| e.group),
        }
    }

    /// The shared entry state, if this node is entry-shaped.
    pub fn entry_data(&self) -> Option<&EntryData> {
        match self {
            TiffNode::Entry(e) => Some(&e.entry),
            TiffNode::DataEntry(e) => Some(&e.entry),
            TiffNode::ImageEntry(e) => Some(&e.entry),
            TiffNode::SizeEntry(e) => Some(&e.entry),
            TiffNode::SubIfd(e) => Some(&e.entry),
            TiffNode::MnEntry(e) => Some(&e.entry),
            TiffNode::BinaryArray(e) => Some(&e.entry),
            TiffNode::BinaryElement(e) => Some(&e.entry),
            TiffNode::Directory(_) | TiffNode::Makernote(_) => None,
        }
    }

    pub fn entry_data_mut(&mut self) -> Option<&mut EntryData> {
        match self {
            TiffNode::Entry(e) => Some(&mut e.entry),
            TiffNode::DataEntry(e) => Some(&mut e.entry),
            TiffNode::ImageEntry(e) => Some(&mut e.entry),
            TiffNode::SizeEntry(e) => Some(&mut e.entry),
            TiffNode::SubIfd(e) => Some(&mut e.entry),
            TiffNode::MnEntry(e) => Some(&mut e.entry),
            TiffNode::BinaryArray(e) => Some(&mut e.entry),
            TiffNode::BinaryElement(e) => Some(&mut e.entry),
            TiffNode::Directory(_) | TiffNode::Makernote(_) => None,
        }
    }

    fn idx(&self) -> u32 {
        self.entry_data().map_or(0, |e| e.idx)
    }

    /// Walk or extend the tree along `path`, creating missing nodes via
    /// the creator tables. If `object` is given and one step remains,
    /// it is attached as the leaf. Returns a reference to the node the
    /// path resolves to, or `None` when the path ends on a node that
    /// must not be created standalone (a childless sub-IFD).
    pub fn add_path(
        &mut self,
        tag: u16,
        path: &mut TiffPath,
        object: Option<TiffNode>,
    ) -> Option<&mut TiffNode> {
        match self {
            TiffNode::Directory(dir) => dir_add_path(dir, tag, path, object),
            TiffNode::Makernote(m) => dir_add_path(&mut m.ifd, tag, path, object),
            TiffNode::SubIfd(_) => self.subifd_add_path(tag, path, object),
            TiffNode::MnEntry(_) => self.mn_add_path(tag, path, object),
            TiffNode::BinaryArray(_) => self.array_add_path(tag, path, object),
            // Leaves terminate the walk.
            _ => Some(self),
        }
    }

    fn subifd_add_path(
        &mut self,
        tag: u16,
        path: &mut TiffPath,
        object: Option<TiffNode>,
    ) -> Option<&mut TiffNode> {
        let tpi1 = path.pop()?;
        let Some(tpi2) = path.top() else {
            // The path ends on the sub-IFD tag itself.
            path.push(tpi1);
            return Some(self);
        };
        // Put our own step back: the nested directory consumes it.
        path.push(tpi1);
        let TiffNode::SubIfd(sub) = self else {
            return None;
        };
        let pos = match sub.ifds.iter().position(|ifd| ifd.group == tpi2.group) {
            Some(p) => p,
            None => {
                sub.ifds.push(Directory::new(tpi1.tag(), tpi2.group));
                sub.ifds.len() - 1
            }
        };
        dir_add_path(&mut sub.ifds[pos], tag, path, object)
    }

    fn mn_add_path(
        &mut self,
        tag: u16,
        path: &mut TiffPath,
        object: Option<TiffNode>,
    ) -> Option<&mut TiffNode> {
        let tpi1 = path.pop()?;
        let Some(tpi2) = path.top() else {
            path.push(tpi1);
            return Some(self);
        };
        path.push(tpi1);
        let TiffNode::MnEntry(mn) = self else {
            return None;
        };
        if mn.mn.is_none() {
            let created = crate::makernote::create_for_group(tpi1.tag(), tpi1.group, tpi2.group)?;
            mn.mn = Some(Box::new(created));
        }
        dir_add_path(&mut mn.mn.as_mut()?.ifd, tag, path, object)
    }

    fn array_add_path(
        &mut self,
        tag: u16,
        path: &mut TiffPath,
        mut object: Option<TiffNode>,
    ) -> Option<&mut TiffNode> {
        if path.len() == 1 {
            // An unknown complex binary array has no children and acts
            // like a standard TIFF entry.
            return Some(self);
        }
        path.pop()?;
        let tpi = path.top()?;
        let TiffNode::BinaryArray(arr) = self else {
            return None;
        };
        // During intrusive writing of a complex array the configuration
        // is selected by the group of the first element added.
        if arr.cfg_idx.is_none() {
            arr.cfg_idx = arr.sets.iter().position(|s| s.cfg.group == tpi.group);
            arr.cfg_idx?;
        }
        arr.decoded = true;
        let existing = arr
            .elements
            .iter()
            .position(|el| el.tag() == tpi.tag() && el.group() == tpi.group);
        let pos = match existing {
            Some(p) => p,
            None => {
                let atc = if path.len() == 1 && object.is_some() {
                    object.take()?
                } else {
                    let cfg = arr.cfg()?;
                    let step = cfg.tag_step().max(1);
                    let def = arr
                        .defs()
                        .iter()
                        .find(|d| d.idx / step == usize::from(tpi.tag()))
                        .copied()
                        .unwrap_or(cfg.el_default);
                    let mut entry = EntryData::new(tpi.tag(), tpi.group, def.type_id);
                    entry.idx = tpi.tag().into();
                    TiffNode::BinaryElement(BinaryElement { entry, def })
                };
                arr.elements.push(atc);
                arr.elements.len() - 1
            }
        };
        arr.elements[pos].add_path(tag, path, object)
    }

    /// Add a child to this node. Returns a reference to the adopted
    /// child; `None` if this node cannot have children.
    pub fn add_child(&mut self, child: TiffNode) -> Option<&mut TiffNode> {
        match self {
            TiffNode::Directory(dir) => {
                dir.components.push(child);
                dir.components.last_mut()
            }
            TiffNode::Makernote(m) => {
                m.ifd.components.push(child);
                m.ifd.components.last_mut()
            }
            TiffNode::BinaryArray(arr) => {
                arr.elements.push(child);
                arr.elements.last_mut()
            }
            _ => None,
        }
    }

    /// Set this directory's chained next-IFD.
    pub fn add_next(&mut self, next: TiffNode) -> Option<&mut TiffNode> {
        match self {
            TiffNode::Directory(dir) if dir.has_next => {
                dir.next = Some(Box::new(next));
                dir.next.as_deref_mut()
            }
            _ => None,
        }
    }

    /// Recursively find the first non-directory node with the given tag
    /// and group.
    pub fn find(&self, tag: u16, group: IfdId) -> Option<&TiffNode> {
        if self.tag() == tag && self.group() == group && !matches!(self, TiffNode::Directory(_)) {
            return Some(self);
        }
        match self {
            TiffNode::Directory(dir) => dir
                .components
                .iter()
                .find_map(|c| c.find(tag, group))
                .or_else(|| dir.next.as_deref().and_then(|n| n.find(tag, group))),
            TiffNode::SubIfd(sub) => sub
                .ifds
                .iter()
                .flat_map(|ifd| ifd.components.iter())
                .find_map(|c| c.find(tag, group)),
            TiffNode::MnEntry(mn) => mn
                .mn
                .as_deref()
                .and_then(|m| m.ifd.components.iter().find_map(|c| c.find(tag, group))),
            TiffNode::Makernote(m) => m.ifd.components.iter().find_map(|c| c.find(tag, group)),
            TiffNode::BinaryArray(arr) => arr.elements.iter().find_map(|el| el.find(tag, group)),
            _ => None,
        }
    }

    /// Mutable variant of [`TiffNode::find`].
    pub fn find_mut(&mut self, tag: u16, group: IfdId) -> Option<&mut TiffNode> {
        if self.tag() == tag && self.group() == group && !matches!(self, TiffNode::Directory(_)) {
            return Some(self);
        }
        match self {
            TiffNode::Directory(dir) => {
                for c in &mut dir.components {
                    if c.find(tag, group).is_some() {
                        return c.find_mut(tag, group);
                    }
                }
                dir.next.as_deref_mut().and_then(|n| n.find_mut(tag, group))
            }
            TiffNode::SubIfd(sub) => {
                for ifd in &mut sub.ifds {
                    for c in &mut ifd.components {
                        if c.find(tag, group).is_some() {
                            return c.find_mut(tag, group);
                        }
                    }
                }
                None
            }
            TiffNode::MnEntry(mn) => {
                let m = mn.mn.as_deref_mut()?;
                for c in &mut m.ifd.components {
                    if c.find(tag, group).is_some() {
                        return c.find_mut(tag, group);
                    }
                }
                None
            }
            TiffNode::Makernote(m) => {
                for c in &mut m.ifd.components {
                    if c.find(tag, group).is_some() {
                        return c.find_mut(tag, group);
                    }
                }
                None
            }
            TiffNode::BinaryArray(arr) => {
                for el in &mut arr.elements {
                    if el.find(tag, group).is_some() {
                        return el.find_mut(tag, group);
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// The component count written to the enclosing 12-byte entry, or
    /// the number of children for directory-shaped nodes.
    pub fn count(&self) -> usize {
        match self {
            TiffNode::Directory(dir) => dir.components.len(),
            TiffNode::Makernote(m) => m.ifd.components.len(),
            TiffNode::SubIfd(sub) => {
                if sub.ifds.is_empty() {
                    sub.entry.count()
                } else {
                    sub.ifds.len()
                }
            }
            TiffNode::ImageEntry(e) => {
                if e.strips.is_empty() {
                    e.entry.count()
                } else {
                    e.strips.len()
                }
            }
            // The count of an IFD makernote in the MakerNote tag is its
            // size in bytes.
            TiffNode::MnEntry(mn) => match &mn.mn {
                Some(m) => m.size(),
                None => mn.entry.count(),
            },
            TiffNode::BinaryArray(arr) => {
                if !arr.decoded || arr.cfg().is_none() {
                    return arr.entry.count();
                }
                // The wire count stays in units of the entry's own
                // type, whatever the element layout is.
                let ts = arr.entry.type_id.size().max(1);
                let sz = arr.array_size();
                (sz + ts / 2) / ts
            }
            _ => self.entry_data().map_or(0, EntryData::count),
        }
    }

    /// Serialized size of this node's value, used for layout.
    pub fn size(&self) -> usize {
        match self {
            TiffNode::Directory(dir) => dir_size(dir),
            TiffNode::Makernote(m) => m.size(),
            // Image entries serialize one offset per strip, in the
            // entry's declared offset type.
            TiffNode::ImageEntry(e) => e.strips.len() * offset_size(e.entry.type_id),
            TiffNode::SubIfd(sub) => sub.ifds.len() * 4,
            TiffNode::MnEntry(mn) => match &mn.mn {
                Some(m) => m.size(),
                None => mn.entry.size(),
            },
            TiffNode::BinaryArray(arr) => {
                if !arr.decoded || arr.cfg().is_none() {
                    arr.entry.size()
                } else {
                    arr.array_size()
                }
            }
            _ => self.entry_data().map_or(0, EntryData::size),
        }
    }

    /// Size of this node's contribution to the enclosing data area.
    pub fn size_data(&self) -> usize {
        match self {
            TiffNode::DataEntry(e) => e.data_area.len(),
            TiffNode::SubIfd(sub) => sub.ifds.iter().map(dir_size).sum(),
            // Inside makernotes, image strips live in the data area.
            TiffNode::ImageEntry(e) if e.entry.group.is_makernote() => self.size_image(),
            _ => 0,
        }
    }

    /// Size of this node's contribution to the root image area.
    pub fn size_image(&self) -> usize {
        match self {
            TiffNode::Directory(dir) => {
                let mut len: usize = dir.components.iter().map(TiffNode::size_image).sum();
                if let Some(next) = &dir.next {
                    len += next.size_image();
                }
                len
            }
            TiffNode::SubIfd(sub) => sub
                .ifds
                .iter()
                .flat_map(|ifd| ifd.components.iter())
                .map(TiffNode::size_image)
                .sum(),
            TiffNode::Makernote(m) => m.ifd.components.iter().map(TiffNode::size_image).sum(),
            TiffNode::MnEntry(mn) => mn
                .mn
                .as_deref()
                .map_or(0, |m| m.ifd.components.iter().map(TiffNode::size_image).sum()),
            TiffNode::ImageEntry(e) => e.strips.iter().map(|s| s.len() + (s.len() & 1)).sum(),
            _ => 0,
        }
    }

    /// Serialize this node. `offset` is the node's position relative to
    /// the start of the TIFF block; `value_idx`/`data_idx` locate the
    /// value and data areas of the enclosing directory; `image_idx`
    /// threads the absolute position of the image area through the
    /// whole write ([`NPOS`] marks the root call).
    pub fn write(
        &mut self,
        ctx: &mut WriteCtx,
        bo: ByteOrder,
        offset: usize,
        value_idx: usize,
        data_idx: usize,
        image_idx: &mut usize,
    ) -> Result<usize> {
        match self {
            TiffNode::Directory(dir) => write_directory(dir, ctx, bo, offset, image_idx),
            TiffNode::DataEntry(e) => write_data_entry(e, ctx, bo, offset, data_idx),
            TiffNode::ImageEntry(e) => write_image_entry(e, ctx, bo, offset, data_idx, image_idx),
            TiffNode::SubIfd(sub) => write_sub_ifd_offsets(sub, ctx, bo, offset, data_idx),
            TiffNode::MnEntry(mn) => match mn.mn.as_deref_mut() {
                None => {
                    ctx.write(&mn.entry.data);
                    Ok(mn.entry.size())
                }
                Some(m) => write_makernote(m, ctx, bo, offset + value_idx, image_idx),
            },
            TiffNode::Makernote(m) => write_makernote(m, ctx, bo, offset, image_idx),
            TiffNode::BinaryArray(arr) => {
                if !arr.decoded || arr.cfg().is_none() {
                    ctx.write(&arr.entry.data);
                    return Ok(arr.entry.size());
                }
                crate::array::write_array(arr, ctx, bo)
            }
            _ => match self.entry_data() {
                Some(entry) => {
                    ctx.write(&entry.data);
                    Ok(entry.size())
                }
                None => Ok(0),
            },
        }
    }

    /// Emit this node's data-area bytes.
    pub fn write_data(
        &mut self,
        ctx: &mut WriteCtx,
        bo: ByteOrder,
        offset: usize,
        data_idx: usize,
        image_idx: &mut usize,
    ) -> Result<usize> {
        match self {
            TiffNode::DataEntry(e) => {
                ctx.write(&e.data_area);
                let mut len = e.data_area.len();
                if len & 1 == 1 {
                    ctx.putb(0);
                    len += 1;
                }
                Ok(len)
            }
            TiffNode::ImageEntry(e) => {
                // Inside makernotes, strips go to the data area.
                if e.entry.group.is_makernote() {
                    self.write_image(ctx, bo)
                } else {
                    Ok(0)
                }
            }
            TiffNode::SubIfd(sub) => {
                let mut len = 0;
                for ifd in &mut sub.ifds {
                    len += write_directory(ifd, ctx, bo, offset + data_idx + len, image_idx)?;
                }
                if len & 1 == 1 {
                    ctx.putb(0);
                    len += 1;
                }
                Ok(len)
            }
            _ => Ok(0),
        }
    }

    /// Emit this node's image-area bytes (strips).
    pub fn write_image(&mut self, ctx: &mut WriteCtx, bo: ByteOrder) -> Result<usize> {
        match self {
            TiffNode::Directory(dir) => write_dir_image(dir, ctx, bo),
            TiffNode::SubIfd(sub) => {
                let mut len = 0;
                for ifd in &mut sub.ifds {
                    len += write_dir_image(ifd, ctx, bo)?;
                }
                Ok(len)
            }
            TiffNode::Makernote(m) => {
                let bo = m.byte_order().unwrap_or(bo);
                write_dir_image(&mut m.ifd, ctx, bo)
            }
            TiffNode::MnEntry(mn) => match mn.mn.as_deref_mut() {
                Some(m) => {
                    let bo = m.byte_order().unwrap_or(bo);
                    write_dir_image(&mut m.ifd, ctx, bo)
                }
                None => Ok(0),
            },
            TiffNode::ImageEntry(e) => {
                let mut len = 0;
                for strip in &e.strips {
                    ctx.write(strip);
                    len += strip.len();
                    if strip.len() & 1 == 1 {
                        ctx.putb(0);
                        len += 1;
                    }
                }
                Ok(len)
            }
            _ => Ok(0),
        }
    }
}

/// `add_path` over a directory, shared by the node kinds that contain
/// one.
fn dir_add_path<'a>(
    dir: &'a mut Directory,
    tag: u16,
    path: &mut TiffPath,
    mut object: Option<TiffNode>,
) -> Option<&'a mut TiffNode> {
    path.pop()?;
    let tpi = path.top()?;

    // Resolve to an existing component: the same (tag, group) path
    // yields the same node.
    if tpi.ext_tag == ext::NEXT {
        if dir.next.is_some() {
            return dir.next.as_deref_mut()?.add_path(tag, path, object);
        }
    } else if let Some(pos) = dir
        .components
        .iter()
        .position(|c| c.tag() == tpi.tag() && c.group() == tpi.group)
    {
        return dir.components[pos].add_path(tag, path, object);
    }

    let atc = if path.len() == 1 && object.is_some() {
        object.take()?
    } else {
        creator::create(tpi.ext_tag, tpi.group)
    };

    // Do not add a dangling sub-IFD component without children.
    if path.len() == 1 && matches!(atc, TiffNode::SubIfd(_)) {
        return None;
    }

    if tpi.ext_tag == ext::NEXT {
        dir.next = Some(Box::new(atc));
        dir.next.as_deref_mut()?.add_path(tag, path, object)
    } else {
        dir.components.push(atc);
        let pos = dir.components.len() - 1;
        dir.components[pos].add_path(tag, path, object)
    }
}

/// Total serialized size of a directory, including values, data areas
/// and the chained next-IFD, excluding the root image area.
pub(crate) fn dir_size(dir: &Directory) -> usize {
    let comp_count = dir.components.len();
    let mut len = 2 + 12 * comp_count + if dir.has_next { 4 } else { 0 };
    for c in &dir.components {
        let sv = c.size();
        if sv > 4 {
            len += sv + (sv & 1);
        }
        let sd = c.size_data();
        len += sd + (sd & 1);
    }
    let size_next = dir.next.as_deref().map_or(0, TiffNode::size);
    len += size_next;
    if comp_count == 0 && size_next == 0 {
        return 0;
    }
    len
}

fn cmp_tag(a: &TiffNode, b: &TiffNode) -> std::cmp::Ordering {
    a.tag().cmp(&b.tag()).then(a.idx().cmp(&b.idx()))
}

fn write_directory(
    dir: &mut Directory,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    image_idx: &mut usize,
) -> Result<usize> {
    let is_root_dir = *image_idx == NPOS;

    let comp_count = dir.components.len();
    if comp_count > 0xFFFF {
        return Err(Error::corrupted(format!(
            "too many entries in directory {}",
            dir.group
        )));
    }
    let size_next = dir.next.as_deref().map_or(0, TiffNode::size);
    if comp_count == 0 && size_next == 0 {
        return Ok(0);
    }

    // The CR2 header carries a pointer to this directory.
    if dir.group == IfdId::Ifd3 {
        ctx.set_target(crate::header::OffsetId::Cr2RawIfd, offset);
    }

    let size_dir = 2 + 12 * comp_count + if dir.has_next { 4 } else { 0 };

    // The TIFF standard requires entries sorted in ascending tag order.
    // Not sorting makernote directories sometimes preserves them better.
    if !dir.group.is_makernote() {
        dir.components.sort_by(cmp_tag);
    }

    let mut size_value = 0usize;
    let mut size_data = 0usize;
    for c in &dir.components {
        let sv = c.size();
        if sv > 4 {
            size_value += sv + (sv & 1);
        }
        if is_root_dir {
            let sd = c.size_data();
            size_data += sd + (sd & 1);
        }
    }

    let mut idx = 0usize;
    let mut value_idx = size_dir;
    let mut data_idx = size_dir + size_value;
    if is_root_dir {
        *image_idx = offset + data_idx + size_data + size_next;
        *image_idx += *image_idx & 1;
    }

    // 1st: the IFD. a) Entry count.
    ctx.write(&bo.write_u16(comp_count as u16));
    idx += 2;
    // b) Directory entries, which may point to values or data.
    for i in 0..dir.components.len() {
        idx += write_dir_entry(
            &mut dir.components[i],
            ctx,
            bo,
            offset,
            value_idx,
            data_idx,
            image_idx,
        )?;
        let sv = dir.components[i].size();
        if sv > 4 {
            value_idx += sv + (sv & 1);
        }
        let sd = dir.components[i].size_data();
        data_idx += sd + (sd & 1);
    }
    // c) Pointer to the next IFD.
    if dir.has_next {
        let ptr = if size_next > 0 {
            u32::try_from(offset + data_idx).map_err(|_| Error::OffsetOutOfRange)?
        } else {
            0
        };
        ctx.write(&bo.write_u32(ptr));
        idx += 4;
    }

    // 2nd: IFD values, which may point to additional data.
    value_idx = size_dir;
    data_idx = size_dir + size_value;
    for i in 0..dir.components.len() {
        let sv = dir.components[i].size();
        if sv > 4 {
            let written =
                dir.components[i].write(ctx, bo, offset, value_idx, data_idx, image_idx)?;
            if written != sv {
                return Err(Error::corrupted(format!(
                    "directory {}: value size mismatch for tag 0x{:04x}",
                    dir.group,
                    dir.components[i].tag()
                )));
            }
            let mut sv = sv;
            if sv & 1 == 1 {
                ctx.putb(0);
                sv += 1;
            }
            idx += sv;
            value_idx += sv;
        }
        let sd = dir.components[i].size_data();
        data_idx += sd + (sd & 1);
    }

    // 3rd: data areas, which may contain offsets themselves (sub-IFDs).
    data_idx = size_dir + size_value;
    let mut len = 0usize;
    for c in &mut dir.components {
        len += c.write_data(ctx, bo, offset, data_idx + len, image_idx)?;
    }
    idx += len;

    // 4th: the chained next-IFD.
    if size_next > 0 {
        if let Some(next) = dir.next.as_deref_mut() {
            idx += next.write(ctx, bo, offset + idx, NPOS, NPOS, image_idx)?;
        }
    }

    // 5th, root level only: the image area.
    if is_root_dir {
        idx += write_dir_image(dir, ctx, bo)?;
    }

    Ok(idx)
}

/// Emit the image strips of a directory, sub-IFD strips last to keep
/// the original order, then the chained next-IFD's strips.
fn write_dir_image(dir: &mut Directory, ctx: &mut WriteCtx, bo: ByteOrder) -> Result<usize> {
    let mut len = 0;
    let mut sub_ifd_pos = None;
    for (i, c) in dir.components.iter().enumerate() {
        if c.tag() == tags::SUB_IFDS {
            if sub_ifd_pos.is_some() {
                warn!("multiple sub-IFD image data tags found");
            }
            sub_ifd_pos = Some(i);
        }
    }
    for i in 0..dir.components.len() {
        if Some(i) == sub_ifd_pos {
            continue;
        }
        len += dir.components[i].write_image(ctx, bo)?;
    }
    if let Some(i) = sub_ifd_pos {
        len += dir.components[i].write_image(ctx, bo)?;
    }
    if let Some(next) = dir.next.as_deref_mut() {
        len += next.write_image(ctx, bo)?;
    }
    Ok(len)
}

fn write_dir_entry(
    comp: &mut TiffNode,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    value_idx: usize,
    data_idx: usize,
    image_idx: &mut usize,
) -> Result<usize> {
    let tag = comp.tag();
    let type_id = comp.entry_data().map_or(TypeId::Undefined, |e| e.type_id);
    let count = comp.count();
    ctx.write(&bo.write_u16(tag));
    ctx.write(&bo.write_u16(type_id.wire_code()));
    ctx.write(&bo.write_u32(u32::try_from(count).map_err(|_| Error::OffsetOutOfRange)?));
    if comp.size() > 4 {
        let value_offset = u32::try_from(offset + value_idx).map_err(|_| Error::OffsetOutOfRange)?;
        if let Some(e) = comp.entry_data_mut() {
            e.offset = value_offset;
        }
        ctx.write(&bo.write_u32(value_offset));
    } else {
        let len = comp.write(ctx, bo, offset, value_idx, data_idx, image_idx)?;
        if len < 4 {
            ctx.write(&vec![0u8; 4 - len]);
        }
    }
    Ok(12)
}

/// Serialized size of one offset of the given type.
fn offset_size(type_id: TypeId) -> usize {
    match type_id {
        TypeId::UnsignedShort | TypeId::SignedShort => 2,
        _ => 4,
    }
}

/// Write an offset in the entry's declared type, range-checked.
pub(crate) fn write_offset(
    out: &mut Vec<u8>,
    offset: usize,
    type_id: TypeId,
    bo: ByteOrder,
) -> Result<usize> {
    match type_id {
        TypeId::UnsignedShort | TypeId::SignedShort => {
            let v = u16::try_from(offset).map_err(|_| Error::OffsetOutOfRange)?;
            out.extend_from_slice(&bo.write_u16(v));
            Ok(2)
        }
        TypeId::UnsignedLong | TypeId::SignedLong | TypeId::TiffIfd => {
            let v = u32::try_from(offset).map_err(|_| Error::OffsetOutOfRange)?;
            out.extend_from_slice(&bo.write_u32(v));
            Ok(4)
        }
        other => Err(Error::UnsupportedDataAreaOffsetType(other.wire_code())),
    }
}

fn write_data_entry(
    e: &mut DataEntry,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    data_idx: usize,
) -> Result<usize> {
    let Some(offsets) = e.entry.value.as_ref().and_then(Value::u32_vec) else {
        return Ok(0);
    };
    if offsets.is_empty() {
        return Ok(0);
    }
    let mut buf = Vec::with_capacity(offsets.len() * 4);
    let first = offsets[0] as usize;
    let mut len = 0;
    for &o in &offsets {
        let o = o as usize;
        if o < first {
            return Err(Error::OffsetOutOfRange);
        }
        let new_data_idx = o - first + data_idx;
        len += write_offset(&mut buf, offset + new_data_idx, e.entry.type_id, bo)?;
    }
    ctx.write(&buf);
    Ok(len)
}

fn write_image_entry(
    e: &mut ImageEntry,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    data_idx: usize,
    image_idx: &mut usize,
) -> Result<usize> {
    // Inside makernotes, strip data goes to the data area instead of
    // the root image area.
    let in_makernote = e.entry.group.is_makernote();
    let mut o2 = if in_makernote {
        offset + data_idx
    } else {
        *image_idx
    };
    let mut buf = Vec::with_capacity(e.strips.len() * 4);
    let mut len = 0;
    for strip in &e.strips {
        len += write_offset(&mut buf, o2, e.entry.type_id, bo)?;
        let sz = strip.len() + (strip.len() & 1);
        o2 += sz;
        if !in_makernote {
            *image_idx += sz;
        }
    }
    ctx.write(&buf);
    Ok(len)
}

fn write_sub_ifd_offsets(
    sub: &mut SubIfd,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    mut data_idx: usize,
) -> Result<usize> {
    // Sort nested IFDs by group so image-data sub-IFDs keep a stable
    // order.
    sub.ifds.sort_by_key(|ifd| ifd.group);
    let mut buf = Vec::with_capacity(sub.ifds.len() * 4);
    let mut len = 0;
    for ifd in &sub.ifds {
        len += write_offset(&mut buf, offset + data_idx, sub.entry.type_id, bo)?;
        data_idx += dir_size(ifd);
    }
    ctx.write(&buf);
    Ok(len)
}

fn write_makernote(
    m: &mut IfdMakernote,
    ctx: &mut WriteCtx,
    bo: ByteOrder,
    offset: usize,
    image_idx: &mut usize,
) -> Result<usize> {
    m.mn_offset = offset;
    m.image_byte_order = Some(bo);
    let mn_bo = m.byte_order().unwrap_or(bo);
    let len = m.header.write(ctx, mn_bo);
    let base = m.base_offset();
    let dir_offset = (offset + len)
        .checked_sub(base)
        .ok_or(Error::OffsetOutOfRange)?;
    let written = write_directory(&mut m.ifd, ctx, mn_bo, dir_offset, image_idx)?;
    Ok(len + written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathItem;

    fn root_dir() -> TiffNode {
        TiffNode::Directory(Directory::new(0, IfdId::Ifd0))
    }

    fn path_to(items: &[(u32, IfdId)]) -> TiffPath {
        // Paths are LIFO: push in leaf-to-root order so that the root
        // step ends up on top.
        let mut p = TiffPath::new();
        for &(t, g) in items.iter().rev() {
            p.push(PathItem::new(t, g));
        }
        p
    }

    #[test]
    fn add_path_creates_exif_chain() {
        let mut root = root_dir();
        let mut p = path_to(&[
            (ext::ROOT, IfdId::Ifd0),
            (0x8769, IfdId::Ifd0),
            (0x9286, IfdId::ExifIfd),
        ]);
        let leaf = root.add_path(0x9286, &mut p, None).unwrap();
        assert_eq!(leaf.tag(), 0x9286);
        assert_eq!(leaf.group(), IfdId::ExifIfd);

        // The same path resolves to the existing nodes.
        let mut p2 = path_to(&[
            (ext::ROOT, IfdId::Ifd0),
            (0x8769, IfdId::Ifd0),
            (0x9286, IfdId::ExifIfd),
        ]);
        root.add_path(0x9286, &mut p2, None).unwrap();
        let TiffNode::Directory(dir) = &root else {
            panic!()
        };
        assert_eq!(dir.components.len(), 1);
        let TiffNode::SubIfd(sub) = &dir.components[0] else {
            panic!("expected sub-IFD for 0x8769");
        };
        assert_eq!(sub.ifds.len(), 1);
        assert_eq!(sub.ifds[0].components.len(), 1);
    }

    #[test]
    fn add_path_next_targets_next_slot() {
        let mut root = root_dir();
        let mut p = path_to(&[
            (ext::ROOT, IfdId::Ifd0),
            (ext::NEXT, IfdId::Ifd0),
            (0x0103, IfdId::Ifd1),
        ]);
        root.add_path(0x0103, &mut p, None).unwrap();
        let TiffNode::Directory(dir) = &root else {
            panic!()
        };
        assert!(dir.components.is_empty());
        let next = dir.next.as_deref().unwrap();
        assert_eq!(next.group(), IfdId::Ifd1);
        assert!(next.find(0x0103, IfdId::Ifd1).is_some());
    }

    #[test]
    fn empty_directory_writes_nothing() {
        let dir = Directory::new(0, IfdId::Ifd0);
        assert_eq!(dir_size(&dir), 0);
    }

    #[test]
    fn directory_size_counts_oversize_values() {
        let mut dir = Directory::new(0, IfdId::Ifd0);
        let mut e = EntryData::new(0x010F, IfdId::Ifd0, TypeId::AsciiString);
        e.data = b"A very long camera make\0".to_vec();
        dir.components.push(TiffNode::Entry(Entry { entry: e }));
        // 2 + 12 + 4 (next ptr) + 24 value bytes.
        assert_eq!(dir_size(&dir), 2 + 12 + 4 + 24);
    }

    #[test]
    fn inline_value_fits_in_entry() {
        let mut dir = Directory::new(0, IfdId::Ifd0);
        let mut e = EntryData::new(0x0112, IfdId::Ifd0, TypeId::UnsignedShort);
        e.set_value(Value::UShort(vec![1]), ByteOrder::Little);
        dir.components.push(TiffNode::Entry(Entry { entry: e }));
        assert_eq!(dir_size(&dir), 2 + 12 + 4);
    }

    #[test]
    fn find_descends_into_subifds() {
        let mut root = root_dir();
        let mut p = path_to(&[
            (ext::ROOT, IfdId::Ifd0),
            (0x8769, IfdId::Ifd0),
            (0x9286, IfdId::ExifIfd),
        ]);
        root.add_path(0x9286, &mut p, None).unwrap();
        assert!(root.find(0x9286, IfdId::ExifIfd).is_some());
        assert!(root.find(0x9286, IfdId::GpsIfd).is_none());
    }
}
