//! Metadata-to-tree encoding.
//!
//! The encoder merges user edits back into a composite tree and picks
//! the write strategy:
//!
//! - **non-intrusive**: every edited value fits its original slot
//!   (same type, no growth, no new or deleted entries); the edit
//!   overwrites value bytes in a copy of the source and every other
//!   byte stays untouched;
//! - **intrusive**: the tree is updated via `add_path` and serialized
//!   from scratch with fresh offsets.

use crate::creator;
use crate::header::{HeaderFormat, TiffHeader};
use crate::metadata::{ExifData, ExifDatum};
use crate::node::{Directory, TiffNode};
use crate::path::ext;
use crate::reader;
use crate::writer;
use exifkit_core::{ByteOrder, Error, Result, TypeId};
use exifkit_tags::IfdId;
use std::collections::HashMap;
use tracing::debug;

/// How an encode pass wrote its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// Bytes were patched in place; layout preserved.
    NonIntrusive,
    /// The TIFF block was rewritten from the tree.
    Intrusive,
}

/// Result of an encode pass: the new TIFF block and how it was made.
#[derive(Debug)]
pub struct EncodeResult {
    pub bytes: Vec<u8>,
    pub method: WriteMethod,
}

/// The root group and path root for a header format.
pub fn root_for(format: HeaderFormat) -> (IfdId, u32) {
    match format {
        HeaderFormat::Rw2 => (IfdId::PanaRaw, ext::PANA),
        _ => (IfdId::Ifd0, ext::ROOT),
    }
}

/// Original location of a value within the source, for in-place
/// patching and fit checks.
struct OrigSlot {
    type_id: TypeId,
    size: usize,
    /// Absolute position of the value bytes; 0 for synthetic nodes
    /// that have no patchable slot (binary elements).
    offset: usize,
    data_area_size: usize,
}

/// Encode `exif` against `source` (the original TIFF block, if any).
///
/// With no source, the output is always an intrusive write of a fresh
/// tree.
pub fn encode(source: Option<&[u8]>, header: &TiffHeader, exif: &ExifData) -> Result<EncodeResult> {
    let (root_group, root_ext) = root_for(header.format);
    let bo = header.byte_order;

    let (mut root, slots) = match source {
        Some(src) => {
            let parsed = reader::read(src, header, root_group)?;
            let mut slots = HashMap::new();
            collect_slots(&parsed.root, &mut slots);
            (parsed.root, slots)
        }
        None => (
            TiffNode::Directory(Directory::new(0, root_group)),
            HashMap::new(),
        ),
    };

    // Entries in the tree that no longer appear in the metadata are
    // deletions; any deletion forces a rewrite.
    let mut deletions = Vec::new();
    collect_deletions(&root, exif, &mut deletions);

    let method = choose_method(source, exif, &slots, &deletions);
    debug!(?method, edits = exif.len(), deletions = deletions.len(), "encoding");

    if let (WriteMethod::NonIntrusive, Some(src)) = (method, source) {
        let mut out = src.to_vec();
        for datum in exif {
            let Some(slot) = slots.get(&(datum.key.tag, datum.key.group)) else {
                continue;
            };
            patch_value(&mut out, slot, datum, bo)?;
        }
        return Ok(EncodeResult {
            bytes: out,
            method,
        });
    }

    for (tag, group) in deletions {
        delete_entry(&mut root, tag, group);
    }
    for datum in exif {
        apply_datum(&mut root, datum, bo, root_ext);
    }
    let bytes = writer::write_tree(&mut root, header)?;
    Ok(EncodeResult {
        bytes,
        method: WriteMethod::Intrusive,
    })
}

/// Merge a single datum into the tree: existing nodes are updated in
/// place, missing ones are created along their path.
pub fn apply_datum(root: &mut TiffNode, datum: &ExifDatum, bo: ByteOrder, root_ext: u32) {
    if let Some(node) = root.find_mut(datum.key.tag, datum.key.group) {
        set_node_value(node, datum, bo);
        return;
    }
    let mut path = creator::get_path(u32::from(datum.key.tag), datum.key.group, root_ext);
    let Some(node) = root.add_path(datum.key.tag, &mut path, None) else {
        debug!(key = %datum.key, "no tree position for datum");
        return;
    };
    set_node_value(node, datum, bo);
}

fn set_node_value(node: &mut TiffNode, datum: &ExifDatum, bo: ByteOrder) {
    match node {
        TiffNode::DataEntry(e) => {
            e.entry.set_value(datum.value.clone(), bo);
            if let Some(area) = &datum.data_area {
                e.data_area = area.clone();
            }
        }
        other => {
            if let Some(e) = other.entry_data_mut() {
                e.set_value(datum.value.clone(), bo);
            }
        }
    }
}

fn choose_method(
    source: Option<&[u8]>,
    exif: &ExifData,
    slots: &HashMap<(u16, IfdId), OrigSlot>,
    deletions: &[(u16, IfdId)],
) -> WriteMethod {
    if source.is_none() || !deletions.is_empty() {
        return WriteMethod::Intrusive;
    }
    for datum in exif {
        let Some(slot) = slots.get(&(datum.key.tag, datum.key.group)) else {
            return WriteMethod::Intrusive;
        };
        if slot.offset == 0
            || !types_compatible(datum.type_id(), slot.type_id)
            || datum.value.size() > slot.size
            || datum.data_area.as_ref().map_or(0, Vec::len) > slot.data_area_size
        {
            return WriteMethod::Intrusive;
        }
    }
    WriteMethod::NonIntrusive
}

/// Internal types serialize as `Undefined`, so a comment value fits an
/// `Undefined` slot.
fn types_compatible(datum: TypeId, slot: TypeId) -> bool {
    datum == slot || (datum.wire_code() == slot.wire_code())
}

fn patch_value(out: &mut [u8], slot: &OrigSlot, datum: &ExifDatum, bo: ByteOrder) -> Result<()> {
    let bytes = datum.value.to_bytes(bo);
    let end = slot
        .offset
        .checked_add(bytes.len())
        .filter(|&e| e <= out.len())
        .ok_or(Error::OffsetOutOfRange)?;
    out[slot.offset..end].copy_from_slice(&bytes);
    // A shrinking value leaves NUL padding in the rest of its original
    // slot; the entry's count field is left as it was.
    for b in &mut out[end..slot.offset + slot.size] {
        *b = 0;
    }
    Ok(())
}

fn collect_slots(node: &TiffNode, slots: &mut HashMap<(u16, IfdId), OrigSlot>) {
    match node {
        TiffNode::Directory(dir) => {
            for c in &dir.components {
                collect_slots(c, slots);
            }
            if let Some(next) = dir.next.as_deref() {
                collect_slots(next, slots);
            }
        }
        TiffNode::SubIfd(sub) => {
            for ifd in &sub.ifds {
                for c in &ifd.components {
                    collect_slots(c, slots);
                }
            }
        }
        TiffNode::MnEntry(mn) => {
            if let Some(m) = mn.mn.as_deref() {
                for c in &m.ifd.components {
                    collect_slots(c, slots);
                }
            } else if let Some(e) = node.entry_data() {
                slots.insert(
                    (e.tag, e.group),
                    OrigSlot {
                        type_id: e.type_id,
                        size: e.size(),
                        offset: e.offset as usize,
                        data_area_size: 0,
                    },
                );
            }
        }
        TiffNode::BinaryArray(arr) => {
            if arr.decoded {
                // Element edits always rewrite: elements have no
                // directly patchable slot in the source (the array may
                // be enciphered).
                for el in &arr.elements {
                    if let Some(e) = el.entry_data() {
                        slots.insert(
                            (e.tag, e.group),
                            OrigSlot {
                                type_id: e.type_id,
                                size: e.size(),
                                offset: 0,
                                data_area_size: 0,
                            },
                        );
                    }
                }
            } else if let Some(e) = node.entry_data() {
                slots.insert(
                    (e.tag, e.group),
                    OrigSlot {
                        type_id: e.type_id,
                        size: e.size(),
                        offset: e.offset as usize,
                        data_area_size: 0,
                    },
                );
            }
        }
        TiffNode::DataEntry(e) => {
            slots.insert(
                (e.entry.tag, e.entry.group),
                OrigSlot {
                    type_id: e.entry.type_id,
                    size: e.entry.size(),
                    offset: e.entry.offset as usize,
                    data_area_size: e.data_area.len(),
                },
            );
        }
        _ => {
            if let Some(e) = node.entry_data() {
                slots.insert(
                    (e.tag, e.group),
                    OrigSlot {
                        type_id: e.type_id,
                        size: e.size(),
                        offset: e.offset as usize,
                        data_area_size: 0,
                    },
                );
            }
        }
    }
}

/// Keys of user-editable leaves that are absent from `exif`.
fn collect_deletions(node: &TiffNode, exif: &ExifData, out: &mut Vec<(u16, IfdId)>) {
    match node {
        TiffNode::Directory(dir) => {
            for c in &dir.components {
                collect_deletions(c, exif, out);
            }
            if let Some(next) = dir.next.as_deref() {
                collect_deletions(next, exif, out);
            }
        }
        TiffNode::SubIfd(sub) => {
            for ifd in &sub.ifds {
                for c in &ifd.components {
                    collect_deletions(c, exif, out);
                }
            }
        }
        TiffNode::MnEntry(mn) => {
            if let Some(m) = mn.mn.as_deref() {
                for c in &m.ifd.components {
                    collect_deletions(c, exif, out);
                }
            }
        }
        TiffNode::BinaryArray(arr) if arr.decoded => {
            for el in &arr.elements {
                collect_deletions(el, exif, out);
            }
        }
        TiffNode::Entry(_)
        | TiffNode::DataEntry(_)
        | TiffNode::BinaryArray(_)
        | TiffNode::BinaryElement(_) => {
            if let Some(e) = node.entry_data() {
                if !exif.contains(crate::metadata::ExifKey::new(e.tag, e.group)) {
                    out.push((e.tag, e.group));
                }
            }
        }
        // Structural entries (sub-IFD pointers, strip pairs) are not
        // user-deletable; they disappear with their content.
        _ => {}
    }
}

/// Remove the leaf entry `(tag, group)` from the tree, dropping any
/// partner size entry of a deleted data entry and any directories that
/// become empty.
fn delete_entry(root: &mut TiffNode, tag: u16, group: IfdId) {
    fn prune_dir(dir: &mut Directory, tag: u16, group: IfdId) {
        let mut partner: Option<(u16, IfdId)> = None;
        dir.components.retain(|c| {
            let matches = c.tag() == tag && c.group() == group;
            if matches {
                if let TiffNode::DataEntry(e) = c {
                    partner = Some((e.size_tag, e.size_group));
                }
            }
            !matches
        });
        if let Some((ptag, pgroup)) = partner {
            dir.components
                .retain(|c| !(c.tag() == ptag && c.group() == pgroup));
        }
        for c in &mut dir.components {
            prune(c, tag, group);
        }
        if let Some(next) = dir.next.as_deref_mut() {
            prune(next, tag, group);
        }
    }

    fn prune(node: &mut TiffNode, tag: u16, group: IfdId) {
        match node {
            TiffNode::Directory(dir) => prune_dir(dir, tag, group),
            TiffNode::SubIfd(sub) => {
                for ifd in &mut sub.ifds {
                    prune_dir(ifd, tag, group);
                }
                sub.ifds.retain(|ifd| !ifd.components.is_empty());
            }
            TiffNode::MnEntry(mn) => {
                if let Some(m) = mn.mn.as_deref_mut() {
                    prune_dir(&mut m.ifd, tag, group);
                }
            }
            TiffNode::BinaryArray(arr) => {
                arr.elements
                    .retain(|el| !(el.tag() == tag && el.group() == group));
            }
            _ => {}
        }
    }

    prune(root, tag, group);
}
