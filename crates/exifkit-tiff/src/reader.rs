//! On-disk IFD reader.
//!
//! Walks the IFD structure of a TIFF block and builds the composite
//! tree: sub-IFD tags recurse into nested directories, the MakerNote
//! tag goes through makernote identification, data-area entries get
//! their strips attached once the partner size entry is known, and
//! binary arrays are split in a post-processing pass over the finished
//! tree (their cipher keys live in sibling entries that may follow the
//! array itself).
//!
//! Robustness rules: every computed range is bounds-checked with
//! overflow-safe arithmetic, every directory offset may be visited only
//! once, and the number of directories is bounded by `size / 16`.
//! Corruption inside an entry or a sub-IFD is recorded as a warning at
//! the enclosing directory and does not invalidate already-parsed
//! siblings.

use crate::header::TiffHeader;
use crate::node::{Directory, TiffNode};
use crate::{array, creator, makernote};
use exifkit_core::{u16_at, u32_at, ByteOrder, Error, Result, TypeId, Value};
use exifkit_tags::{exif::tags, IfdId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Result of a successful parse.
#[derive(Debug)]
pub struct ReadResult {
    pub root: TiffNode,
    pub byte_order: ByteOrder,
    /// Structural problems survived during the parse.
    pub warnings: Vec<Error>,
}

/// Parse the TIFF block `data` into a composite tree.
///
/// `root_group` is the group of the first IFD: `Ifd0` for TIFF and its
/// derivatives, `PanaRaw` for RW2.
pub fn read(data: &[u8], header: &TiffHeader, root_group: IfdId) -> Result<ReadResult> {
    let mut reader = TiffReader {
        data,
        visited: HashSet::new(),
        budget: data.len() / 16 + 1,
        warnings: Vec::new(),
        next_idx: 0,
        make: None,
    };
    let bo = header.byte_order;

    let mut root_dir = Directory::new(0, root_group);
    let mut offset = header.offset as usize;
    let mut group = root_group;
    let next_offset = reader.read_directory(&mut root_dir, offset, 0, bo)?;

    // Follow the chained next-IFDs (IFD0 -> IFD1 -> ...).
    let mut chain_tail: Vec<Directory> = Vec::new();
    offset = next_offset as usize;
    while offset != 0 {
        let Some(next_group) = chain_successor(group) else {
            warn!("next-IFD chain longer than supported, stopping");
            break;
        };
        let mut dir = Directory::new(0, next_group);
        match reader.read_directory(&mut dir, offset, 0, bo) {
            Ok(next) => {
                group = next_group;
                offset = next as usize;
                chain_tail.push(dir);
            }
            Err(e) => {
                reader.warnings.push(e);
                break;
            }
        }
    }
    // Link the chain back-to-front.
    let mut next: Option<Box<TiffNode>> = None;
    for mut dir in chain_tail.into_iter().rev() {
        dir.next = next;
        next = Some(Box::new(TiffNode::Directory(dir)));
    }
    root_dir.next = next;

    let mut root = TiffNode::Directory(root_dir);

    // Post-process binary arrays now that the whole tree is available.
    let crypt_keys = array::nikon_crypt_keys(&root);
    let mut warnings = std::mem::take(&mut reader.warnings);
    post_process(&mut root, crypt_keys, bo, &mut warnings);

    Ok(ReadResult {
        root,
        byte_order: bo,
        warnings,
    })
}

fn chain_successor(group: IfdId) -> Option<IfdId> {
    match group {
        IfdId::Ifd0 => Some(IfdId::Ifd1),
        IfdId::Ifd1 => Some(IfdId::Ifd2),
        IfdId::Ifd2 => Some(IfdId::Ifd3),
        _ => None,
    }
}

struct TiffReader<'a> {
    data: &'a [u8],
    /// Absolute offsets of directories already visited (cycle guard).
    visited: HashSet<usize>,
    /// Maximum number of directories for this input.
    budget: usize,
    warnings: Vec<Error>,
    next_idx: u32,
    /// Camera make from IFD0, for makernote identification.
    make: Option<String>,
}

impl TiffReader<'_> {
    /// Read the directory at `base + offset` into `dir`; returns the
    /// raw next-IFD offset (0 if none or not chained).
    fn read_directory(
        &mut self,
        dir: &mut Directory,
        offset: usize,
        base: usize,
        bo: ByteOrder,
    ) -> Result<u32> {
        let abs = base
            .checked_add(offset)
            .filter(|&p| p < self.data.len())
            .ok_or_else(|| {
                Error::corrupted(format!("directory offset {offset} out of bounds"))
            })?;
        if !self.visited.insert(abs) {
            return Err(Error::corrupted(format!(
                "circular IFD reference at offset {abs}"
            )));
        }
        if self.visited.len() > self.budget {
            return Err(Error::corrupted("too many directories for input size"));
        }

        let count = u16_at(self.data, abs, bo)
            .ok_or_else(|| Error::corrupted("short read of directory entry count"))?;
        let entries_end = abs + 2 + usize::from(count) * 12;
        if entries_end > self.data.len() {
            return Err(Error::corrupted(format!(
                "directory at {abs} declares {count} entries but only {} bytes remain",
                self.data.len() - abs
            )));
        }

        for i in 0..usize::from(count) {
            let entry_pos = abs + 2 + i * 12;
            match self.read_entry(dir.group, entry_pos, base, bo) {
                Ok(node) => dir.components.push(node),
                Err(e) => {
                    debug!(group = %dir.group, entry = i, error = %e, "skipping entry");
                    self.warnings.push(e);
                }
            }
        }

        self.resolve_strips(dir, base, bo);

        if dir.has_next && entries_end + 4 <= self.data.len() {
            Ok(u32_at(self.data, entries_end, bo).unwrap_or(0))
        } else {
            Ok(0)
        }
    }

    fn read_entry(
        &mut self,
        group: IfdId,
        entry_pos: usize,
        base: usize,
        bo: ByteOrder,
    ) -> Result<TiffNode> {
        let tag = u16_at(self.data, entry_pos, bo).ok_or(Error::InputDataRead)?;
        let wire = u16_at(self.data, entry_pos + 2, bo).ok_or(Error::InputDataRead)?;
        let count = u32_at(self.data, entry_pos + 4, bo).ok_or(Error::InputDataRead)? as usize;
        let value_field = u32_at(self.data, entry_pos + 8, bo).ok_or(Error::InputDataRead)?;

        let type_id = TypeId::from_wire(wire)?;
        let mut size = count
            .checked_mul(type_id.size())
            .filter(|&s| s <= u32::MAX as usize)
            .ok_or_else(|| {
                Error::corrupted(format!("entry 0x{tag:04x}: value size overflows"))
            })?;

        // Values up to four bytes live in the offset field itself; the
        // field is only dereferenced for larger values.
        let value_pos = if size <= 4 {
            entry_pos + 8
        } else {
            let pos = base
                .checked_add(value_field as usize)
                .filter(|&p| p < self.data.len())
                .ok_or_else(|| {
                    Error::corrupted(format!(
                        "entry 0x{tag:04x}: value offset {value_field} out of bounds"
                    ))
                })?;
            if pos + size > self.data.len() {
                // A makernote whose declared length overruns the buffer
                // is clamped and probed anyway; everything else is
                // corrupt.
                if tag == tags::MAKER_NOTE {
                    debug!("makernote length clamped to end of buffer");
                    size = self.data.len() - pos;
                } else {
                    return Err(Error::corrupted(format!(
                        "entry 0x{tag:04x}: value range {pos}+{size} exceeds source length {}",
                        self.data.len()
                    )));
                }
            }
            pos
        };
        let data = self.data[value_pos..value_pos + size].to_vec();

        let mut node = creator::create(u32::from(tag), group);
        let value = Value::read(type_id, &data, count.min(size / type_id.size().max(1)), bo).ok();
        {
            let e = node.entry_data_mut().ok_or_else(|| {
                Error::corrupted(format!("entry 0x{tag:04x}: not an entry node"))
            })?;
            e.type_id = type_id;
            e.data = data;
            e.value = value;
            e.offset = value_pos as u32;
            e.idx = self.next_idx;
        }
        self.next_idx += 1;

        if group == IfdId::Ifd0 && tag == tags::MAKE {
            if let Some(make) = node.entry_data().and_then(|e| e.value.as_ref()).and_then(Value::as_str)
            {
                self.make = Some(make.to_string());
            }
        }

        match &mut node {
            TiffNode::SubIfd(sub) => {
                let offsets = sub.entry.value.as_ref().and_then(Value::u32_vec);
                if let Some(offsets) = offsets {
                    for (i, off) in offsets.into_iter().enumerate() {
                        // Some cameras write 0 for "no sub-IFD".
                        if off == 0 {
                            continue;
                        }
                        let child_group = if sub.child_group == IfdId::SubImage1 {
                            match IfdId::sub_image(i + 1) {
                                Some(g) => g,
                                None => {
                                    self.warnings.push(Error::corrupted(format!(
                                        "entry 0x{tag:04x}: more than 9 sub-images"
                                    )));
                                    break;
                                }
                            }
                        } else {
                            sub.child_group
                        };
                        let mut child = Directory::new(tag, child_group);
                        child.has_next = false;
                        match self.read_directory(&mut child, off as usize, base, bo) {
                            Ok(_) => sub.ifds.push(child),
                            Err(e) => self.warnings.push(e),
                        }
                    }
                } else {
                    self.warnings.push(Error::UnsupportedDataAreaOffsetType(
                        type_id.wire_code(),
                    ));
                }
            }
            TiffNode::MnEntry(mn) => {
                let make = self.make.clone().unwrap_or_default();
                if let Some(mut m) =
                    makernote::identify(tag, group, &make, &mn.entry.data, bo)
                {
                    m.image_byte_order = Some(bo);
                    m.mn_offset = value_pos;
                    let mn_bo = m.byte_order().unwrap_or(bo);
                    let mn_base = m.base_offset();
                    let ifd_abs = value_pos + m.header.ifd_offset();
                    let ifd_offset = ifd_abs.saturating_sub(mn_base);
                    match self.read_directory(&mut m.ifd, ifd_offset, mn_base, mn_bo) {
                        Ok(_) => mn.mn = Some(Box::new(m)),
                        Err(e) => {
                            // The makernote stays an opaque entry.
                            warn!(error = %e, "makernote IFD unreadable, keeping raw bytes");
                            self.warnings.push(e);
                        }
                    }
                }
            }
            _ => {}
        }

        Ok(node)
    }

    /// Attach data areas and strips to entries whose partner size
    /// entry lives in the same directory.
    fn resolve_strips(&mut self, dir: &mut Directory, base: usize, _bo: ByteOrder) {
        // Collect (component index, sizes) pairs first; the directory
        // cannot be mutated while searching it.
        let mut pending: Vec<(usize, Vec<u32>)> = Vec::new();
        for (i, c) in dir.components.iter().enumerate() {
            let (size_tag, size_group) = match c {
                TiffNode::DataEntry(e) => (e.size_tag, e.size_group),
                TiffNode::ImageEntry(e) => (e.size_tag, e.size_group),
                _ => continue,
            };
            let sizes = dir
                .child(size_tag, size_group)
                .and_then(TiffNode::entry_data)
                .and_then(|e| e.value.as_ref())
                .and_then(Value::u32_vec);
            if let Some(sizes) = sizes {
                pending.push((i, sizes));
            }
        }

        for (i, sizes) in pending {
            let (offsets, tag) = match &dir.components[i] {
                TiffNode::DataEntry(e) => (
                    e.entry.value.as_ref().and_then(Value::u32_vec),
                    e.entry.tag,
                ),
                TiffNode::ImageEntry(e) => (
                    e.entry.value.as_ref().and_then(Value::u32_vec),
                    e.entry.tag,
                ),
                _ => continue,
            };
            let Some(offsets) = offsets else {
                self.warnings
                    .push(Error::UnsupportedDataAreaOffsetType(0));
                continue;
            };
            if offsets.len() != sizes.len() {
                self.warnings.push(Error::corrupted(format!(
                    "entry 0x{tag:04x}: {} offsets but {} sizes",
                    offsets.len(),
                    sizes.len()
                )));
                continue;
            }
            if offsets.is_empty() {
                continue;
            }

            // Validate every strip against the source buffer.
            let mut in_bounds = true;
            for (&off, &sz) in offsets.iter().zip(&sizes) {
                let start = base.wrapping_add(off as usize);
                match start.checked_add(sz as usize) {
                    Some(end) if end <= self.data.len() => {}
                    _ => {
                        self.warnings.push(Error::corrupted(format!(
                            "entry 0x{tag:04x}: strip at {off}+{sz} exceeds source"
                        )));
                        in_bounds = false;
                        break;
                    }
                }
            }
            if !in_bounds {
                continue;
            }

            match &mut dir.components[i] {
                TiffNode::DataEntry(e) => {
                    // Data-entry strips are contiguous: the data area
                    // spans from the first offset over the summed
                    // sizes.
                    let first = base + offsets[0] as usize;
                    let total: usize = sizes.iter().map(|&s| s as usize).sum();
                    if first + total <= self.data.len() {
                        e.data_area = self.data[first..first + total].to_vec();
                    } else {
                        self.warnings.push(Error::corrupted(format!(
                            "entry 0x{tag:04x}: data area exceeds source"
                        )));
                    }
                }
                TiffNode::ImageEntry(e) => {
                    e.strips = offsets
                        .iter()
                        .zip(&sizes)
                        .map(|(&off, &sz)| {
                            let start = base + off as usize;
                            self.data[start..start + sz as usize].to_vec()
                        })
                        .collect();
                }
                _ => {}
            }
        }
    }
}

/// Decode all binary arrays in the tree, switching byte order at
/// makernote boundaries.
fn post_process(
    node: &mut TiffNode,
    crypt_keys: Option<(u32, u32)>,
    bo: ByteOrder,
    warnings: &mut Vec<Error>,
) {
    match node {
        TiffNode::Directory(dir) => {
            for c in &mut dir.components {
                post_process(c, crypt_keys, bo, warnings);
            }
            if let Some(next) = dir.next.as_deref_mut() {
                post_process(next, crypt_keys, bo, warnings);
            }
        }
        TiffNode::SubIfd(sub) => {
            for ifd in &mut sub.ifds {
                for c in &mut ifd.components {
                    post_process(c, crypt_keys, bo, warnings);
                }
            }
        }
        TiffNode::MnEntry(mn) => {
            if let Some(m) = mn.mn.as_deref_mut() {
                let mn_bo = m.byte_order().unwrap_or(bo);
                for c in &mut m.ifd.components {
                    post_process(c, crypt_keys, mn_bo, warnings);
                }
            }
        }
        TiffNode::BinaryArray(arr) => {
            if let Err(e) = array::decode_array(arr, crypt_keys, bo) {
                warnings.push(e);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderFormat;

    /// Build a little-endian TIFF with one IFD0 entry (Make = "Canon").
    fn minimal_tiff() -> Vec<u8> {
        let mut t = Vec::new();
        t.extend_from_slice(b"II");
        t.extend_from_slice(&42u16.to_le_bytes());
        t.extend_from_slice(&8u32.to_le_bytes());
        // IFD0: 1 entry.
        t.extend_from_slice(&1u16.to_le_bytes());
        t.extend_from_slice(&0x010Fu16.to_le_bytes()); // Make
        t.extend_from_slice(&2u16.to_le_bytes()); // ASCII
        t.extend_from_slice(&6u32.to_le_bytes());
        t.extend_from_slice(&26u32.to_le_bytes()); // value offset
        t.extend_from_slice(&0u32.to_le_bytes()); // next IFD
        t.extend_from_slice(b"Canon\0");
        t
    }

    fn read_ok(data: &[u8]) -> ReadResult {
        let header = TiffHeader::read(data, HeaderFormat::Standard).unwrap();
        read(data, &header, IfdId::Ifd0).unwrap()
    }

    #[test]
    fn parses_minimal_tiff() {
        let result = read_ok(&minimal_tiff());
        assert!(result.warnings.is_empty());
        let make = result.root.find(0x010F, IfdId::Ifd0).unwrap();
        let e = make.entry_data().unwrap();
        assert_eq!(e.value.as_ref().unwrap().as_str(), Some("Canon"));
        assert_eq!(e.offset, 26);
    }

    #[test]
    fn out_of_range_value_keeps_siblings() {
        let mut t = Vec::new();
        t.extend_from_slice(b"II");
        t.extend_from_slice(&42u16.to_le_bytes());
        t.extend_from_slice(&8u32.to_le_bytes());
        t.extend_from_slice(&2u16.to_le_bytes());
        // Good entry: Orientation = 1, inline.
        t.extend_from_slice(&0x0112u16.to_le_bytes());
        t.extend_from_slice(&3u16.to_le_bytes());
        t.extend_from_slice(&1u32.to_le_bytes());
        t.extend_from_slice(&1u32.to_le_bytes());
        // Bad entry: declared count 100 longs at the end of the file.
        t.extend_from_slice(&0x013Bu16.to_le_bytes());
        t.extend_from_slice(&4u16.to_le_bytes());
        t.extend_from_slice(&100u32.to_le_bytes());
        let bad_offset = (t.len() + 50) as u32;
        t.extend_from_slice(&bad_offset.to_le_bytes());
        t.extend_from_slice(&0u32.to_le_bytes());

        let result = read_ok(&t);
        assert!(!result.warnings.is_empty());
        assert!(matches!(
            result.warnings[0],
            Error::CorruptedMetadata(_)
        ));
        // The good sibling survived.
        assert!(result.root.find(0x0112, IfdId::Ifd0).is_some());
        assert!(result.root.find(0x013B, IfdId::Ifd0).is_none());
    }

    #[test]
    fn cyclic_ifd_chain_is_detected() {
        let mut t = Vec::new();
        t.extend_from_slice(b"II");
        t.extend_from_slice(&42u16.to_le_bytes());
        t.extend_from_slice(&8u32.to_le_bytes());
        // IFD0 with 0 entries, next pointer back to itself.
        t.extend_from_slice(&0u16.to_le_bytes());
        t.extend_from_slice(&8u32.to_le_bytes());

        let result = read_ok(&t);
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, Error::CorruptedMetadata(m) if m.contains("circular"))));
    }

    #[test]
    fn zero_count_entry_is_empty() {
        let mut t = Vec::new();
        t.extend_from_slice(b"II");
        t.extend_from_slice(&42u16.to_le_bytes());
        t.extend_from_slice(&8u32.to_le_bytes());
        t.extend_from_slice(&1u16.to_le_bytes());
        t.extend_from_slice(&0x0131u16.to_le_bytes()); // Software
        t.extend_from_slice(&2u16.to_le_bytes());
        t.extend_from_slice(&0u32.to_le_bytes()); // count 0
        t.extend_from_slice(&0u32.to_le_bytes());
        t.extend_from_slice(&0u32.to_le_bytes());

        let result = read_ok(&t);
        let e = result.root.find(0x0131, IfdId::Ifd0).unwrap();
        assert_eq!(e.entry_data().unwrap().size(), 0);
    }
}
