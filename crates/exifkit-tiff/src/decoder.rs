//! Tree-to-metadata decoding.
//!
//! [`TiffDecoder`] walks a parsed composite tree and emits user-level
//! [`ExifData`]: one datum per leaf entry, keyed by tag and group.
//! Identified makernotes contribute their decoded entries instead of
//! the raw MakerNote blob; decoded binary arrays contribute their
//! elements.

use crate::metadata::{ExifData, ExifDatum, ExifKey};
use crate::node::{BinaryArray, BinaryElement, DataEntry, Entry, ImageEntry, MnEntry, SizeEntry, TiffNode};
use crate::visitor::{accept, TiffVisitor};
use exifkit_core::{ByteOrder, Comment, Result, Value};
use exifkit_tags::{exif::tags, IfdId};

/// Decode a parsed tree into user-level metadata.
pub fn decode(root: &TiffNode, byte_order: ByteOrder) -> Result<ExifData> {
    let mut decoder = TiffDecoder {
        exif: ExifData::new(),
        byte_order,
    };
    accept(root, &mut decoder)?;
    Ok(decoder.exif)
}

struct TiffDecoder {
    exif: ExifData,
    byte_order: ByteOrder,
}

impl TiffDecoder {
    fn emit(&mut self, tag: u16, group: IfdId, value: Value) -> &mut ExifDatum {
        self.exif.set(ExifKey::new(tag, group), value)
    }

    /// The stored value of an entry, re-interpreted where the registry
    /// knows a richer internal type (user comments).
    fn entry_value(&self, e: &crate::node::EntryData) -> Option<Value> {
        let value = e.value.clone()?;
        if e.tag == tags::USER_COMMENT && e.group == IfdId::ExifIfd {
            if let Some(bytes) = value.as_bytes() {
                return Some(Value::Comment(Comment::from_bytes(bytes, self.byte_order)));
            }
        }
        Some(value)
    }
}

impl TiffVisitor for TiffDecoder {
    fn visit_entry(&mut self, entry: &Entry) -> Result<()> {
        if let Some(v) = self.entry_value(&entry.entry) {
            self.emit(entry.entry.tag, entry.entry.group, v);
        }
        Ok(())
    }

    fn visit_data_entry(&mut self, entry: &DataEntry) -> Result<()> {
        if let Some(v) = entry.entry.value.clone() {
            let datum = self.emit(entry.entry.tag, entry.entry.group, v);
            if !entry.data_area.is_empty() {
                datum.data_area = Some(entry.data_area.clone());
            }
        }
        Ok(())
    }

    fn visit_image_entry(&mut self, entry: &ImageEntry) -> Result<()> {
        if let Some(v) = entry.entry.value.clone() {
            self.emit(entry.entry.tag, entry.entry.group, v);
        }
        Ok(())
    }

    fn visit_size_entry(&mut self, entry: &SizeEntry) -> Result<()> {
        if let Some(v) = entry.entry.value.clone() {
            self.emit(entry.entry.tag, entry.entry.group, v);
        }
        Ok(())
    }

    fn visit_mn_entry(&mut self, mn: &MnEntry) -> Result<()> {
        // An identified makernote is decoded through its nested IFD;
        // only unidentified blobs surface as the raw MakerNote tag.
        if mn.mn.is_none() {
            if let Some(v) = mn.entry.value.clone() {
                self.emit(mn.entry.tag, mn.entry.group, v);
            }
        }
        Ok(())
    }

    fn visit_binary_array(&mut self, array: &BinaryArray) -> Result<()> {
        if !array.decoded {
            if let Some(v) = array.entry.value.clone() {
                self.emit(array.entry.tag, array.entry.group, v);
            }
        }
        Ok(())
    }

    fn visit_binary_element(&mut self, element: &BinaryElement) -> Result<()> {
        if let Some(v) = element.entry.value.clone() {
            self.emit(element.entry.tag, element.entry.group, v);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Directory, EntryData};
    use exifkit_core::TypeId;

    #[test]
    fn decodes_plain_entries() {
        let mut dir = Directory::new(0, IfdId::Ifd0);
        let mut e = EntryData::new(0x010F, IfdId::Ifd0, TypeId::AsciiString);
        e.set_value(Value::Ascii("Canon".into()), ByteOrder::Little);
        dir.components.push(TiffNode::Entry(Entry { entry: e }));
        let root = TiffNode::Directory(dir);

        let exif = decode(&root, ByteOrder::Little).unwrap();
        assert_eq!(
            exif.get_by_name("Exif.Image.Make").unwrap().value.as_str(),
            Some("Canon")
        );
    }

    #[test]
    fn user_comment_becomes_comment_value() {
        let mut dir = Directory::new(0, IfdId::ExifIfd);
        let mut e = EntryData::new(tags::USER_COMMENT, IfdId::ExifIfd, TypeId::Undefined);
        let mut raw = b"ASCII\0\0\0hello".to_vec();
        e.set_value(Value::Undefined(std::mem::take(&mut raw)), ByteOrder::Little);
        dir.components.push(TiffNode::Entry(Entry { entry: e }));
        let root = TiffNode::Directory(dir);

        let exif = decode(&root, ByteOrder::Little).unwrap();
        let datum = exif.get_by_name("Exif.Photo.UserComment").unwrap();
        assert!(matches!(&datum.value, Value::Comment(c) if c.text() == "hello"));
    }
}
