//! Tree traversal.
//!
//! Operations over the composite tree implement [`TiffVisitor`]; nodes
//! double-dispatch through [`accept`]. A visitor carries go-flags:
//! clearing [`Go::Traverse`] aborts the walk, [`Go::KnownMakernote`] is
//! cleared while inside an identified makernote so that the decoder
//! skips the placeholder MakerNote entry.

use crate::node::{
    BinaryArray, BinaryElement, DataEntry, Directory, Entry, IfdMakernote, ImageEntry, MnEntry,
    SizeEntry, SubIfd, TiffNode,
};
use exifkit_core::Result;

/// Traversal control flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Go {
    /// Keep walking. Cleared to abort the traversal.
    Traverse,
    /// Set while the walk is outside an identified makernote.
    KnownMakernote,
}

/// Visitor over the composite tree. All callbacks default to no-ops;
/// implement the ones the operation needs.
pub trait TiffVisitor {
    /// Check a go-flag; traversal stops when `Traverse` turns false.
    fn go(&self, _flag: Go) -> bool {
        true
    }

    fn visit_entry(&mut self, _entry: &Entry) -> Result<()> {
        Ok(())
    }
    fn visit_data_entry(&mut self, _entry: &DataEntry) -> Result<()> {
        Ok(())
    }
    fn visit_image_entry(&mut self, _entry: &ImageEntry) -> Result<()> {
        Ok(())
    }
    fn visit_size_entry(&mut self, _entry: &SizeEntry) -> Result<()> {
        Ok(())
    }
    fn visit_directory(&mut self, _dir: &Directory) -> Result<()> {
        Ok(())
    }
    fn visit_sub_ifd(&mut self, _sub: &SubIfd) -> Result<()> {
        Ok(())
    }
    fn visit_mn_entry(&mut self, _mn: &MnEntry) -> Result<()> {
        Ok(())
    }
    fn visit_ifd_makernote(&mut self, _mn: &IfdMakernote) -> Result<()> {
        Ok(())
    }
    fn visit_binary_array(&mut self, _array: &BinaryArray) -> Result<()> {
        Ok(())
    }
    fn visit_binary_element(&mut self, _element: &BinaryElement) -> Result<()> {
        Ok(())
    }
}

/// Walk `node` and its subtree in document order, aborting when the
/// visitor clears its `Traverse` flag or a callback fails.
pub fn accept<V: TiffVisitor>(node: &TiffNode, visitor: &mut V) -> Result<()> {
    if !visitor.go(Go::Traverse) {
        return Ok(());
    }
    match node {
        TiffNode::Directory(dir) => {
            visitor.visit_directory(dir)?;
            accept_directory(dir, visitor)?;
        }
        TiffNode::Entry(e) => visitor.visit_entry(e)?,
        TiffNode::DataEntry(e) => visitor.visit_data_entry(e)?,
        TiffNode::ImageEntry(e) => visitor.visit_image_entry(e)?,
        TiffNode::SizeEntry(e) => visitor.visit_size_entry(e)?,
        TiffNode::SubIfd(sub) => {
            visitor.visit_sub_ifd(sub)?;
            for ifd in &sub.ifds {
                if !visitor.go(Go::Traverse) {
                    return Ok(());
                }
                visitor.visit_directory(ifd)?;
                accept_directory(ifd, visitor)?;
            }
        }
        TiffNode::MnEntry(mn) => {
            visitor.visit_mn_entry(mn)?;
            if let Some(m) = mn.mn.as_deref() {
                visitor.visit_ifd_makernote(m)?;
                visitor.visit_directory(&m.ifd)?;
                accept_directory(&m.ifd, visitor)?;
            }
        }
        TiffNode::Makernote(m) => {
            visitor.visit_ifd_makernote(m)?;
            visitor.visit_directory(&m.ifd)?;
            accept_directory(&m.ifd, visitor)?;
        }
        TiffNode::BinaryArray(arr) => {
            visitor.visit_binary_array(arr)?;
            for el in &arr.elements {
                accept(el, visitor)?;
            }
        }
        TiffNode::BinaryElement(el) => visitor.visit_binary_element(el)?,
    }
    Ok(())
}

fn accept_directory<V: TiffVisitor>(dir: &Directory, visitor: &mut V) -> Result<()> {
    for c in &dir.components {
        if !visitor.go(Go::Traverse) {
            return Ok(());
        }
        accept(c, visitor)?;
    }
    if let Some(next) = dir.next.as_deref() {
        if visitor.go(Go::Traverse) {
            accept(next, visitor)?;
        }
    }
    Ok(())
}
