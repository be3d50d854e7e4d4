//! Core types and primitives for Exif/TIFF metadata handling.
//!
//! This crate provides the building blocks shared by the TIFF engine and
//! the container front-ends:
//!
//! - [`ByteOrder`] - big/little endian codec for all multi-byte primitives
//! - [`TypeId`] - Exif wire types (1..13) plus library-internal types
//! - [`Value`] - tagged sum of typed Exif values, parse and serialize
//! - [`URational`] / [`SRational`] - rational number pairs
//! - [`Error`] - the complete error-kind set of the library
//!
//! # Example
//!
//! ```
//! use exifkit_core::{ByteOrder, TypeId, Value};
//!
//! let raw = [0x2A, 0x00];
//! let v = Value::read(TypeId::UnsignedShort, &raw, 1, ByteOrder::Little).unwrap();
//! assert_eq!(v.as_u32(), Some(42));
//! assert_eq!(v.to_bytes(ByteOrder::Little), raw);
//! ```

mod byte_order;
pub mod comment;
mod error;
mod types;
mod value;

pub use byte_order::{u16_at, u32_at, ByteOrder};
pub use comment::{Charset, Comment};
pub use error::{Error, Result};
pub use types::TypeId;
pub use value::{SRational, URational, Value};
