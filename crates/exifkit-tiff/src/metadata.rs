//! User-level metadata: keys, datums and the ExifData container.
//!
//! Keys follow the `Exif.<Group>.<Name>` syntax, e.g.
//! `Exif.Image.Artist` or `Exif.Nikon3.ShutterCount`. A datum pairs a
//! key with a typed value and, for entries that reference ancillary
//! bytes (the JPEG thumbnail), an optional data area.

use exifkit_core::{Error, Result, TypeId, Value};
use exifkit_tags::IfdId;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::str::FromStr;

/// Identifies one metadatum: a tag within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct ExifKey {
    pub tag: u16,
    pub group: IfdId,
}

impl ExifKey {
    pub const fn new(tag: u16, group: IfdId) -> Self {
        Self { tag, group }
    }

    /// The tag's name from the registry, `0xNNNN` if unknown.
    pub fn tag_name(&self) -> String {
        exifkit_tags::tag_name(self.tag, self.group)
    }
}

impl std::fmt::Display for ExifKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", exifkit_tags::format_key(self.tag, self.group))
    }
}

impl FromStr for ExifKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, group) = exifkit_tags::parse_key(s)
            .ok_or_else(|| Error::corrupted(format!("invalid Exif key '{s}'")))?;
        Ok(Self { tag, group })
    }
}

/// One metadatum: key, value and optional data area.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExifDatum {
    pub key: ExifKey,
    pub value: Value,
    /// Ancillary bytes referenced by the value (e.g. thumbnail data
    /// behind `JPEGInterchangeFormat`).
    pub data_area: Option<Vec<u8>>,
}

impl ExifDatum {
    pub fn new(key: ExifKey, value: Value) -> Self {
        Self {
            key,
            value,
            data_area: None,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.value.type_id()
    }
}

/// Ordered collection of Exif metadata, the decoder's output and the
/// encoder's input.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ExifData {
    data: Vec<ExifDatum>,
}

impl ExifData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing datum for the key.
    pub fn set(&mut self, key: ExifKey, value: Value) -> &mut ExifDatum {
        if let Some(pos) = self.data.iter().position(|d| d.key == key) {
            self.data[pos].value = value;
            &mut self.data[pos]
        } else {
            self.data.push(ExifDatum::new(key, value));
            self.data.last_mut().expect("just pushed")
        }
    }

    /// Set a datum by `Exif.<Group>.<Name>` key string.
    pub fn set_by_name(&mut self, key: &str, value: Value) -> Result<&mut ExifDatum> {
        let key = ExifKey::from_str(key)?;
        Ok(self.set(key, value))
    }

    pub fn get(&self, key: ExifKey) -> Option<&ExifDatum> {
        self.data.iter().find(|d| d.key == key)
    }

    /// Look up a datum by `Exif.<Group>.<Name>` key string.
    pub fn get_by_name(&self, key: &str) -> Option<&ExifDatum> {
        let key = ExifKey::from_str(key).ok()?;
        self.get(key)
    }

    pub fn contains(&self, key: ExifKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove the datum for `key`, returning it if present.
    pub fn remove(&mut self, key: ExifKey) -> Option<ExifDatum> {
        let pos = self.data.iter().position(|d| d.key == key)?;
        Some(self.data.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExifDatum> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExifData {
    type Item = &'a ExifDatum;
    type IntoIter = std::slice::Iter<'a, ExifDatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for ExifData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for d in &self.data {
            map.serialize_entry(&d.key.to_string(), &d.value.to_string())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parse_and_display() {
        let key: ExifKey = "Exif.Image.Artist".parse().unwrap();
        assert_eq!(key, ExifKey::new(0x013B, IfdId::Ifd0));
        assert_eq!(key.to_string(), "Exif.Image.Artist");
        assert_eq!(key.tag_name(), "Artist");
    }

    #[test]
    fn set_replaces_existing() {
        let mut exif = ExifData::new();
        exif.set_by_name("Exif.Image.Make", Value::Ascii("A".into()))
            .unwrap();
        exif.set_by_name("Exif.Image.Make", Value::Ascii("B".into()))
            .unwrap();
        assert_eq!(exif.len(), 1);
        assert_eq!(
            exif.get_by_name("Exif.Image.Make").unwrap().value.as_str(),
            Some("B")
        );
    }

    #[test]
    fn remove_returns_datum() {
        let mut exif = ExifData::new();
        exif.set_by_name("Exif.Photo.ISOSpeedRatings", Value::UShort(vec![400]))
            .unwrap();
        let key = ExifKey::new(0x8827, IfdId::ExifIfd);
        let removed = exif.remove(key).unwrap();
        assert_eq!(removed.value, Value::UShort(vec![400]));
        assert!(exif.is_empty());
    }

    #[test]
    fn serializes_to_json_map() {
        let mut exif = ExifData::new();
        exif.set_by_name("Exif.Image.Make", Value::Ascii("Canon".into()))
            .unwrap();
        let json = serde_json::to_string(&exif).unwrap();
        assert_eq!(json, r#"{"Exif.Image.Make":"Canon"}"#);
    }
}
