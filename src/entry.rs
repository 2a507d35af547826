//! Raw metadata model.
//!
//! This is the shape the codec layer reads and writes: typed component
//! storage plus the ordered, duplicate-keyed containers the three
//! namespaces share. Decoded host values are produced from this model by
//! [`crate::decode`]; they are copies, never aliases into raw storage.

use serde::{Deserialize, Serialize};

use crate::encoding::CharacterSet;
use crate::types::{Rational, SRational, TypeTag};

/// Typed component storage of one metadata entry.
///
/// All unsigned integer widths share one `u64` store so a 64-bit unsigned
/// value never loses magnitude; the wire width lives in the entry's
/// [`TypeTag`]. Text-bearing variants keep raw bytes and are decoded with
/// the character set of the current iteration pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Unsigned(Vec<u64>),
    Signed(Vec<i64>),
    Real(Vec<f64>),
    Rationals(Vec<Rational>),
    SignedRationals(Vec<SRational>),
    /// One byte string per component.
    Text(Vec<Vec<u8>>),
    /// Language-alternative pairs: (language tag, encoded text).
    LangAlt(Vec<(String, Vec<u8>)>),
    /// Opaque whole-value blob; the component count is its byte length.
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Number of indexable components.
    pub fn count(&self) -> usize {
        match self {
            RawValue::Unsigned(v) => v.len(),
            RawValue::Signed(v) => v.len(),
            RawValue::Real(v) => v.len(),
            RawValue::Rationals(v) => v.len(),
            RawValue::SignedRationals(v) => v.len(),
            RawValue::Text(v) => v.len(),
            RawValue::LangAlt(v) => v.len(),
            RawValue::Bytes(v) => v.len(),
        }
    }

    pub fn to_unsigned(&self, i: usize) -> Option<u64> {
        match self {
            RawValue::Unsigned(v) => v.get(i).copied(),
            _ => None,
        }
    }

    pub fn to_signed(&self, i: usize) -> Option<i64> {
        match self {
            RawValue::Signed(v) => v.get(i).copied(),
            _ => None,
        }
    }

    pub fn to_real(&self, i: usize) -> Option<f64> {
        match self {
            RawValue::Real(v) => v.get(i).copied(),
            _ => None,
        }
    }

    pub fn to_rational(&self, i: usize) -> Option<Rational> {
        match self {
            RawValue::Rationals(v) => v.get(i).copied(),
            _ => None,
        }
    }

    pub fn to_signed_rational(&self, i: usize) -> Option<SRational> {
        match self {
            RawValue::SignedRationals(v) => v.get(i).copied(),
            _ => None,
        }
    }

    /// String form of one component, decoding text bytes with `charset`.
    pub fn component_string(&self, i: usize, charset: CharacterSet) -> Option<String> {
        match self {
            RawValue::Unsigned(v) => v.get(i).map(u64::to_string),
            RawValue::Signed(v) => v.get(i).map(i64::to_string),
            RawValue::Real(v) => v.get(i).map(f64::to_string),
            RawValue::Rationals(v) => v.get(i).map(Rational::to_string),
            RawValue::SignedRationals(v) => v.get(i).map(SRational::to_string),
            RawValue::Text(v) => v.get(i).map(|bytes| charset.decode(bytes)),
            RawValue::LangAlt(v) => v.get(i).map(|(_, bytes)| charset.decode(bytes)),
            RawValue::Bytes(v) => v.get(i).map(|b| b.to_string()),
        }
    }

    /// String form of the whole value. Multi-component values join with a
    /// space; an opaque blob decodes in one piece.
    pub fn whole_string(&self, charset: CharacterSet) -> String {
        if let RawValue::Bytes(bytes) = self {
            return charset.decode(bytes);
        }
        let mut out = String::new();
        for i in 0..self.count() {
            if i > 0 {
                out.push(' ');
            }
            if let Some(part) = self.component_string(i, charset) {
                out.push_str(&part);
            }
        }
        out
    }
}

/// One record in a namespace container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub tag: TypeTag,
    pub value: RawValue,
    /// Cleared by the codec when a component is malformed; invalid entries
    /// are skipped or defaulted per field semantics.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, tag: TypeTag, value: RawValue) -> Self {
        Self {
            key: key.into(),
            tag,
            value,
            valid: true,
        }
    }

    /// Number of indexable components in the value.
    pub fn count(&self) -> usize {
        self.value.count()
    }
}

/// Ordered, key-addressable collection of entries for one namespace.
///
/// Insertion order is preserved and keys are not required to be unique;
/// repeatable IPTC datasets legitimately appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContainer {
    entries: Vec<MetadataEntry>,
}

impl RawContainer {
    pub fn push(&mut self, entry: MetadataEntry) {
        self.entries.push(entry);
    }

    /// First entry with the given key.
    pub fn find(&self, key: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Removes the first entry with the given key. Returns whether one was
    /// removed.
    pub fn delete_first(&mut self, key: &str) -> bool {
        match self.entries.iter().position(|e| e.key == key) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Replaces the first entry with the same key, or appends. This is the
    /// XMP assignment shape: one value per key path.
    pub fn assign(&mut self, entry: MetadataEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three namespace containers of one image, as read or written by a
/// codec in a single unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetadata {
    pub exif: RawContainer,
    pub iptc: RawContainer,
    pub xmp: RawContainer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(text: &str) -> MetadataEntry {
        MetadataEntry::new(
            "Iptc.Application2.Keywords",
            TypeTag::IptcString,
            RawValue::Text(vec![text.as_bytes().to_vec()]),
        )
    }

    #[test]
    fn delete_first_removes_only_the_first_duplicate() {
        let mut c = RawContainer::default();
        c.push(keyword("sunset"));
        c.push(keyword("beach"));

        assert!(c.delete_first("Iptc.Application2.Keywords"));
        assert_eq!(c.len(), 1);
        let left = c.find("Iptc.Application2.Keywords").unwrap();
        assert_eq!(left.value, RawValue::Text(vec![b"beach".to_vec()]));

        assert!(c.delete_first("Iptc.Application2.Keywords"));
        assert!(!c.delete_first("Iptc.Application2.Keywords"));
    }

    #[test]
    fn assign_replaces_in_place() {
        let mut c = RawContainer::default();
        c.push(MetadataEntry::new(
            "Xmp.dc.title",
            TypeTag::XmpText,
            RawValue::Text(vec![b"old".to_vec()]),
        ));
        c.push(keyword("other"));

        c.assign(MetadataEntry::new(
            "Xmp.dc.title",
            TypeTag::XmpText,
            RawValue::Text(vec![b"new".to_vec()]),
        ));
        assert_eq!(c.len(), 2);
        assert_eq!(
            c.find("Xmp.dc.title").unwrap().value,
            RawValue::Text(vec![b"new".to_vec()])
        );
    }

    #[test]
    fn whole_string_joins_components() {
        let v = RawValue::Rationals(vec![Rational::new(40, 1), Rational::new(26, 1)]);
        assert_eq!(v.whole_string(CharacterSet::Utf8), "40/1 26/1");
    }

    #[test]
    fn bytes_count_is_byte_length() {
        let v = RawValue::Bytes(b"abc".to_vec());
        assert_eq!(v.count(), 3);
        assert_eq!(v.whole_string(CharacterSet::Utf8), "abc");
    }

    #[test]
    fn entry_roundtrips_through_json() {
        let entry = keyword("snow");
        let json = serde_json::to_string(&entry).unwrap();
        let back: MetadataEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert!(back.valid);
    }
}
