//! IPTC character-set resolution.
//!
//! Legacy IPTC text declares its encoding through an ISO 2022 escape
//! sequence stored in `Iptc.Envelope.CharacterSet`. The sequence is resolved
//! once per iteration pass and applied to every string decode in that pass;
//! anything absent, invalid or unrecognized falls back to ISO-8859-1, the
//! IPTC default.

use std::fmt;

use crate::entry::{MetadataEntry, RawContainer, RawValue};

/// Dataset holding the envelope's declared character set.
pub const CHARACTER_SET_KEY: &str = "Iptc.Envelope.CharacterSet";

/// Character encoding of text-bearing metadata components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Utf8,
    Utf16,
    Utf32,
    Ascii,
    #[default]
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_15,
}

/// ISO 2022 escape sequence → character set, compared against the whole
/// value of the envelope dataset.
static ESCAPE_SEQUENCES: &[(&[u8], CharacterSet)] = &[
    (b"\x1b%G", CharacterSet::Utf8),
    (b"\x1b%/I", CharacterSet::Utf8),
    (b"\x1b%/L", CharacterSet::Utf16),
    (b"\x1b%/F", CharacterSet::Utf32),
    (b"\x1b(B", CharacterSet::Ascii),
    (b"\x1b.A", CharacterSet::Iso8859_1),
    (b"\x1b.B", CharacterSet::Iso8859_2),
    (b"\x1b.C", CharacterSet::Iso8859_3),
    (b"\x1b.D", CharacterSet::Iso8859_4),
    (b"\x1b.F", CharacterSet::Iso8859_7),
    (b"\x1b.G", CharacterSet::Iso8859_6),
    (b"\x1b.H", CharacterSet::Iso8859_8),
    (b"\x1b/b", CharacterSet::Iso8859_15),
];

/// Resolves the character set an IPTC container's strings decode with.
///
/// Looks up the first `Iptc.Envelope.CharacterSet` entry; absent, invalid
/// or unrecognized sequences resolve to the ISO-8859-1 default rather than
/// failing.
pub fn resolve_character_set(container: &RawContainer) -> CharacterSet {
    let Some(entry) = container.find(CHARACTER_SET_KEY) else {
        return CharacterSet::default();
    };
    if !entry.valid {
        return CharacterSet::default();
    }
    let Some(marker) = marker_bytes(entry) else {
        return CharacterSet::default();
    };

    for &(sequence, charset) in ESCAPE_SEQUENCES {
        if marker == sequence {
            return charset;
        }
    }
    log::debug!("unrecognized character-set escape {marker:02x?}, using ISO-8859-1");
    CharacterSet::default()
}

fn marker_bytes(entry: &MetadataEntry) -> Option<&[u8]> {
    match &entry.value {
        RawValue::Text(components) => components.first().map(Vec::as_slice),
        RawValue::Bytes(bytes) => Some(bytes),
        _ => None,
    }
}

impl CharacterSet {
    /// Decodes raw component bytes into a host string, lossily.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            CharacterSet::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            CharacterSet::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            // Latin-1 maps bytes straight onto the first 256 code points;
            // encoding_rs would substitute windows-1252 here.
            CharacterSet::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
            CharacterSet::Iso8859_2 => decode_with(encoding_rs::ISO_8859_2, bytes),
            CharacterSet::Iso8859_3 => decode_with(encoding_rs::ISO_8859_3, bytes),
            CharacterSet::Iso8859_4 => decode_with(encoding_rs::ISO_8859_4, bytes),
            CharacterSet::Iso8859_6 => decode_with(encoding_rs::ISO_8859_6, bytes),
            CharacterSet::Iso8859_7 => decode_with(encoding_rs::ISO_8859_7, bytes),
            CharacterSet::Iso8859_8 => decode_with(encoding_rs::ISO_8859_8, bytes),
            CharacterSet::Iso8859_15 => decode_with(encoding_rs::ISO_8859_15, bytes),
            CharacterSet::Utf16 => decode_with(encoding_rs::UTF_16BE, bytes),
            CharacterSet::Utf32 => decode_utf32(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::Utf8 => "UTF-8",
            CharacterSet::Utf16 => "UTF-16",
            CharacterSet::Utf32 => "UTF-32",
            CharacterSet::Ascii => "US-ASCII",
            CharacterSet::Iso8859_1 => "ISO-8859-1",
            CharacterSet::Iso8859_2 => "ISO-8859-2",
            CharacterSet::Iso8859_3 => "ISO-8859-3",
            CharacterSet::Iso8859_4 => "ISO-8859-4",
            CharacterSet::Iso8859_6 => "ISO-8859-6",
            CharacterSet::Iso8859_7 => "ISO-8859-7",
            CharacterSet::Iso8859_8 => "ISO-8859-8",
            CharacterSet::Iso8859_15 => "ISO-8859-15",
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_with(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

// encoding_rs has no UTF-32. A BOM selects the byte order; IPTC data
// without one reads as big-endian.
fn decode_utf32(bytes: &[u8]) -> String {
    let (little_endian, body) = match bytes {
        [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => (false, rest),
        [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => (true, rest),
        _ => (false, bytes),
    };
    body.chunks(4)
        .map(|chunk| {
            let mut quad = [0u8; 4];
            quad[..chunk.len()].copy_from_slice(chunk);
            let scalar = if little_endian {
                u32::from_le_bytes(quad)
            } else {
                u32::from_be_bytes(quad)
            };
            char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;

    fn charset_entry(marker: &[u8]) -> MetadataEntry {
        MetadataEntry::new(
            CHARACTER_SET_KEY,
            TypeTag::IptcString,
            RawValue::Text(vec![marker.to_vec()]),
        )
    }

    fn container_with(marker: &[u8]) -> RawContainer {
        let mut c = RawContainer::default();
        c.push(charset_entry(marker));
        c
    }

    #[test]
    fn absent_marker_defaults_to_latin1() {
        assert_eq!(
            resolve_character_set(&RawContainer::default()),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn invalid_marker_defaults_to_latin1() {
        let mut c = RawContainer::default();
        let mut entry = charset_entry(b"\x1b%G");
        entry.valid = false;
        c.push(entry);
        assert_eq!(resolve_character_set(&c), CharacterSet::Iso8859_1);
    }

    #[test]
    fn every_escape_sequence_resolves() {
        for &(sequence, expected) in ESCAPE_SEQUENCES {
            assert_eq!(
                resolve_character_set(&container_with(sequence)),
                expected,
                "sequence {sequence:02x?}"
            );
        }
    }

    #[test]
    fn unrecognized_sequence_defaults_to_latin1() {
        assert_eq!(
            resolve_character_set(&container_with(b"\x1b$B")),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn latin1_decodes_high_bytes_directly() {
        // 0xE9 is é in ISO-8859-1.
        assert_eq!(CharacterSet::Iso8859_1.decode(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }

    #[test]
    fn latin1_is_not_windows_1252() {
        // 0x80 is a C1 control in Latin-1, € in windows-1252.
        assert_eq!(CharacterSet::Iso8859_1.decode(&[0x80]), "\u{80}");
    }

    #[test]
    fn iso8859_7_decodes_greek() {
        // 0xE1 is α in ISO-8859-7.
        assert_eq!(CharacterSet::Iso8859_7.decode(&[0xE1]), "α");
    }

    #[test]
    fn utf16_big_endian_and_bom() {
        assert_eq!(CharacterSet::Utf16.decode(&[0x00, 0x41, 0x00, 0x42]), "AB");
        // Little-endian BOM flips the byte order.
        assert_eq!(CharacterSet::Utf16.decode(&[0xFF, 0xFE, 0x41, 0x00]), "A");
    }

    #[test]
    fn utf32_decodes_scalars() {
        assert_eq!(
            CharacterSet::Utf32.decode(&[0x00, 0x00, 0x00, 0x41, 0x00, 0x01, 0xF6, 0x00]),
            "A\u{1F600}"
        );
    }

    #[test]
    fn ascii_replaces_high_bytes() {
        assert_eq!(CharacterSet::Ascii.decode(b"ok\xFF"), "ok\u{FFFD}");
    }
}
