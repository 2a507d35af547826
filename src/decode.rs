//! Value decoding: raw entry → semantic value.

use chrono::{NaiveDate, NaiveTime};

use crate::encoding::CharacterSet;
use crate::entry::{MetadataEntry, RawValue};
use crate::error::MetadataError;
use crate::types::TypeTag;
use crate::value::SemanticValue;

/// Decodes one entry into its semantic value.
///
/// Returns `Ok(None)` for entries that are not yielded during iteration:
/// a component count of zero, or storage that does not match the entry's
/// type tag. Date and time entries whose text does not parse are the one
/// recoverable per-entry error; iteration surfaces them without aborting
/// the pass.
pub fn decode_entry(
    entry: &MetadataEntry,
    charset: CharacterSet,
) -> Result<Option<SemanticValue>, MetadataError> {
    if entry.count() == 0 {
        return Ok(None);
    }

    let decoded = match entry.tag {
        TypeTag::UnsignedByte
        | TypeTag::UnsignedShort
        | TypeTag::UnsignedLong
        | TypeTag::UnsignedLongLong
        | TypeTag::TiffIfd
        | TypeTag::TiffIfd8 => entry.value.to_unsigned(0).map(SemanticValue::UInt),

        TypeTag::SignedByte
        | TypeTag::SignedShort
        | TypeTag::SignedLong
        | TypeTag::SignedLongLong => entry.value.to_signed(0).map(SemanticValue::Int),

        TypeTag::Float | TypeTag::Double => entry.value.to_real(0).map(SemanticValue::Float),

        TypeTag::Date => Some(SemanticValue::Date(parse_date(entry, charset)?)),
        TypeTag::Time => Some(SemanticValue::Time(parse_time(entry, charset)?)),

        TypeTag::UnsignedRational => entry.value.to_rational(0).map(SemanticValue::Rational),
        TypeTag::SignedRational => entry
            .value
            .to_signed_rational(0)
            .map(SemanticValue::SignedRational),

        TypeTag::LangAlt => decode_lang_alt(entry, charset),

        TypeTag::XmpBag | TypeTag::XmpSeq => Some(SemanticValue::List(
            (0..entry.count())
                .filter_map(|i| entry.value.component_string(i, charset))
                .collect(),
        )),

        // Opaque blobs decode from the whole value, not per component.
        TypeTag::Undefined => Some(SemanticValue::Text(entry.value.whole_string(charset))),

        TypeTag::AsciiString | TypeTag::IptcString | TypeTag::XmpText | TypeTag::XmpAlt => entry
            .value
            .component_string(0, charset)
            .map(SemanticValue::Text),
    };

    if decoded.is_none() {
        log::debug!(
            "skipping {}: storage does not match type {}",
            entry.key,
            entry.tag
        );
    }
    Ok(decoded)
}

fn decode_lang_alt(entry: &MetadataEntry, charset: CharacterSet) -> Option<SemanticValue> {
    let RawValue::LangAlt(pairs) = &entry.value else {
        return None;
    };
    // The common single-value case collapses to a plain string.
    if let [(lang, text)] = pairs.as_slice() {
        if lang == "x-default" {
            return Some(SemanticValue::Text(charset.decode(text)));
        }
    }
    Some(SemanticValue::LangAlt(
        pairs
            .iter()
            .map(|(lang, text)| (lang.clone(), charset.decode(text)))
            .collect(),
    ))
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y:%m:%d", "%Y%m%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%:z", "%H%M%S"];

/// Tries each observed date spelling in turn.
pub(crate) fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

pub(crate) fn parse_time_str(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

fn parse_date(entry: &MetadataEntry, charset: CharacterSet) -> Result<NaiveDate, MetadataError> {
    let text = entry.value.whole_string(charset);
    parse_date_str(&text).ok_or_else(|| MetadataError::ValueParse {
        key: entry.key.clone(),
        expected: TypeTag::Date,
        text,
    })
}

fn parse_time(entry: &MetadataEntry, charset: CharacterSet) -> Result<NaiveTime, MetadataError> {
    let text = entry.value.whole_string(charset);
    parse_time_str(&text).ok_or_else(|| MetadataError::ValueParse {
        key: entry.key.clone(),
        expected: TypeTag::Time,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rational, SRational};
    use assert_matches::assert_matches;

    fn entry(key: &str, tag: TypeTag, value: RawValue) -> MetadataEntry {
        MetadataEntry::new(key, tag, value)
    }

    fn decode(tag: TypeTag, value: RawValue) -> Option<SemanticValue> {
        decode_entry(&entry("Test.Key.Name", tag, value), CharacterSet::Utf8).unwrap()
    }

    #[test]
    fn empty_entries_are_skipped() {
        assert_eq!(decode(TypeTag::UnsignedShort, RawValue::Unsigned(vec![])), None);
        assert_eq!(decode(TypeTag::IptcString, RawValue::Text(vec![])), None);
    }

    #[test]
    fn unsigned_keeps_full_64_bit_magnitude() {
        let v = decode(
            TypeTag::UnsignedLongLong,
            RawValue::Unsigned(vec![u64::MAX]),
        );
        assert_eq!(v, Some(SemanticValue::UInt(u64::MAX)));
    }

    #[test]
    fn scalar_entries_decode_component_zero() {
        assert_eq!(
            decode(TypeTag::SignedShort, RawValue::Signed(vec![-12, 99])),
            Some(SemanticValue::Int(-12))
        );
        assert_eq!(
            decode(TypeTag::Double, RawValue::Real(vec![2.5])),
            Some(SemanticValue::Float(2.5))
        );
        assert_eq!(
            decode(TypeTag::TiffIfd, RawValue::Unsigned(vec![8])),
            Some(SemanticValue::UInt(8))
        );
    }

    #[test]
    fn rationals_keep_their_parts() {
        assert_eq!(
            decode(
                TypeTag::UnsignedRational,
                RawValue::Rationals(vec![Rational::new(3, 4)])
            ),
            Some(SemanticValue::Rational(Rational::new(3, 4)))
        );
        assert_eq!(
            decode(
                TypeTag::SignedRational,
                RawValue::SignedRationals(vec![SRational::new(-1, 3)])
            ),
            Some(SemanticValue::SignedRational(SRational::new(-1, 3)))
        );
    }

    #[test]
    fn dates_parse_in_all_observed_spellings() {
        for spelling in ["2024-01-15", "2024:01:15", "20240115"] {
            let v = decode(
                TypeTag::Date,
                RawValue::Text(vec![spelling.as_bytes().to_vec()]),
            );
            assert_eq!(
                v,
                Some(SemanticValue::Date(
                    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
                )),
                "spelling {spelling}"
            );
        }
    }

    #[test]
    fn unparseable_date_is_a_per_entry_error() {
        let e = entry(
            "Iptc.Application2.DateCreated",
            TypeTag::Date,
            RawValue::Text(vec![b"not a date".to_vec()]),
        );
        assert_matches!(
            decode_entry(&e, CharacterSet::Utf8),
            Err(MetadataError::ValueParse { expected: TypeTag::Date, .. })
        );
    }

    #[test]
    fn time_tolerates_a_zone_suffix() {
        let expected = Some(SemanticValue::Time(
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        ));
        for spelling in ["10:30:00", "10:30:00+02:00"] {
            assert_eq!(
                decode(
                    TypeTag::Time,
                    RawValue::Text(vec![spelling.as_bytes().to_vec()])
                ),
                expected,
                "spelling {spelling}"
            );
        }
    }

    #[test]
    fn lang_alt_with_single_default_collapses_to_text() {
        let v = decode(
            TypeTag::LangAlt,
            RawValue::LangAlt(vec![("x-default".to_string(), b"Hello".to_vec())]),
        );
        assert_eq!(v, Some(SemanticValue::Text("Hello".to_string())));
    }

    #[test]
    fn lang_alt_with_two_languages_stays_a_map() {
        let v = decode(
            TypeTag::LangAlt,
            RawValue::LangAlt(vec![
                ("x-default".to_string(), b"Hello".to_vec()),
                ("de".to_string(), b"Hallo".to_vec()),
            ]),
        )
        .unwrap();
        let map = v.as_lang_alt().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["x-default"], "Hello");
        assert_eq!(map["de"], "Hallo");
    }

    #[test]
    fn single_non_default_language_stays_a_map() {
        let v = decode(
            TypeTag::LangAlt,
            RawValue::LangAlt(vec![("de".to_string(), b"Hallo".to_vec())]),
        )
        .unwrap();
        assert!(v.as_lang_alt().is_some());
    }

    #[test]
    fn bags_preserve_component_order() {
        let v = decode(
            TypeTag::XmpBag,
            RawValue::Text(vec![
                b"one".to_vec(),
                b"two".to_vec(),
                b"three".to_vec(),
            ]),
        )
        .unwrap();
        assert_eq!(v.as_list().unwrap(), ["one", "two", "three"]);
    }

    #[test]
    fn undefined_decodes_the_whole_blob() {
        let v = decode(TypeTag::Undefined, RawValue::Bytes(b"charset=ascii".to_vec()));
        assert_eq!(v, Some(SemanticValue::Text("charset=ascii".to_string())));
    }

    #[test]
    fn strings_decode_with_the_given_character_set() {
        let e = entry(
            "Iptc.Application2.City",
            TypeTag::IptcString,
            RawValue::Text(vec![vec![0x4D, 0xFC, 0x6E, 0x63, 0x68, 0x65, 0x6E]]),
        );
        let v = decode_entry(&e, CharacterSet::Iso8859_1).unwrap().unwrap();
        assert_eq!(v.as_text(), Some("München"));
    }

    #[test]
    fn mismatched_storage_is_skipped_not_fatal() {
        // An unsigned tag over text storage has nothing to decode.
        let v = decode(
            TypeTag::UnsignedShort,
            RawValue::Text(vec![b"20".to_vec()]),
        );
        assert_eq!(v, None);
    }
}
