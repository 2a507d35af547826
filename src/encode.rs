//! Value encoding: key + host text → typed raw entry.
//!
//! The expected type tag comes from the key: EXIF keys resolve through the
//! tag dictionary, IPTC keys through the dataset dictionary, and XMP keys
//! carry no type at all, XMP values being stored as their text. The caller's
//! value is parsed with the same grammar the decoder emits.

use crate::decode::{parse_date_str, parse_time_str};
use crate::entry::{MetadataEntry, RawValue};
use crate::error::MetadataError;
use crate::key::{parse_key_in, Family};
use crate::tags;
use crate::types::{Rational, SRational, TypeTag};

/// Encodes a value for an EXIF key. Unknown tags are a key-resolution
/// error; nothing is ever inserted with a guessed type.
pub fn encode_exif(key: &str, text: &str) -> Result<MetadataEntry, MetadataError> {
    let parsed = parse_key_in(Family::Exif, key)?;
    let tag = tags::exif_tag(parsed.group, parsed.name).ok_or_else(|| {
        MetadataError::KeyResolution {
            key: key.to_string(),
            reason: "no such tag in the EXIF dictionary".to_string(),
        }
    })?;
    let value = read_value(key, tag.default_type, text)?;
    Ok(MetadataEntry::new(key, tag.default_type, value))
}

/// Encodes a value for an IPTC key.
///
/// A key that does not resolve to a dataset (wrong syntax, wrong family or
/// unknown name) yields `Ok(None)`; IPTC add reports that as a `false`
/// result rather than an error. Text that does not fit the resolved type is
/// still a [`MetadataError::ValueParse`].
pub fn encode_iptc(
    key: &str,
    text: &str,
) -> Result<Option<(MetadataEntry, tags::IptcDataset)>, MetadataError> {
    let Ok(parsed) = parse_key_in(Family::Iptc, key) else {
        return Ok(None);
    };
    let Some(dataset) = tags::iptc_dataset(parsed.group, parsed.name) else {
        return Ok(None);
    };
    let value = read_value(key, dataset.value_type, text)?;
    Ok(Some((
        MetadataEntry::new(key, dataset.value_type, value),
        dataset,
    )))
}

/// Encodes a value for an XMP key: identity stringification, no typed
/// parse. Only the key syntax can fail.
pub fn encode_xmp(key: &str, text: &str) -> Result<MetadataEntry, MetadataError> {
    parse_key_in(Family::Xmp, key)?;
    Ok(MetadataEntry::new(
        key,
        TypeTag::XmpText,
        RawValue::Text(vec![text.as_bytes().to_vec()]),
    ))
}

/// Parses `text` into raw storage for `tag`, matching the decoder's output
/// grammar. Integer overflow of the wire width is an error, never a silent
/// truncation.
pub fn read_value(key: &str, tag: TypeTag, text: &str) -> Result<RawValue, MetadataError> {
    let parse_error = || MetadataError::ValueParse {
        key: key.to_string(),
        expected: tag,
        text: text.to_string(),
    };

    let value = match tag {
        TypeTag::UnsignedByte
        | TypeTag::UnsignedShort
        | TypeTag::UnsignedLong
        | TypeTag::UnsignedLongLong
        | TypeTag::TiffIfd
        | TypeTag::TiffIfd8 => {
            let magnitude: u64 = text.trim().parse().map_err(|_| parse_error())?;
            let max = tag.unsigned_max().unwrap_or(u64::MAX);
            if magnitude > max {
                return Err(parse_error());
            }
            RawValue::Unsigned(vec![magnitude])
        }

        TypeTag::SignedByte
        | TypeTag::SignedShort
        | TypeTag::SignedLong
        | TypeTag::SignedLongLong => {
            let magnitude: i64 = text.trim().parse().map_err(|_| parse_error())?;
            let (min, max) = tag.signed_range().unwrap_or((i64::MIN, i64::MAX));
            if magnitude < min || magnitude > max {
                return Err(parse_error());
            }
            RawValue::Signed(vec![magnitude])
        }

        TypeTag::Float | TypeTag::Double => {
            let real: f64 = text.trim().parse().map_err(|_| parse_error())?;
            RawValue::Real(vec![real])
        }

        TypeTag::Date => {
            let date = parse_date_str(text).ok_or_else(parse_error)?;
            RawValue::Text(vec![date.format("%Y-%m-%d").to_string().into_bytes()])
        }

        TypeTag::Time => {
            let time = parse_time_str(text).ok_or_else(parse_error)?;
            RawValue::Text(vec![time.format("%H:%M:%S").to_string().into_bytes()])
        }

        TypeTag::UnsignedRational => {
            let rational: Rational = text.parse().map_err(|_| parse_error())?;
            RawValue::Rationals(vec![rational])
        }

        TypeTag::SignedRational => {
            let rational: SRational = text.parse().map_err(|_| parse_error())?;
            RawValue::SignedRationals(vec![rational])
        }

        TypeTag::AsciiString | TypeTag::IptcString | TypeTag::XmpText | TypeTag::XmpAlt => {
            RawValue::Text(vec![text.as_bytes().to_vec()])
        }

        // Multi-language round-trip is unsupported; a written
        // language-alternative is its single x-default entry.
        TypeTag::LangAlt => {
            RawValue::LangAlt(vec![("x-default".to_string(), text.as_bytes().to_vec())])
        }

        // One element per add; collections grow entry by entry.
        TypeTag::XmpBag | TypeTag::XmpSeq => RawValue::Text(vec![text.as_bytes().to_vec()]),

        TypeTag::Undefined => RawValue::Bytes(text.as_bytes().to_vec()),
    };
    Ok(value)
}
