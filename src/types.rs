use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire type of a metadata value.
///
/// This is the closed set of type codes that EXIF, IPTC and XMP entries can
/// carry. Every decode and encode path matches on it exhaustively, so adding
/// a variant forces both sides to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    UnsignedByte,
    UnsignedShort,
    UnsignedLong,
    UnsignedLongLong,
    SignedByte,
    SignedShort,
    SignedLong,
    SignedLongLong,
    /// 32-bit IFD pointer.
    TiffIfd,
    /// 64-bit IFD pointer (BigTIFF).
    TiffIfd8,
    Float,
    Double,
    AsciiString,
    /// IPTC string dataset.
    IptcString,
    Date,
    Time,
    UnsignedRational,
    SignedRational,
    XmpText,
    /// Language-alternative map (same text keyed by language tag).
    LangAlt,
    /// Unordered XMP text collection.
    XmpBag,
    /// Ordered XMP text collection.
    XmpSeq,
    /// Ordered XMP alternative array.
    XmpAlt,
    /// Opaque byte blob.
    Undefined,
}

impl TypeTag {
    /// Largest magnitude an unsigned integer tag can hold on the wire.
    /// `None` for non-integer tags.
    pub fn unsigned_max(self) -> Option<u64> {
        match self {
            TypeTag::UnsignedByte => Some(u8::MAX as u64),
            TypeTag::UnsignedShort => Some(u16::MAX as u64),
            TypeTag::UnsignedLong | TypeTag::TiffIfd => Some(u32::MAX as u64),
            TypeTag::UnsignedLongLong | TypeTag::TiffIfd8 => Some(u64::MAX),
            _ => None,
        }
    }

    /// Inclusive range of a signed integer tag on the wire.
    pub fn signed_range(self) -> Option<(i64, i64)> {
        match self {
            TypeTag::SignedByte => Some((i8::MIN as i64, i8::MAX as i64)),
            TypeTag::SignedShort => Some((i16::MIN as i64, i16::MAX as i64)),
            TypeTag::SignedLong => Some((i32::MIN as i64, i32::MAX as i64)),
            TypeTag::SignedLongLong => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::UnsignedByte => "Byte",
            TypeTag::UnsignedShort => "Short",
            TypeTag::UnsignedLong => "Long",
            TypeTag::UnsignedLongLong => "LongLong",
            TypeTag::SignedByte => "SByte",
            TypeTag::SignedShort => "SShort",
            TypeTag::SignedLong => "SLong",
            TypeTag::SignedLongLong => "SLongLong",
            TypeTag::TiffIfd => "Ifd",
            TypeTag::TiffIfd8 => "Ifd8",
            TypeTag::Float => "Float",
            TypeTag::Double => "Double",
            TypeTag::AsciiString => "Ascii",
            TypeTag::IptcString => "String",
            TypeTag::Date => "Date",
            TypeTag::Time => "Time",
            TypeTag::UnsignedRational => "Rational",
            TypeTag::SignedRational => "SRational",
            TypeTag::XmpText => "XmpText",
            TypeTag::LangAlt => "LangAlt",
            TypeTag::XmpBag => "XmpBag",
            TypeTag::XmpSeq => "XmpSeq",
            TypeTag::XmpAlt => "XmpAlt",
            TypeTag::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unsigned rational: numerator / denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = split_rational(s)?;
        Ok(Self {
            num: num.parse().map_err(|_| ParseRationalError)?,
            den: den.parse().map_err(|_| ParseRationalError)?,
        })
    }
}

/// Signed rational: numerator / denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SRational {
    pub num: i32,
    pub den: i32,
}

impl SRational {
    pub fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for SRational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = split_rational(s)?;
        Ok(Self {
            num: num.parse().map_err(|_| ParseRationalError)?,
            den: den.parse().map_err(|_| ParseRationalError)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRationalError;

impl fmt::Display for ParseRationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected \"numerator/denominator\"")
    }
}

impl std::error::Error for ParseRationalError {}

fn split_rational(s: &str) -> Result<(&str, &str), ParseRationalError> {
    s.trim().split_once('/').ok_or(ParseRationalError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_roundtrips_through_display() {
        let r = Rational::new(3, 4);
        assert_eq!(r.to_string(), "3/4");
        assert_eq!("3/4".parse::<Rational>().unwrap(), r);
    }

    #[test]
    fn signed_rational_accepts_negative_numerator() {
        let r = "-1/3".parse::<SRational>().unwrap();
        assert_eq!(r, SRational::new(-1, 3));
        assert_eq!(r.to_string(), "-1/3");
    }

    #[test]
    fn rational_rejects_garbage() {
        assert!("3".parse::<Rational>().is_err());
        assert!("a/b".parse::<Rational>().is_err());
        assert!("-1/3".parse::<Rational>().is_err());
    }

    #[test]
    fn unsigned_widths() {
        assert_eq!(TypeTag::UnsignedByte.unsigned_max(), Some(255));
        assert_eq!(TypeTag::UnsignedLongLong.unsigned_max(), Some(u64::MAX));
        assert_eq!(TypeTag::AsciiString.unsigned_max(), None);
    }
}
