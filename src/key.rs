use std::fmt;

use crate::error::MetadataError;

/// Metadata namespace a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Exif,
    Iptc,
    Xmp,
}

impl Family {
    pub fn prefix(self) -> &'static str {
        match self {
            Family::Exif => "Exif",
            Family::Iptc => "Iptc",
            Family::Xmp => "Xmp",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "Exif" => Some(Family::Exif),
            "Iptc" => Some(Family::Iptc),
            "Xmp" => Some(Family::Xmp),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A key split into its `Family.Group.Name` parts.
///
/// Borrows from the input; containers store keys as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    pub family: Family,
    pub group: &'a str,
    pub name: &'a str,
}

/// Splits a namespace-qualified key like `"Exif.Image.Make"`.
///
/// All three parts must be non-empty and the family prefix must be one of
/// `Exif`, `Iptc` or `Xmp`.
pub fn parse_key(key: &str) -> Result<ParsedKey<'_>, MetadataError> {
    let bad = |reason: &str| MetadataError::KeyResolution {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = key.splitn(3, '.');
    let prefix = parts.next().unwrap_or_default();
    let group = parts.next().unwrap_or_default();
    let name = parts.next().unwrap_or_default();

    if group.is_empty() || name.is_empty() {
        return Err(bad("expected Family.Group.Name"));
    }
    let family =
        Family::from_prefix(prefix).ok_or_else(|| bad("unknown family prefix"))?;

    Ok(ParsedKey { family, group, name })
}

/// Like [`parse_key`], additionally requiring a specific family.
pub fn parse_key_in(family: Family, key: &str) -> Result<ParsedKey<'_>, MetadataError> {
    let parsed = parse_key(key)?;
    if parsed.family != family {
        return Err(MetadataError::KeyResolution {
            key: key.to_string(),
            reason: format!("expected a {} key", family),
        });
    }
    Ok(parsed)
}
