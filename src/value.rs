use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::types::{Rational, SRational};

/// A decoded, host-facing metadata value.
///
/// Exactly one variant per entry. Values are copies of the raw storage they
/// were decoded from; mutating a container never changes a value already
/// handed out.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Rational(Rational),
    SignedRational(SRational),
    /// Generic string; also carries opaque blobs and a language-alternative
    /// collapsed to its single `x-default` text.
    Text(String),
    /// Full language-tag → text map.
    LangAlt(BTreeMap<String, String>),
    /// Text collection, original component order preserved.
    List(Vec<String>),
}

impl SemanticValue {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            SemanticValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SemanticValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SemanticValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SemanticValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_lang_alt(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            SemanticValue::LangAlt(map) => Some(map),
            _ => None,
        }
    }
}

/// Formats values with the same grammar [`crate::encode`] parses, so a
/// decoded value can be fed straight back into `add`.
impl fmt::Display for SemanticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticValue::UInt(v) => write!(f, "{v}"),
            SemanticValue::Int(v) => write!(f, "{v}"),
            SemanticValue::Float(v) => write!(f, "{v}"),
            SemanticValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SemanticValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            SemanticValue::Rational(r) => write!(f, "{r}"),
            SemanticValue::SignedRational(r) => write!(f, "{r}"),
            SemanticValue::Text(s) => f.write_str(s),
            SemanticValue::LangAlt(map) => {
                for (i, (lang, text)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "lang=\"{lang}\" {text}")?;
                }
                Ok(())
            }
            SemanticValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}
