//! # imagemeta
//!
//! A typed value model for EXIF, IPTC and XMP image metadata.
//!
//! This library translates the heterogeneous typed records found in image
//! metadata into host values and back: integers of every wire width,
//! rationals, dates, times, language-alternative maps, text collections and
//! opaque blobs all decode into one [`SemanticValue`], and textual values
//! encode back into correctly-typed entries for writing. Legacy IPTC text
//! is decoded with the character set the envelope declares through its
//! ISO 2022 escape sequence, resolved once per iteration pass.
//!
//! Reading and writing actual image container formats stays behind the
//! [`ImageCodec`] trait; the built-in [`SidecarCodec`] persists metadata as
//! a JSON sidecar next to the image.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use imagemeta::{Image, MetadataError};
//!
//! fn main() -> Result<(), MetadataError> {
//!     let image = Image::open("path/to/your/image.jpg")?;
//!     image.read_metadata()?;
//!
//!     // Iterate decoded (key, value) pairs per namespace.
//!     for item in image.exif_data().entries() {
//!         let (key, value) = item?;
//!         println!("{key}: {value}");
//!     }
//!
//!     // Write typed values from text.
//!     let exif = image.exif_data();
//!     exif.add("Exif.Image.Make", "Canon")?;
//!     exif.add("Exif.Photo.FNumber", "28/10")?;
//!
//!     // IPTC reports unknown datasets as a failed add, not an error.
//!     let added = image.iptc_data().add("Iptc.Application2.Keywords", "sunset")?;
//!     assert!(added);
//!
//!     image.write_metadata()?;
//!     Ok(())
//! }
//! ```
//!
//! Container views are live: they share the session's storage and keep it
//! alive, so a view may safely outlive the [`Image`] it came from.

// Public API
mod error;
mod image;

pub use error::MetadataError;
pub use image::{Entries, ExifData, Image, IptcData, XmpData};

pub mod codec;
pub mod decode;
pub mod encode;
pub mod encoding;
pub mod entry;
pub mod key;
pub mod tags;
pub mod types;
pub mod value;

pub use codec::{ImageCodec, SidecarCodec};
pub use encoding::CharacterSet;
pub use entry::{MetadataEntry, RawContainer, RawMetadata, RawValue};
pub use key::Family;
pub use types::{Rational, SRational, TypeTag};
pub use value::SemanticValue;
