//! Image session and namespace container views.
//!
//! An [`Image`] owns one file's three metadata containers. The views it
//! hands out ([`ExifData`], [`IptcData`], [`XmpData`]) are not copies:
//! they share the session's storage, so a mutation through a view is
//! immediately visible to the session and to every other view. Each view
//! holds a strong handle to the session state, which keeps the storage
//! alive for as long as any view is reachable.
//!
//! Everything here is single-threaded and synchronous; the handles are
//! `Rc`-based and deliberately `!Send`.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::codec::{ImageCodec, SidecarCodec};
use crate::decode::decode_entry;
use crate::encode;
use crate::encoding::{resolve_character_set, CharacterSet};
use crate::entry::{RawContainer, RawMetadata};
use crate::error::MetadataError;
use crate::value::SemanticValue;

struct ImageState {
    path: PathBuf,
    codec: Box<dyn ImageCodec>,
    metadata: RawMetadata,
}

/// A decoded image and its metadata containers.
///
/// Opening is cheap; the containers start empty until [`read_metadata`]
/// populates them from the file.
///
/// [`read_metadata`]: Image::read_metadata
pub struct Image {
    state: Rc<RefCell<ImageState>>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("path", &self.state.borrow().path)
            .finish_non_exhaustive()
    }
}

impl Image {
    /// Opens `path` with the built-in sidecar codec.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        Self::open_with(Box::new(SidecarCodec), path)
    }

    /// Opens `path` with a specific codec.
    pub fn open_with(
        codec: Box<dyn ImageCodec>,
        path: impl AsRef<Path>,
    ) -> Result<Self, MetadataError> {
        let path = path.as_ref().to_path_buf();
        fs::metadata(&path).map_err(|source| MetadataError::Open {
            path: path.clone(),
            source,
        })?;
        if !codec.probe(&path) {
            return Err(MetadataError::UnsupportedFormat { path });
        }
        log::debug!("opened image {}", path.display());
        Ok(Self {
            state: Rc::new(RefCell::new(ImageState {
                path,
                codec,
                metadata: RawMetadata::default(),
            })),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.state.borrow().path.clone()
    }

    /// Populates the three containers from the file.
    ///
    /// On failure the containers keep whatever a prior successful read
    /// loaded; the swap happens only once the codec has fully decoded.
    pub fn read_metadata(&self) -> Result<(), MetadataError> {
        let fresh = {
            let state = self.state.borrow();
            state.codec.read(&state.path)?
        };
        let mut state = self.state.borrow_mut();
        log::debug!(
            "read metadata for {}: {} exif, {} iptc, {} xmp entries",
            state.path.display(),
            fresh.exif.len(),
            fresh.iptc.len(),
            fresh.xmp.len()
        );
        state.metadata = fresh;
        Ok(())
    }

    /// Persists the current container contents back to the file. In-memory
    /// state is untouched either way, so a failed write can be retried.
    pub fn write_metadata(&self) -> Result<(), MetadataError> {
        let state = self.state.borrow();
        state.codec.write(&state.path, &state.metadata)?;
        log::debug!("wrote metadata for {}", state.path.display());
        Ok(())
    }

    /// Replaces `other`'s three containers with a snapshot of this
    /// session's current containers. Later mutations of either session do
    /// not affect the other.
    pub fn copy_metadata_to(&self, other: &Image) {
        if Rc::ptr_eq(&self.state, &other.state) {
            return;
        }
        let snapshot = self.state.borrow().metadata.clone();
        other.state.borrow_mut().metadata = snapshot;
    }

    /// Empties all three containers.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.metadata.exif.clear();
        state.metadata.iptc.clear();
        state.metadata.xmp.clear();
    }

    pub fn exif_data(&self) -> ExifData {
        ExifData {
            state: Rc::clone(&self.state),
        }
    }

    pub fn iptc_data(&self) -> IptcData {
        IptcData {
            state: Rc::clone(&self.state),
        }
    }

    pub fn xmp_data(&self) -> XmpData {
        XmpData {
            state: Rc::clone(&self.state),
        }
    }
}

/// Iterator over decoded `(key, value)` pairs of one container.
///
/// Produced by the views' `entries()`; the container state is observed at
/// the call, so re-calling `entries()` restarts the pass over the current
/// state. Entries whose date or time text does not parse surface as `Err`
/// items without ending the iteration.
pub struct Entries {
    items: std::vec::IntoIter<Result<(String, SemanticValue), MetadataError>>,
}

impl Iterator for Entries {
    type Item = Result<(String, SemanticValue), MetadataError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

fn decode_pass(container: &RawContainer, charset: CharacterSet) -> Entries {
    let items: Vec<_> = container
        .iter()
        .filter_map(|entry| match decode_entry(entry, charset) {
            Ok(Some(value)) => Some(Ok((entry.key.clone(), value))),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        })
        .collect();
    Entries {
        items: items.into_iter(),
    }
}

/// View over a session's EXIF container.
#[derive(Clone)]
pub struct ExifData {
    state: Rc<RefCell<ImageState>>,
}

impl ExifData {
    pub fn entries(&self) -> Entries {
        let state = self.state.borrow();
        decode_pass(&state.metadata.exif, CharacterSet::Utf8)
    }

    /// Encodes `value` for `key` and appends it. The key must resolve in
    /// the EXIF tag dictionary.
    pub fn add<V: ToString>(&self, key: &str, value: V) -> Result<(), MetadataError> {
        let entry = encode::encode_exif(key, &value.to_string())?;
        self.state.borrow_mut().metadata.exif.push(entry);
        Ok(())
    }

    /// Removes the first entry with `key`. Returns whether one was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.state.borrow_mut().metadata.exif.delete_first(key)
    }

    pub fn clear(&self) {
        self.state.borrow_mut().metadata.exif.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().metadata.exif.is_empty()
    }
}

/// View over a session's IPTC container.
#[derive(Clone)]
pub struct IptcData {
    state: Rc<RefCell<ImageState>>,
}

impl IptcData {
    /// Iterates the container. The character set is resolved once from
    /// `Iptc.Envelope.CharacterSet` at the start of the pass and applied
    /// to every string decode in it.
    pub fn entries(&self) -> Entries {
        let state = self.state.borrow();
        let charset = resolve_character_set(&state.metadata.iptc);
        decode_pass(&state.metadata.iptc, charset)
    }

    /// Encodes `value` for `key` and appends it.
    ///
    /// Returns `Ok(false)` without inserting when the key resolves to no
    /// dataset, or when the dataset is not repeatable and already present.
    /// Repeatable datasets may be added any number of times.
    pub fn add<V: ToString>(&self, key: &str, value: V) -> Result<bool, MetadataError> {
        let Some((entry, dataset)) = encode::encode_iptc(key, &value.to_string())? else {
            return Ok(false);
        };
        let mut state = self.state.borrow_mut();
        if !dataset.repeatable && state.metadata.iptc.find(key).is_some() {
            return Ok(false);
        }
        state.metadata.iptc.push(entry);
        Ok(true)
    }

    /// Removes the first entry with `key`. Returns whether one was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.state.borrow_mut().metadata.iptc.delete_first(key)
    }

    pub fn clear(&self) {
        self.state.borrow_mut().metadata.iptc.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().metadata.iptc.is_empty()
    }
}

/// View over a session's XMP container.
#[derive(Clone)]
pub struct XmpData {
    state: Rc<RefCell<ImageState>>,
}

impl XmpData {
    pub fn entries(&self) -> Entries {
        let state = self.state.borrow();
        decode_pass(&state.metadata.xmp, CharacterSet::Utf8)
    }

    /// Assigns `value` to `key`: the stored text of an existing entry is
    /// replaced, otherwise a new entry is appended. XMP values are
    /// text-native, so there is no typed encode step.
    pub fn add<V: ToString>(&self, key: &str, value: V) -> Result<(), MetadataError> {
        let entry = encode::encode_xmp(key, &value.to_string())?;
        self.state.borrow_mut().metadata.xmp.assign(entry);
        Ok(())
    }

    /// Removes the first entry with `key`. Returns whether one was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.state.borrow_mut().metadata.xmp.delete_first(key)
    }

    pub fn clear(&self) {
        self.state.borrow_mut().metadata.xmp.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().metadata.xmp.is_empty()
    }
}
