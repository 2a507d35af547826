//! Codec boundary.
//!
//! Parsing and writing actual image container formats is not this crate's
//! job; a codec supplies the three raw containers for a path and persists
//! them back. The built-in [`SidecarCodec`] stores them as a JSON sidecar
//! next to the image, which keeps the session operations real without a
//! wire-format parser; format-aware codecs plug in through the trait.

use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::RawMetadata;
use crate::error::MetadataError;

pub trait ImageCodec {
    /// Whether this codec handles the file at `path`.
    fn probe(&self, path: &Path) -> bool;

    /// Reads all three namespace containers for `path`.
    fn read(&self, path: &Path) -> Result<RawMetadata, MetadataError>;

    /// Persists all three namespace containers for `path`.
    fn write(&self, path: &Path, metadata: &RawMetadata) -> Result<(), MetadataError>;
}

/// Stores metadata as pretty-printed JSON at `<file>.meta.json`.
#[derive(Debug, Default)]
pub struct SidecarCodec;

impl SidecarCodec {
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".meta.json");
        path.with_file_name(name)
    }
}

impl ImageCodec for SidecarCodec {
    fn probe(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<RawMetadata, MetadataError> {
        let sidecar = Self::sidecar_path(path);
        if !sidecar.exists() {
            // An image without a sidecar has no metadata yet.
            return Ok(RawMetadata::default());
        }
        let text = fs::read_to_string(&sidecar).map_err(|source| MetadataError::Io {
            path: sidecar.clone(),
            source,
        })?;
        let mut deserializer = serde_json::Deserializer::from_str(&text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            MetadataError::Decode {
                path: sidecar,
                message: format!("{} at {}", e.inner(), e.path()),
            }
        })
    }

    fn write(&self, path: &Path, metadata: &RawMetadata) -> Result<(), MetadataError> {
        let sidecar = Self::sidecar_path(path);
        let json =
            serde_json::to_string_pretty(metadata).map_err(|e| MetadataError::Encode {
                path: sidecar.clone(),
                message: e.to_string(),
            })?;
        fs::write(&sidecar, json).map_err(|source| MetadataError::Io {
            path: sidecar,
            source,
        })
    }
}
