use std::path::PathBuf;

use thiserror::Error;

use crate::types::TypeTag;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported image format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("corrupt metadata in {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("cannot encode metadata for {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot resolve key \"{key}\": {reason}")]
    KeyResolution { key: String, reason: String },

    #[error("cannot parse \"{text}\" as {expected} for {key}")]
    ValueParse {
        key: String,
        expected: TypeTag,
        text: String,
    },
}
