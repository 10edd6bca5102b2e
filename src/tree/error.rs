use std::path::PathBuf;

use thiserror::Error;

/// A relative path from the catalog that would leave the output root.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a safe relative path")]
pub struct UnsafePath(pub String);

/// Building the tree skeleton (reset, directories, indices) failed.
///
/// Always fatal: nothing after the skeleton can run without it.
#[derive(Debug, Error)]
pub enum StorageSetupError {
    #[error("Failed to reset output root {path}: {source}")]
    Reset {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write index {path}: {source}")]
    WriteIndex {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize index of '{name}': {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },

    #[error("Invalid folder path: {0}")]
    UnsafePath(#[from] UnsafePath),
}

/// Writing one photo's detail file failed. Recoverable per photo.
#[derive(Debug, Error)]
pub enum DetailWriteError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {public_id}: {source}")]
    Serialize {
        public_id: String,
        source: serde_json::Error,
    },

    #[error("Invalid photo location: {0}")]
    UnsafePath(#[from] UnsafePath),
}
