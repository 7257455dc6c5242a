//! Error types for the store.

use std::path::PathBuf;

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// Affected path
        path: PathBuf,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// The store document exists but does not parse
    #[error("store document at {path} is corrupt: {source}")]
    Corrupt {
        /// Affected path
        path: PathBuf,
        /// Decode error
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a document for writing failed
    #[error("failed to encode store document: {0}")]
    Encode(#[source] serde_json::Error),
}
