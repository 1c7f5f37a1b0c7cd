//! Error types for the acqset library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for acqset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the acqset library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// The input text is not well-formed JSON, or a field present in the
    /// text cannot be coerced to its declared type.
    #[error("Malformed acquisition settings: {0}")]
    MalformedInput(String),

    /// Encoding an in-memory settings value failed. Not reachable for a
    /// well-typed value; kept so the encode path propagates instead of
    /// panicking.
    #[error("Failed to encode acquisition settings: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error came from decoding malformed input
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }
}
