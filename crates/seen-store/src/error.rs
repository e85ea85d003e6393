//! Error types for seen-time stores.

use thiserror::Error;

/// Errors raised while reading or persisting seen-times
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while reading or writing the backing file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but does not hold a valid id -> timestamp map
    #[error("Corrupt seen-time file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store cannot be reached at all
    #[error("Seen-time store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
