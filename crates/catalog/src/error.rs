//! Error types for the catalog crate.
//!
//! Only loading a manifest can fail. Once assets are in memory every
//! later stage is infallible.

use thiserror::Error;

/// Errors that can occur while loading an asset manifest
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Manifest file could not be found
    #[error("Manifest not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the manifest
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Manifest content is not a valid JSON array of assets
    #[error("Malformed manifest: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Pixel dimensions must both be positive
    #[error("Asset {id} has invalid dimensions {width}x{height}")]
    InvalidDimensions { id: String, width: u32, height: u32 },

    /// Asset ids key the seen-time store, so they must be unique
    #[error("Duplicate asset id: {id}")]
    DuplicateId { id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
