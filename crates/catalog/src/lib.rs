//! # Catalog Crate
//!
//! Domain types for a photo collection and the manifest loader that
//! feeds the curation pipeline.
//!
//! ## Main Components
//!
//! - **types**: Asset, Orientation, AssetGroup, GeoLocation
//! - **manifest**: Load a JSON manifest into validated assets
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::load_manifest;
//! use std::path::Path;
//!
//! let assets = load_manifest(Path::new("photos.json"))?;
//! println!("{} assets ready for curation", assets.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod manifest;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use manifest::{load_manifest, parse_manifest, validate_assets};
pub use types::{Asset, AssetGroup, AssetId, GeoLocation, Orientation};
