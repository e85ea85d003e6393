//! Loader for asset manifests.
//!
//! A manifest is a JSON array of asset records in the order the photo
//! source delivers them:
//!
//! ```json
//! [
//!   {
//!     "id": "IMG_0001",
//!     "creation_date": "2023-10-14T09:30:00Z",
//!     "pixel_width": 3024,
//!     "pixel_height": 4032,
//!     "album": "Picture Frame"
//!   }
//! ]
//! ```
//!
//! Dates are RFC 3339 and optional, as are `modification_date`,
//! `location` and `album`.

use crate::error::{CatalogError, Result};
use crate::types::Asset;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Load and validate a manifest file.
///
/// Fails if the file is missing, is not a JSON array of assets, holds an
/// asset with a zero dimension, or repeats an id.
#[instrument]
pub fn load_manifest(path: &Path) -> Result<Vec<Asset>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let assets = parse_manifest(&content)?;
    debug!("Loaded {} assets from {}", assets.len(), path.display());
    Ok(assets)
}

/// Parse and validate manifest content already in memory.
pub fn parse_manifest(content: &str) -> Result<Vec<Asset>> {
    let assets: Vec<Asset> = serde_json::from_str(content)?;
    validate_assets(&assets)?;
    Ok(assets)
}

/// Check every asset for positive dimensions and the set for unique ids.
pub fn validate_assets(assets: &[Asset]) -> Result<()> {
    // Dimension checks are independent per asset
    assets.par_iter().try_for_each(validate_dimensions)?;

    let mut seen = HashSet::with_capacity(assets.len());
    for asset in assets {
        if !seen.insert(asset.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: asset.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_dimensions(asset: &Asset) -> Result<()> {
    if asset.pixel_width == 0 || asset.pixel_height == 0 {
        return Err(CatalogError::InvalidDimensions {
            id: asset.id.clone(),
            width: asset.pixel_width,
            height: asset.pixel_height,
        });
    }
    Ok(())
}
