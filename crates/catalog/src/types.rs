//! Core domain types for a photo collection.
//!
//! An [`Asset`] is one media item as delivered by the photo source. Its
//! orientation is always derived from the pixel dimensions, never stored.
//! An [`AssetGroup`] is what ends up on screen as a single slide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier for an asset, also the key into the seen-time store
pub type AssetId = String;

// =============================================================================
// Asset
// =============================================================================

/// Geographic coordinate attached to an asset.
///
/// Only carried through; nothing in the curation pipeline reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// One media item with its capture metadata and pixel dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    /// When the photo was taken. `None` orders as the earliest instant.
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modification_date: Option<DateTime<Utc>>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    #[serde(default)]
    pub location: Option<GeoLocation>,
    /// Album the asset belongs to in the source library, if known
    #[serde(default)]
    pub album: Option<String>,
}

impl Asset {
    /// Create an asset with only an id and dimensions.
    pub fn new(id: impl Into<AssetId>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            id: id.into(),
            creation_date: None,
            modification_date: None,
            pixel_width,
            pixel_height,
            location: None,
            album: None,
        }
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn with_modification_date(mut self, date: DateTime<Utc>) -> Self {
        self.modification_date = Some(date);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoLocation { latitude, longitude });
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Landscape iff strictly wider than tall; square counts as portrait.
    pub fn orientation(&self) -> Orientation {
        if self.pixel_width > self.pixel_height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation() == Orientation::Landscape
    }

    pub fn is_portrait(&self) -> bool {
        self.orientation() == Orientation::Portrait
    }

    /// Creation date used for ordering, with a missing date mapped to the
    /// earliest representable instant.
    pub fn creation_key(&self) -> DateTime<Utc> {
        self.creation_date.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Modification date with the same missing-date convention.
    pub fn modification_key(&self) -> DateTime<Utc> {
        self.modification_date.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Orientation derived from pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Landscape,
    Portrait,
}

// =============================================================================
// AssetGroup
// =============================================================================

/// One or two assets displayed together as a single slide.
///
/// A `Pair` is only ever built from two portrait assets and a landscape
/// asset is always wrapped as a `Single`. A portrait `Single` may exist
/// while pairing is in progress but is dropped before interleaving.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetGroup {
    Single(Asset),
    Pair(Asset, Asset),
}

impl AssetGroup {
    /// The first asset, whose id stands for the whole group in the
    /// seen-time store.
    pub fn representative(&self) -> &Asset {
        match self {
            AssetGroup::Single(asset) => asset,
            AssetGroup::Pair(first, _) => first,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AssetGroup::Single(_) => 1,
            AssetGroup::Pair(_, _) => 2,
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, AssetGroup::Pair(_, _))
    }

    /// Borrow the assets in display order.
    pub fn assets(&self) -> Vec<&Asset> {
        match self {
            AssetGroup::Single(asset) => vec![asset],
            AssetGroup::Pair(first, second) => vec![first, second],
        }
    }

    /// Consume the group, yielding its assets in display order.
    pub fn into_assets(self) -> Vec<Asset> {
        match self {
            AssetGroup::Single(asset) => vec![asset],
            AssetGroup::Pair(first, second) => vec![first, second],
        }
    }
}

impl From<Asset> for AssetGroup {
    fn from(asset: Asset) -> Self {
        AssetGroup::Single(asset)
    }
}
