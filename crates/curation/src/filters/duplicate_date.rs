//! Filter collapsing assets that share a capture timestamp.
//!
//! Photo libraries often hold the same shot twice (an edited copy, a
//! re-import). Those copies carry the exact same creation date, so the
//! date is used as the identity of the shot.

use crate::traits::Filter;
use catalog::Asset;
use std::collections::HashSet;

/// Keeps the first asset seen for each distinct creation date.
///
/// ## Algorithm
/// 1. Walk the assets in delivery order
/// 2. Keep an asset if its creation date has not been seen yet
/// 3. All assets without a creation date share one key, so only the
///    first of them is kept
///
/// Equality is exact: two burst shots in the same second but with
/// different sub-second components are both kept.
pub struct DuplicateDateFilter;

impl Filter for DuplicateDateFilter {
    fn name(&self) -> &str {
        "DuplicateDateFilter"
    }

    fn apply(&self, assets: Vec<Asset>) -> Vec<Asset> {
        let mut seen_dates = HashSet::with_capacity(assets.len());
        assets
            .into_iter()
            .filter(|asset| seen_dates.insert(asset.creation_date))
            .collect()
    }
}
