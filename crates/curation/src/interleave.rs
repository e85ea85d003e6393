//! Merging portrait pairs and landscapes into one display sequence.

use catalog::{Asset, AssetGroup};
use tracing::debug;

/// Alternate portrait pairs and landscape assets into a flat sequence.
///
/// ## Algorithm
/// Repeat until both inputs are exhausted:
/// 1. Take the next portrait group, appending both assets if it is a pair
///    and skipping it otherwise
/// 2. Take the next landscape group and append its asset
///
/// Both assets of a pair always end up adjacent, first then second.
pub fn interleave(portrait_groups: Vec<AssetGroup>, landscape_groups: Vec<AssetGroup>) -> Vec<Asset> {
    let mut sequence = Vec::with_capacity(2 * portrait_groups.len() + landscape_groups.len());
    let mut portraits = portrait_groups.into_iter();
    let mut landscapes = landscape_groups.into_iter();
    let mut skipped = 0usize;

    loop {
        let portrait = portraits.next();
        let landscape = landscapes.next();
        if portrait.is_none() && landscape.is_none() {
            break;
        }

        match portrait {
            Some(AssetGroup::Pair(first, second)) => {
                sequence.push(first);
                sequence.push(second);
            }
            Some(AssetGroup::Single(asset)) => {
                debug!("Skipping unpaired portrait {}", asset.id);
                skipped += 1;
            }
            None => {}
        }

        if let Some(group) = landscape {
            sequence.extend(group.into_assets());
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed portrait groups", skipped);
    }
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> AssetGroup {
        AssetGroup::Pair(Asset::new(a, 3, 4), Asset::new(b, 3, 4))
    }

    fn single(id: &str, w: u32, h: u32) -> AssetGroup {
        AssetGroup::Single(Asset::new(id, w, h))
    }

    fn ids(sequence: &[Asset]) -> Vec<&str> {
        sequence.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_alternates_pair_then_landscape() {
        let portraits = vec![pair("p1", "p2"), pair("p3", "p4")];
        let landscapes = vec![single("l1", 4, 3), single("l2", 4, 3), single("l3", 4, 3)];

        let sequence = interleave(portraits, landscapes);

        assert_eq!(ids(&sequence), vec!["p1", "p2", "l1", "p3", "p4", "l2", "l3"]);
    }

    #[test]
    fn test_more_pairs_than_landscapes() {
        let portraits = vec![pair("p1", "p2"), pair("p3", "p4"), pair("p5", "p6")];
        let landscapes = vec![single("l1", 4, 3)];

        let sequence = interleave(portraits, landscapes);

        assert_eq!(ids(&sequence), vec!["p1", "p2", "l1", "p3", "p4", "p5", "p6"]);
    }

    #[test]
    fn test_single_portrait_is_skipped() {
        let portraits = vec![single("orphan", 3, 4), pair("p1", "p2")];
        let landscapes = vec![single("l1", 4, 3), single("l2", 4, 3)];

        let sequence = interleave(portraits, landscapes);

        assert_eq!(ids(&sequence), vec!["l1", "p1", "p2", "l2"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(interleave(Vec::new(), Vec::new()).is_empty());
        assert_eq!(interleave(Vec::new(), vec![single("l", 4, 3)]).len(), 1);
    }
}
