//! Grouping portrait assets into side-by-side pairs.
//!
//! Portraits are shown two at a time. Shots from the same burst or the
//! same day make the best pairs, so those are matched first; whatever is
//! left is paired at random so unrelated portraits do not meet in the
//! same fixed order every run.

use catalog::{Asset, AssetGroup};
use chrono::{Duration, FixedOffset};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Pairs portraits by temporal proximity, then pairs the rest randomly.
///
/// ## Algorithm
/// 1. Sort portraits by creation date, oldest first (missing dates first)
/// 2. Walk the sorted list; pair an asset with its successor when they
///    were taken within `window` of each other or on the same local day,
///    otherwise set it aside
/// 3. Shuffle the set-aside assets and pair them consecutively
/// 4. A final unpaired asset is dropped
#[derive(Debug, Clone)]
pub struct PortraitPairer {
    window: Duration,
    same_day: bool,
}

impl PortraitPairer {
    pub fn new(window: Duration, same_day: bool) -> Self {
        Self { window, same_day }
    }

    /// Pair `portraits`, answering same-day questions in `offset`.
    ///
    /// Every returned group is an `AssetGroup::Pair`.
    pub fn pair<R: Rng + ?Sized>(
        &self,
        portraits: Vec<Asset>,
        offset: &FixedOffset,
        rng: &mut R,
    ) -> Vec<AssetGroup> {
        let mut sorted = portraits;
        sorted.sort_by_key(|asset| asset.creation_key());

        let mut groups = Vec::with_capacity(sorted.len() / 2);
        let mut remainder = Vec::new();

        let mut iter = sorted.into_iter().peekable();
        while let Some(asset) = iter.next() {
            match iter.next_if(|next| self.belong_together(&asset, next, offset)) {
                Some(partner) => groups.push(AssetGroup::Pair(asset, partner)),
                None => remainder.push(asset),
            }
        }
        let matched = groups.len();

        remainder.shuffle(rng);
        let mut rest = remainder.into_iter();
        let mut discarded = 0;
        while let Some(first) = rest.next() {
            match rest.next() {
                Some(second) => groups.push(AssetGroup::Pair(first, second)),
                None => discarded += 1,
            }
        }

        debug!(
            "Paired portraits: {} by time, {} at random, {} discarded",
            matched,
            groups.len() - matched,
            discarded
        );
        groups
    }

    /// Whether two portraits were taken close enough to share a slide.
    /// Assets without a creation date never match here.
    pub fn belong_together(&self, a: &Asset, b: &Asset, offset: &FixedOffset) -> bool {
        let (Some(date_a), Some(date_b)) = (a.creation_date, b.creation_date) else {
            return false;
        };
        let gap = if date_a >= date_b {
            date_a - date_b
        } else {
            date_b - date_a
        };
        if gap <= self.window {
            return true;
        }
        self.same_day
            && date_a.with_timezone(offset).date_naive() == date_b.with_timezone(offset).date_naive()
    }
}

impl Default for PortraitPairer {
    fn default() -> Self {
        Self::new(Duration::minutes(2), true)
    }
}
