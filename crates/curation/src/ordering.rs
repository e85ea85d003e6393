//! Ordering groups by how long ago they were shown, with a seasonal nudge.
//!
//! Groups nobody has seen yet always come first. Groups that have been
//! shown are ranked so the longest-unseen come back first, and among
//! groups last shown at the same moment, photos taken in this calendar
//! month of an earlier year ("this time last year") are preferred.

use crate::config::{validate_strengths, CurationConfig, Result};
use catalog::{Asset, AssetGroup};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use seen_store::SeenTimeStore;
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

/// A group with the seen-time looked up once, before sorting.
#[derive(Debug)]
struct SeenGroup {
    group: AssetGroup,
    last_seen: DateTime<Utc>,
    in_season: bool,
}

/// Reorders groups using seen-history, seasonal bias and randomness.
///
/// ## Algorithm
/// 1. Look up each group's representative (first asset) in the store;
///    groups without an entry are "never shown"
/// 2. Shuffle the never-shown groups
/// 3. Shuffle the shown groups, then stable-sort them by descending
///    pairwise score `recency + season`, where
///    - recency: `recency_bias` if this group was last seen strictly
///      earlier than the one it is compared with
///    - season: `season_bias` if the representative was captured in the
///      current month of an earlier year
/// 4. Output never-shown groups followed by shown groups
///
/// Equal scores keep their shuffled relative order, so repeated runs do
/// not settle into one fixed sequence.
#[derive(Debug, Clone)]
pub struct BiasedOrderer {
    recency_bias: f64,
    season_bias: f64,
}

impl BiasedOrderer {
    /// Create an orderer. `season_bias` must be below `recency_bias` and
    /// both must be finite and non-negative.
    pub fn new(recency_bias: f64, season_bias: f64) -> Result<Self> {
        validate_strengths(recency_bias, season_bias)?;
        Ok(Self {
            recency_bias,
            season_bias,
        })
    }

    pub fn from_config(config: &CurationConfig) -> Result<Self> {
        Self::new(config.recency_bias, config.season_bias)
    }

    /// Produce a permutation of `groups` as described on the type.
    ///
    /// A store that fails a lookup does not abort the run: the group is
    /// treated as never shown.
    #[instrument(skip_all, fields(groups = groups.len()))]
    pub fn order<R: Rng + ?Sized>(
        &self,
        groups: Vec<AssetGroup>,
        store: &dyn SeenTimeStore,
        now: &DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Vec<AssetGroup> {
        let mut never_seen = Vec::new();
        let mut seen = Vec::new();

        for group in groups {
            let id = &group.representative().id;
            match store.get(id) {
                Ok(Some(last_seen)) => {
                    let in_season = is_in_season(group.representative(), now);
                    seen.push(SeenGroup {
                        group,
                        last_seen,
                        in_season,
                    });
                }
                Ok(None) => never_seen.push(group),
                Err(err) => {
                    warn!("Seen-time lookup failed for {}: {}; treating as never shown", id, err);
                    never_seen.push(group);
                }
            }
        }
        debug!("{} never shown, {} previously shown", never_seen.len(), seen.len());

        never_seen.shuffle(rng);
        seen.shuffle(rng);
        seen.sort_by(|a, b| self.compare(a, b));

        never_seen
            .into_iter()
            .chain(seen.into_iter().map(|s| s.group))
            .collect()
    }

    /// Scores of `a` and `b` when compared against each other.
    fn pairwise_scores(&self, a: &SeenGroup, b: &SeenGroup) -> (f64, f64) {
        let recency_a = if a.last_seen < b.last_seen { self.recency_bias } else { 0.0 };
        let recency_b = if b.last_seen < a.last_seen { self.recency_bias } else { 0.0 };
        let season_a = if a.in_season { self.season_bias } else { 0.0 };
        let season_b = if b.in_season { self.season_bias } else { 0.0 };
        (recency_a + season_a, recency_b + season_b)
    }

    // Higher score sorts first
    fn compare(&self, a: &SeenGroup, b: &SeenGroup) -> Ordering {
        let (score_a, score_b) = self.pairwise_scores(a, b);
        score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
    }
}

impl Default for BiasedOrderer {
    fn default() -> Self {
        let config = CurationConfig::default();
        Self {
            recency_bias: config.recency_bias,
            season_bias: config.season_bias,
        }
    }
}

/// Captured in the current month of an earlier year, in the local
/// calendar. Undated assets are never in season.
pub fn is_in_season(asset: &Asset, now: &DateTime<FixedOffset>) -> bool {
    asset.creation_date.is_some_and(|created| {
        let local = created.with_timezone(now.offset());
        local.month() == now.month() && local.year() < now.year()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use seen_store::{MemorySeenStore, StoreError};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 10, 18, 9, 0, 0)
            .unwrap()
    }

    fn landscape(id: &str, year: i32, month: u32) -> AssetGroup {
        AssetGroup::Single(
            Asset::new(id, 4032, 3024)
                .with_creation_date(Utc.with_ymd_and_hms(year, month, 5, 12, 0, 0).unwrap()),
        )
    }

    fn seen_at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, day, 20, 0, 0).unwrap()
    }

    fn ids(groups: &[AssetGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.representative().id.as_str()).collect()
    }

    struct FailingStore;

    impl SeenTimeStore for FailingStore {
        fn get(&self, _asset_id: &str) -> seen_store::Result<Option<DateTime<Utc>>> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn set(&mut self, _asset_id: &str, _seen_at: DateTime<Utc>) -> seen_store::Result<()> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn len(&self) -> usize {
            0
        }

        fn entries(&self) -> Vec<(String, DateTime<Utc>)> {
            Vec::new()
        }
    }

    #[test]
    fn test_never_shown_come_first() {
        let store = MemorySeenStore::from_entries([("s1", seen_at(1)), ("s2", seen_at(2))]);
        let groups = vec![
            landscape("s1", 2020, 1),
            landscape("n1", 2020, 2),
            landscape("s2", 2020, 3),
            landscape("n2", 2020, 4),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        let ordered = BiasedOrderer::default().order(groups, &store, &now(), &mut rng);

        let order = ids(&ordered);
        assert_eq!(order.len(), 4);
        assert!(order[..2].contains(&"n1") && order[..2].contains(&"n2"));
        assert_eq!(&order[2..], &["s1", "s2"]);
    }

    #[test]
    fn test_empty_store_is_pure_shuffle() {
        let groups: Vec<AssetGroup> = (0..8).map(|i| landscape(&format!("g{i}"), 2020, 1)).collect();
        let store = MemorySeenStore::new();

        let mut expected = groups.clone();
        expected.shuffle(&mut StdRng::seed_from_u64(5));

        let ordered =
            BiasedOrderer::default().order(groups, &store, &now(), &mut StdRng::seed_from_u64(5));
        assert_eq!(ordered, expected);
    }

    #[test]
    fn test_longest_unseen_first() {
        let store = MemorySeenStore::from_entries([
            ("recent", seen_at(20)),
            ("oldest", seen_at(1)),
            ("middle", seen_at(10)),
        ]);
        let groups = vec![
            landscape("recent", 2020, 1),
            landscape("oldest", 2020, 1),
            landscape("middle", 2020, 1),
        ];

        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ordered = BiasedOrderer::default().order(groups.clone(), &store, &now(), &mut rng);
            assert_eq!(ids(&ordered), vec!["oldest", "middle", "recent"]);
        }
    }

    #[test]
    fn test_season_breaks_recency_ties() {
        let store = MemorySeenStore::from_entries([
            ("may", seen_at(3)),
            ("october", seen_at(3)),
        ]);
        let groups = vec![landscape("may", 2019, 5), landscape("october", 2019, 10)];

        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ordered = BiasedOrderer::default().order(groups.clone(), &store, &now(), &mut rng);
            assert_eq!(ids(&ordered), vec!["october", "may"]);
        }
    }

    #[test]
    fn test_season_does_not_outrank_older_seen_time() {
        let store = MemorySeenStore::from_entries([
            ("seasonal", seen_at(25)),
            ("stale", seen_at(2)),
        ]);
        let groups = vec![landscape("seasonal", 2018, 10), landscape("stale", 2018, 3)];
        let mut rng = StdRng::seed_from_u64(9);

        let ordered = BiasedOrderer::default().order(groups, &store, &now(), &mut rng);
        assert_eq!(ids(&ordered), vec!["stale", "seasonal"]);
    }

    #[test]
    fn test_in_season_requires_earlier_year() {
        let this_year = Asset::new("a", 4, 3)
            .with_creation_date(Utc.with_ymd_and_hms(2024, 10, 2, 12, 0, 0).unwrap());
        let last_year = Asset::new("b", 4, 3)
            .with_creation_date(Utc.with_ymd_and_hms(2023, 10, 2, 12, 0, 0).unwrap());
        let other_month = Asset::new("c", 4, 3)
            .with_creation_date(Utc.with_ymd_and_hms(2023, 11, 2, 12, 0, 0).unwrap());

        assert!(!is_in_season(&this_year, &now()));
        assert!(is_in_season(&last_year, &now()));
        assert!(!is_in_season(&other_month, &now()));
        assert!(!is_in_season(&Asset::new("undated", 4, 3), &now()));
    }

    #[test]
    fn test_pair_uses_first_asset_as_representative() {
        let first = Asset::new("first", 3, 4);
        let second = Asset::new("second", 3, 4);
        // Only the second asset has been seen: the pair still counts as new
        let store = MemorySeenStore::from_entries([("second", seen_at(1)), ("shown", seen_at(2))]);
        let groups = vec![
            AssetGroup::Pair(first, second),
            landscape("shown", 2020, 1),
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let ordered = BiasedOrderer::default().order(groups, &store, &now(), &mut rng);
        assert_eq!(ids(&ordered), vec!["first", "shown"]);
    }

    #[test]
    fn test_failing_store_degrades_to_shuffle() {
        let groups = vec![landscape("a", 2020, 1), landscape("b", 2020, 2)];
        let mut rng = StdRng::seed_from_u64(2);

        let ordered = BiasedOrderer::default().order(groups, &FailingStore, &now(), &mut rng);
        assert_eq!(ordered.len(), 2);
    }

    #[test]
    fn test_invalid_strengths_rejected() {
        assert!(BiasedOrderer::new(0.8, 0.5).is_ok());
        assert!(matches!(
            BiasedOrderer::new(0.3, 0.6),
            Err(ConfigError::SeasonOutweighsRecency { .. })
        ));
    }
}
