//! The CurationPipeline runs every stage in order.
//!
//! 1. Filters (album restriction, duplicate dates)
//! 2. Orientation split
//! 3. Portrait pairing
//! 4. Biased ordering, portraits and landscapes independently
//! 5. Interleaving into the final display sequence

use crate::clock::Clock;
use crate::config::{CurationConfig, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlbumFilter, DuplicateDateFilter};
use crate::interleave::interleave;
use crate::ordering::BiasedOrderer;
use crate::orientation::split_by_orientation;
use crate::pairing::PortraitPairer;
use catalog::{Asset, AssetGroup};
use chrono::Duration;
use rand::Rng;
use seen_store::SeenTimeStore;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Asset counts after each stage of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurationStats {
    pub input: usize,
    pub filtered: usize,
    pub landscape: usize,
    pub portrait: usize,
    pub pairs: usize,
    pub sequence: usize,
}

/// Result of one curation run
#[derive(Debug, Clone)]
pub struct Curation {
    /// Final display order
    pub sequence: Vec<Asset>,
    pub stats: CurationStats,
}

/// Standard filter chain: optional album restriction, then duplicate
/// capture dates.
pub fn default_filters(album: Option<&str>) -> FilterPipeline {
    let pipeline = match album {
        Some(name) => FilterPipeline::new().add_filter(AlbumFilter::new(name)),
        None => FilterPipeline::new(),
    };
    pipeline.add_filter(DuplicateDateFilter)
}

/// Turns a raw asset collection into an ordered slideshow sequence.
pub struct CurationPipeline {
    filters: FilterPipeline,
    pairer: PortraitPairer,
    orderer: BiasedOrderer,
}

impl CurationPipeline {
    /// Build a pipeline with the default filters.
    ///
    /// Fails only if the bias strengths in `config` are invalid.
    pub fn new(config: &CurationConfig) -> Result<Self> {
        config.validate()?;
        let window = i64::try_from(config.pairing_window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Ok(Self {
            filters: default_filters(None),
            pairer: PortraitPairer::new(window, config.pair_same_day),
            orderer: BiasedOrderer::from_config(config)?,
        })
    }

    /// Replace the filter chain (builder pattern).
    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    /// Run all stages over `assets`.
    ///
    /// `store` is only read. `clock` fixes "now" and the local calendar,
    /// `rng` drives every shuffle, so a seeded rng and a fixed clock make
    /// the run reproducible.
    pub fn run<R: Rng + ?Sized>(
        &self,
        assets: Vec<Asset>,
        store: &dyn SeenTimeStore,
        clock: &dyn Clock,
        rng: &mut R,
    ) -> Curation {
        let start = Instant::now();
        let now = clock.now();
        let mut stats = CurationStats {
            input: assets.len(),
            ..Default::default()
        };

        let filtered = self.filters.apply(assets);
        stats.filtered = filtered.len();

        let split = split_by_orientation(filtered);
        stats.landscape = split.landscape.len();
        stats.portrait = split.portrait.len();
        debug!("Split into {} landscape and {} portrait", stats.landscape, stats.portrait);

        let pairs = self.pairer.pair(split.portrait, now.offset(), rng);
        stats.pairs = pairs.len();

        let ordered_pairs = self.orderer.order(pairs, store, &now, rng);
        let landscapes: Vec<AssetGroup> = split.landscape.into_iter().map(AssetGroup::from).collect();
        let ordered_landscapes = self.orderer.order(landscapes, store, &now, rng);

        let sequence = interleave(ordered_pairs, ordered_landscapes);
        stats.sequence = sequence.len();

        info!(
            "Curated {} assets into a sequence of {} ({} pairs, {} landscape) in {:.2?}",
            stats.input,
            stats.sequence,
            stats.pairs,
            stats.landscape,
            start.elapsed()
        );
        Curation { sequence, stats }
    }
}
