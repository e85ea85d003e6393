//! The FilterPipeline chains asset filters.
//!
//! Filters are applied in insertion order using the builder pattern.

use crate::traits::Filter;
use catalog::Asset;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlbumFilter::new("Picture Frame"))
///     .add_filter(DuplicateDateFilter);
///
/// let filtered = pipeline.apply(assets);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the assets.
    pub fn apply(&self, assets: Vec<Asset>) -> Vec<Asset> {
        let mut current = assets;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current);
            debug!(
                "Filter applied: {} ({} -> {})",
                filter.name(),
                before,
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlbumFilter, DuplicateDateFilter};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let assets = vec![Asset::new("a", 4, 3), Asset::new("b", 3, 4)];

        let filtered = pipeline.apply(assets);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filters_run_in_order() {
        let taken = Utc.with_ymd_and_hms(2022, 5, 1, 10, 0, 0).unwrap();
        let assets = vec![
            Asset::new("other-album", 4, 3).with_creation_date(taken),
            Asset::new("framed", 4, 3)
                .with_creation_date(taken)
                .with_album("Picture Frame"),
        ];

        // Album first: the framed asset is the first with that date once
        // the other album is gone
        let pipeline = FilterPipeline::new()
            .add_filter(AlbumFilter::new("Picture Frame"))
            .add_filter(DuplicateDateFilter);

        assert_eq!(pipeline.filter_names(), vec!["AlbumFilter", "DuplicateDateFilter"]);
        let filtered = pipeline.apply(assets);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "framed");
    }
}
