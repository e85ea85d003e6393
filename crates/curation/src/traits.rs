//! Core traits for the asset filtering stage.
//!
//! Filters run before orientation splitting and pairing. They only ever
//! drop assets; none of them reorders.

use catalog::Asset;

/// Trait for whole-collection asset filters.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared across threads
/// - Filters take ownership of the Vec<Asset> and return a filtered Vec
/// - Filters never fail: malformed input degrades to a smaller output
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to the assets, keeping their relative order.
    fn apply(&self, assets: Vec<Asset>) -> Vec<Asset>;
}
