//! Curation pipeline turning a photo collection into a slideshow order.
//!
//! This crate provides:
//! - Filter trait and implementations for whole-collection filtering
//! - FilterPipeline for composing filters
//! - Orientation split, portrait pairing, biased ordering, interleaving
//! - CurationPipeline running all stages in order
//!
//! ## Architecture
//! The pipeline processes assets in stages:
//! 1. Filters drop assets outside the album and repeated capture dates
//! 2. Assets are split into landscape and portrait
//! 3. Portraits are grouped into pairs shown side by side
//! 4. Pairs and landscapes are ordered by seen-history and season
//! 5. The two ordered streams are interleaved into one sequence
//!
//! Every stage is synchronous and infallible. Randomness comes from the
//! caller's rng and time from the caller's clock, so tests can pin both.
//!
//! ## Example Usage
//! ```ignore
//! use curation::{CurationConfig, CurationPipeline, SystemClock};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let pipeline = CurationPipeline::new(&CurationConfig::default())?;
//! let mut rng = StdRng::from_os_rng();
//! let curation = pipeline.run(assets, &store, &SystemClock, &mut rng);
//! for asset in &curation.sequence {
//!     println!("{}", asset.id);
//! }
//! ```

pub mod clock;
pub mod config;
pub mod curator;
pub mod filter_pipeline;
pub mod filters;
pub mod interleave;
pub mod ordering;
pub mod orientation;
pub mod pairing;
pub mod traits;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CurationConfig};
pub use curator::{Curation, CurationPipeline, CurationStats, default_filters};
pub use filter_pipeline::FilterPipeline;
pub use interleave::interleave;
pub use ordering::{BiasedOrderer, is_in_season};
pub use orientation::{OrientationSplit, split_by_orientation};
pub use pairing::PortraitPairer;
pub use traits::Filter;
