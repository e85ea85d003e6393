//! # Slideshow Controller
//!
//! Drives a curated sequence the way the frame's display loop does:
//! 1. Refresh the sequence from a freshly fetched collection
//! 2. Show the slide at the current position
//! 3. Record the slide as seen
//! 4. Advance by one slide (one landscape or one portrait pair)
//!
//! Timers and rendering are the caller's business. The layout of a slide
//! is re-derived from orientation alone, never from pipeline grouping.

use anyhow::{Context, Result};
use catalog::Asset;
use chrono::Utc;
use curation::{Clock, CurationPipeline};
use rand::rngs::StdRng;
use seen_store::SeenTimeStore;
use serde::Serialize;
use tracing::{debug, info};

/// How a slide is laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlideLayout {
    /// One asset filling the screen
    Single,
    /// Two portraits side by side
    Pair,
}

/// One slide of the sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide<'a> {
    /// Index of the slide's first asset in the sequence
    pub index: usize,
    pub layout: SlideLayout,
    pub assets: Vec<&'a Asset>,
}

/// What a refresh did to the current sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New sequence installed and position reset to the start
    Replaced { previous: usize, current: usize },
    /// Same number of assets as before, current sequence kept
    Unchanged,
}

/// Derive the slide starting at `index`.
///
/// A portrait asset followed by another asset is shown as a pair with it;
/// anything else is shown alone. Returns `None` past the end.
pub fn slide_at(sequence: &[Asset], index: usize) -> Option<Slide<'_>> {
    let first = sequence.get(index)?;
    match sequence.get(index + 1) {
        Some(second) if first.is_portrait() => Some(Slide {
            index,
            layout: SlideLayout::Pair,
            assets: vec![first, second],
        }),
        _ => Some(Slide {
            index,
            layout: SlideLayout::Single,
            assets: vec![first],
        }),
    }
}

/// Owns the curated sequence, the seen-time store and the position.
pub struct SlideshowController {
    pipeline: CurationPipeline,
    store: Box<dyn SeenTimeStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    sequence: Vec<Asset>,
    position: usize,
}

impl SlideshowController {
    /// Create a controller with an empty sequence.
    pub fn new(
        pipeline: CurationPipeline,
        store: Box<dyn SeenTimeStore>,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            pipeline,
            store,
            clock,
            rng,
            sequence: Vec::new(),
            position: 0,
        }
    }

    /// Curate `assets` and install the result if the number of assets
    /// in the new sequence differs from the current one.
    ///
    /// Keeping an equally sized sequence avoids reshuffling the show on
    /// every periodic fetch when nothing was added or removed.
    pub fn refresh(&mut self, assets: Vec<Asset>) -> RefreshOutcome {
        let curation = self
            .pipeline
            .run(assets, self.store.as_ref(), self.clock.as_ref(), &mut self.rng);

        let previous = self.sequence.len();
        let current = curation.sequence.len();
        if current == previous {
            debug!("Refresh found {} assets, keeping current sequence", current);
            return RefreshOutcome::Unchanged;
        }

        info!("Refresh changed sequence length {} -> {}", previous, current);
        self.sequence = curation.sequence;
        self.position = 0;
        RefreshOutcome::Replaced { previous, current }
    }

    /// The slide currently on screen, `None` while the sequence is empty
    pub fn current_slide(&self) -> Option<Slide<'_>> {
        slide_at(&self.sequence, self.position)
    }

    /// Record the current slide as seen now.
    ///
    /// Only the slide's first asset is written: it is the representative
    /// the ordering stage looks up for the whole group.
    pub fn record_shown(&mut self) -> Result<()> {
        let Some(asset) = self.sequence.get(self.position) else {
            return Ok(());
        };
        let now = self.clock.now().with_timezone(&Utc);
        self.store
            .set(&asset.id, now)
            .with_context(|| format!("Failed to record seen-time for {}", asset.id))?;
        debug!("Recorded {} as seen at {}", asset.id, now);
        Ok(())
    }

    /// Move to the next slide, wrapping at the end of the sequence.
    ///
    /// Steps one asset after a landscape and two after a portrait.
    pub fn advance(&mut self) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let step = if self.sequence[self.position].is_landscape() { 1 } else { 2 };
        self.position = (self.position + step) % self.sequence.len();
        self.position
    }

    /// Show the current slide, then advance: one tick of the display loop.
    pub fn show_next(&mut self) -> Result<Option<Slide<'_>>> {
        if self.sequence.is_empty() {
            return Ok(None);
        }
        self.record_shown()?;
        let shown = self.position;
        self.advance();
        Ok(slide_at(&self.sequence, shown))
    }

    pub fn sequence(&self) -> &[Asset] {
        &self.sequence
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn store(&self) -> &dyn SeenTimeStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> Vec<Asset> {
        vec![
            Asset::new("p1", 3, 4),
            Asset::new("p2", 3, 4),
            Asset::new("l1", 4, 3),
            Asset::new("p3", 3, 4),
            Asset::new("p4", 3, 4),
            Asset::new("l2", 4, 3),
        ]
    }

    #[test]
    fn test_slide_layout_from_orientation() {
        let seq = sequence();

        let first = slide_at(&seq, 0).unwrap();
        assert_eq!(first.layout, SlideLayout::Pair);
        assert_eq!(first.assets.len(), 2);

        let landscape = slide_at(&seq, 2).unwrap();
        assert_eq!(landscape.layout, SlideLayout::Single);
        assert_eq!(landscape.assets[0].id, "l1");

        assert!(slide_at(&seq, 6).is_none());
    }

    #[test]
    fn test_trailing_portrait_shown_alone() {
        let seq = vec![Asset::new("l", 4, 3), Asset::new("p", 3, 4)];
        let slide = slide_at(&seq, 1).unwrap();
        assert_eq!(slide.layout, SlideLayout::Single);
    }
}
