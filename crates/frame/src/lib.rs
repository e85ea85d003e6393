//! Slideshow controller for the picture frame.
//!
//! This crate sits between the curation pipeline and whatever draws the
//! slides: it owns the current sequence, knows which slide is on screen,
//! advances through the sequence and records seen-times.

pub mod slideshow;

pub use slideshow::{RefreshOutcome, Slide, SlideLayout, SlideshowController, slide_at};
