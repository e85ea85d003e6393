//! Filter implementations for the asset pipeline.

pub mod album;
pub mod duplicate_date;

// Re-export for convenience
pub use album::AlbumFilter;
pub use duplicate_date::DuplicateDateFilter;
