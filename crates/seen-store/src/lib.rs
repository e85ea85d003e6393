//! # Seen Store Crate
//!
//! Records when each asset was last put on screen.
//!
//! The curation pipeline only reads through [`SeenTimeStore`]; the
//! slideshow controller writes after each slide is shown. Two
//! implementations are provided:
//!
//! - [`MemorySeenStore`]: a plain map, for tests and ephemeral runs
//! - [`JsonFileSeenStore`]: persisted to a JSON file with atomic replace
//!
//! ## Example Usage
//!
//! ```ignore
//! use seen_store::{JsonFileSeenStore, SeenTimeStore};
//! use chrono::Utc;
//!
//! let mut store = JsonFileSeenStore::open("seen.json")?;
//! store.set("IMG_0001", Utc::now())?;
//! assert!(store.get("IMG_0001")?.is_some());
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{Result, StoreError};
pub use file::JsonFileSeenStore;
pub use memory::MemorySeenStore;

use chrono::{DateTime, Utc};

/// Key-value association from asset id to the last time it was shown.
///
/// Lookups for unknown ids return `Ok(None)`. Repeated writes for the
/// same id overwrite; the last write wins.
pub trait SeenTimeStore: Send + Sync {
    /// Last time the asset was shown, or `None` if it never was
    fn get(&self, asset_id: &str) -> Result<Option<DateTime<Utc>>>;

    /// Record that the asset was shown at `seen_at`
    fn set(&mut self, asset_id: &str, seen_at: DateTime<Utc>) -> Result<()>;

    /// Number of assets with a recorded seen-time
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, oldest seen-time first
    fn entries(&self) -> Vec<(String, DateTime<Utc>)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn exercise(store: &mut dyn SeenTimeStore) {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get("unknown").unwrap(), None);

        store.set("b", late).unwrap();
        store.set("a", early).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(early));

        let ids: Vec<String> = store.entries().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);

        // Last write wins
        store.set("a", late).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(late));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemorySeenStore::new();
        exercise(&mut store);
    }

    #[test]
    fn test_file_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileSeenStore::open(dir.path().join("seen.json")).unwrap();
        exercise(&mut store);
    }
}
