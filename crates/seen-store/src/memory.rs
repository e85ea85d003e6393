//! In-memory seen-time store.

use crate::{Result, SeenTimeStore};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Seen-times held in a HashMap, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySeenStore {
    entries: HashMap<String, DateTime<Utc>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(id, seen_at)` entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, DateTime<Utc>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, seen_at)| (id.into(), seen_at))
                .collect(),
        }
    }

    /// Drop the entry for `asset_id`, returning its seen-time if it had one.
    pub fn remove(&mut self, asset_id: &str) -> Option<DateTime<Utc>> {
        self.entries.remove(asset_id)
    }
}

impl SeenTimeStore for MemorySeenStore {
    fn get(&self, asset_id: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.entries.get(asset_id).copied())
    }

    fn set(&mut self, asset_id: &str, seen_at: DateTime<Utc>) -> Result<()> {
        self.entries.insert(asset_id.to_string(), seen_at);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(String, DateTime<Utc>)> {
        sorted_entries(&self.entries)
    }
}

/// Entries sorted oldest first, ids breaking ties.
pub(crate) fn sorted_entries(map: &HashMap<String, DateTime<Utc>>) -> Vec<(String, DateTime<Utc>)> {
    let mut entries: Vec<_> = map.iter().map(|(id, at)| (id.clone(), *at)).collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_entries_and_remove() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut store = MemorySeenStore::from_entries([("x", at), ("y", at)]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.remove("x"), Some(at));
        assert_eq!(store.get("x").unwrap(), None);
        assert_eq!(store.remove("x"), None);
    }
}
