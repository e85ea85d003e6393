//! Seen-time store persisted to a JSON file.
//!
//! The whole map is read once on open and kept in memory. Every `set`
//! rewrites the file by writing a sibling temp file, syncing it, and
//! renaming it over the target, so a crash mid-write leaves either the
//! old map or the new one on disk, never a torn file.

use crate::error::{Result, StoreError};
use crate::memory::sorted_entries;
use crate::SeenTimeStore;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON file backed store: `{ "<asset id>": "<rfc3339>", ... }`
#[derive(Debug)]
pub struct JsonFileSeenStore {
    path: PathBuf,
    entries: HashMap<String, DateTime<Utc>>,
}

impl JsonFileSeenStore {
    /// Open the store at `path`. A missing file opens as an empty store and
    /// is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.display().to_string(),
                source,
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        info!("Opened seen-time store {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        // Sorted keys keep the file diffable
        let ordered: BTreeMap<&String, &DateTime<Utc>> = self.entries.iter().collect();
        let json = serde_json::to_vec_pretty(&ordered).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;

        let tmp_path = temp_path(&self.path);
        let mut tmp = File::create(&tmp_path).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.sync_all().map_err(io_err)?;
        drop(tmp);
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        sync_parent_dir(&self.path);

        debug!("Persisted {} seen-times to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl SeenTimeStore for JsonFileSeenStore {
    fn get(&self, asset_id: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.entries.get(asset_id).copied())
    }

    fn set(&mut self, asset_id: &str, seen_at: DateTime<Utc>) -> Result<()> {
        let previous = self.entries.insert(asset_id.to_string(), seen_at);
        if let Err(err) = self.persist() {
            // Keep memory consistent with what is on disk
            match previous {
                Some(at) => self.entries.insert(asset_id.to_string(), at),
                None => self.entries.remove(asset_id),
            };
            return Err(err);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(String, DateTime<Utc>)> {
        sorted_entries(&self.entries)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "seen".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}
