//! Key-value persistence for the last roll and the theme preference.
//!
//! The raw store only deals in strings, like a browser's local storage.
//! [`Persistence`] layers the two typed records on top of it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::StoreError;
use crate::theme::Theme;
use crate::RollResult;

pub const LAST_ROLL_KEY: &str = "lastRoll";
pub const THEME_KEY: &str = "theme";

/// Synchronous string-keyed storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// A store kept as one JSON object on disk. Every mutation rewrites the file
/// through a sibling temp file and a rename, so readers never see half a write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries: IndexMap<String, String> = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => IndexMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::CorruptFile {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => IndexMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then adopt them. On failure the store keeps its
    /// previous contents, matching what is still on disk.
    fn commit(&mut self, entries: IndexMap<String, String>) -> Result<(), StoreError> {
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn flush(&self, entries: &IndexMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        trace!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value);
        self.commit(entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.shift_remove(key);
        self.commit(entries)
    }
}

/* ---------------- typed records ---------------- */

pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Overwrite the stored last roll.
    pub fn save_last_roll(&mut self, roll: &RollResult) -> Result<(), StoreError> {
        let text = serde_json::to_string(roll)?;
        debug!(record = %text, "saving last roll");
        self.store.set(LAST_ROLL_KEY, text)
    }

    /// `Ok(None)` when nothing (or an empty string) is stored.
    pub fn load_last_roll(&self) -> Result<Option<RollResult>, StoreError> {
        let Some(text) = self.store.get(LAST_ROLL_KEY).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let values: Vec<u8> = serde_json::from_str(text).map_err(|source| StoreError::Decode {
            key: LAST_ROLL_KEY,
            source,
        })?;
        RollResult::new(values)
            .map(Some)
            .map_err(|e| StoreError::Invalid {
                key: LAST_ROLL_KEY,
                reason: e.to_string(),
            })
    }

    pub fn clear_last_roll(&mut self) -> Result<(), StoreError> {
        self.store.remove(LAST_ROLL_KEY)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.as_str().to_string())
    }

    pub fn load_theme(&self) -> Result<Option<Theme>, StoreError> {
        let Some(text) = self.store.get(THEME_KEY) else {
            return Ok(None);
        };
        text.parse::<Theme>().map(Some).map_err(|e| StoreError::Invalid {
            key: THEME_KEY,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_remove_missing_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nope").is_ok());
        store.set("a", "1".into()).unwrap();
        assert_eq!(store.get("a"), Some("1"));
        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn empty_last_roll_string_is_absent() {
        let mut store = MemoryStore::new();
        store.set(LAST_ROLL_KEY, String::new()).unwrap();
        let p = Persistence::new(store);
        assert_eq!(p.load_last_roll().unwrap(), None);
    }
}
