//! # Token Stores
//!
//! [`TokenStore`] implementations for shells that do not bring their own: an
//! in-memory store and a JSON file store that survives restarts the way
//! browser local storage does.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::provider::TokenStore;

/// Volatile store. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Store backed by a single JSON object file. The file is re-read on every
/// access so changes made by other processes are picked up.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the store file, so a crash mid-write leaves the previous contents intact.
/// A file that cannot be parsed is treated as empty: `put` replaces it and
/// `remove` deletes it.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use the file at `path`, which need not exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> anyhow::Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read(&self.path)
            .with_context(|| format!("reading token store {}", self.path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("parsing token store {}", self.path.display()))
    }

    fn save(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("staging token store in {}", dir.display()))?;
        staged.write_all(&serde_json::to_vec_pretty(entries)?)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("writing token store {}", self.path.display()))?;
        Ok(())
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!("token store unreadable: {e:#}");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.load().unwrap_or_else(|e| {
            tracing::warn!("replacing unreadable token store: {e:#}");
            HashMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) {
        let Ok(mut entries) = self.load() else {
            // An unreadable file holds nothing worth keeping.
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("failed to discard token store: {e}");
            }
            return;
        };
        if entries.remove(key).is_some() {
            if let Err(e) = self.save(&entries) {
                tracing::error!("failed to remove {key} from token store: {e:#}");
            }
        }
    }
}
