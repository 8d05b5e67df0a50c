use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;

/// Backend contract for collection persistence.
///
/// Implementations shuttle opaque strings; the payload shape is entirely the
/// business of [`CollectionStore`](crate::CollectionStore). `get` returns
/// `Ok(None)` for a key that was never written.
pub trait PersistedKeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One file per key under a base directory, `<dir>/<key>.json`.
///
/// Writes land in a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous payload intact rather than a torn file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl PersistedKeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create {}", self.base_dir.display()))?;
        let path = self.key_path(key);
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral runs.
///
/// Clones share the same map, so a caller can keep a handle to inspect what
/// the store wrote.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Lock poisoning is not propagated; the map itself stays coherent even
    // after a holder panicked.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Raw payload currently held under `key`, if any.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    /// Seeds a raw payload, bypassing the store. Handy for staging legacy or
    /// malformed data.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }
}

impl PersistedKeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_returns_none_for_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.get("favorites").unwrap().is_none());
    }

    #[test]
    fn test_file_store_writes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library"));

        store.set("favorites", "[1, 2]").unwrap();
        store.set("favorites", "[3]").unwrap();

        assert_eq!(store.get("favorites").unwrap().unwrap(), "[3]");
        assert!(dir.path().join("library").join("favorites.json").exists());
        assert!(!dir.path().join("library").join("favorites.tmp").exists());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let observer = store.clone();
        store.set("watchlist", "[]").unwrap();
        assert_eq!(observer.snapshot("watchlist").unwrap(), "[]");
    }
}
