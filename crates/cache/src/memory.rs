//! In-memory cache store for testing.

use crate::error::Result;
use crate::store::{Entry, VersionStore};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory [`VersionStore`] that also counts writes, so tests can assert
/// that a fresh entry was left untouched.
///
/// ```
/// use ghostyum_cache::{MemoryStore, VersionStore};
///
/// let store = MemoryStore::with_entry("latest-version", 100, "5.2.0");
/// assert_eq!(store.get("latest-version").unwrap().unwrap().value, "5.2.0");
/// assert_eq!(store.writes(), 0);
/// ```
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_entry(key: impl Into<String>, timestamp: i64, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().insert(key.into(), Entry::new(timestamp, value));
        store
    }

    /// Number of successful [`put`](VersionStore::put) calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned lock only means another test thread panicked; the map
        // itself is still usable.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VersionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Entry>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, timestamp: i64, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), Entry::new(timestamp, value));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
