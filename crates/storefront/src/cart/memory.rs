//! In-memory cart store, used by tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use super::CartStore;

/// Cart store keeping blobs in a mutex-guarded map.
#[derive(Default)]
pub struct MemoryCartStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let blobs = self.blobs.lock().map_err(poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> io::Result<()> {
        let mut blobs = self.blobs.lock().map_err(poisoned)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut blobs = self.blobs.lock().map_err(poisoned)?;
        blobs.remove(key);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> io::Error {
    io::Error::other("cart store mutex poisoned")
}
