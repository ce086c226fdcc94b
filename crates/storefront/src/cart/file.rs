//! File-backed cart store.
//!
//! One file per cart key under a data directory. A plain truncate-write is
//! used per operation; blobs are small and each handler performs the whole
//! read-modify-write cycle before responding.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::CartStore;

/// Cart store persisting each blob as `{dir}/{key}.json`.
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the blob file for `key`.
    ///
    /// Keys are cart IDs Cartwheel generated itself (UUIDs); they are still
    /// sanity-checked so a corrupted session value cannot escape the
    /// data directory.
    fn path(&self, key: &str) -> io::Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid cart key: {key:?}"),
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStore for FileCartStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)?) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, blob: &str) -> io::Result<()> {
        fs::write(self.path(key)?, blob)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path()).unwrap();
        assert_eq!(store.get("nobody").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path()).unwrap();

        store.set("abc-123", "[1,2,3]").unwrap();
        assert_eq!(store.get("abc-123").unwrap().as_deref(), Some("[1,2,3]"));

        store.set("abc-123", "[]").unwrap();
        assert_eq!(store.get("abc-123").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path()).unwrap();

        store.set("abc", "[]").unwrap();
        store.remove("abc").unwrap();
        store.remove("abc").unwrap();
        assert_eq!(store.get("abc").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path()).unwrap();
        assert!(store.get("../escape").is_err());
        assert!(store.set("a/b", "[]").is_err());
        assert!(store.get("").is_err());
    }
}
