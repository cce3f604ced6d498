// ABOUTME: Durable key-value storage for the serialized clipboard history
// ABOUTME: FileStore keeps one file per key under the platform data directory

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Storage key the full history sequence is persisted under.
pub const HISTORY_KEY: &str = "clipboard_history";

/// Minimal durable key-value store. The history store round-trips its
/// serialized entry sequence through this under a single fixed key.
pub trait KvStore {
    /// Returns the stored bytes for `key`, or `None` when the key is absent
    /// or unreadable. Read failures are never surfaced.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// File-backed store: each key maps to one file inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Opens the store at the platform default data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().context("Failed to determine data directory")?;
        Ok(Self::new(data_dir.join("multicopy")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
