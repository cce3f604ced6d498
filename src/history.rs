// ABOUTME: Bounded, deduplicating clipboard history ordered most-recent-first
// ABOUTME: Owns the persistence round-trip through a KvStore under a fixed key

use crate::entry::ClipEntry;
use crate::storage::{HISTORY_KEY, KvStore};
use anyhow::Result;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("index {index} is out of range for history of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered, size-bounded, deduplicating collection of clipboard entries.
/// Head (index 0) is the most recent entry. No two entries hold equal
/// trimmed content at any time.
pub struct HistoryStore {
    entries: Vec<ClipEntry>,
    capacity: usize,
    dirty: bool,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            dirty: false,
        }
    }

    /// Records freshly captured clipboard text. The content is trimmed;
    /// empty results are dropped. Content equal to an existing entry moves
    /// to the head with a fresh id and timestamp. Insertion beyond capacity
    /// evicts the oldest entry.
    pub fn insert(&mut self, content: &str) {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return;
        }

        self.entries.retain(|e| e.content != trimmed);
        self.entries.insert(0, ClipEntry::new(trimmed.to_string()));
        self.entries.truncate(self.capacity);
        self.dirty = true;
    }

    /// Returns the entry at `index` for re-copying (0 = most recent).
    pub fn copy_out(&self, index: usize) -> Result<&ClipEntry, HistoryError> {
        self.entries.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Read-only snapshot in most-recent-first order.
    pub fn entries(&self) -> &[ClipEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dirty = true;
    }

    /// Replaces the in-memory sequence with whatever the store holds.
    /// Absent or malformed data loads as an empty history, never an error.
    pub fn load(&mut self, store: &dyn KvStore) {
        self.entries = match store.get(HISTORY_KEY) {
            Some(bytes) => match serde_json::from_slice::<Vec<ClipEntry>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding malformed clipboard history: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.entries.truncate(self.capacity);
        self.dirty = false;
        debug!("Loaded {} history entries", self.entries.len());
    }

    /// Persists the full sequence. Writes are coalesced through the dirty
    /// flag so unchanged state is never rewritten.
    pub fn save(&mut self, store: &dyn KvStore) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bytes = serde_json::to_vec(&self.entries)?;
        store.set(HISTORY_KEY, &bytes)?;
        self.dirty = false;
        Ok(())
    }

    #[allow(dead_code)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;
    use tempfile::TempDir;

    fn contents(store: &HistoryStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.content.as_str()).collect()
    }

    #[test]
    fn test_insert_into_empty_store() {
        let mut store = HistoryStore::new(100);
        store.insert("  hello  ");

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].content, "hello");
    }

    #[test]
    fn test_insert_empty_content_is_noop() {
        let mut store = HistoryStore::new(100);
        store.insert("   \n\t ");

        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_inserting_same_content_twice_keeps_size_one() {
        let mut store = HistoryStore::new(100);
        store.insert("hello");
        store.insert("hello");

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].content, "hello");
    }

    #[test]
    fn test_duplicate_insert_refreshes_identity() {
        let mut store = HistoryStore::new(100);
        store.insert("hello");
        let first_id = store.entries()[0].id;

        store.insert("hello");
        assert_ne!(store.entries()[0].id, first_id);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut store = HistoryStore::new(3);
        for content in ["one", "two", "three", "four"] {
            store.insert(content);
        }

        assert_eq!(store.len(), 3);
        assert_eq!(contents(&store), vec!["four", "three", "two"]);
    }

    #[test]
    fn test_duplicate_of_non_head_entry_moves_to_front() {
        let mut store = HistoryStore::new(3);
        store.insert("a");
        store.insert("b");
        store.insert("c");
        store.insert("d");
        assert_eq!(contents(&store), vec!["d", "c", "b"]);

        store.insert("b");
        assert_eq!(contents(&store), vec!["b", "d", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_copy_out_valid_index() {
        let mut store = HistoryStore::new(100);
        store.insert("first");
        store.insert("second");

        assert_eq!(store.copy_out(1).unwrap().content, "first");
    }

    #[test]
    fn test_copy_out_index_out_of_range() {
        let mut store = HistoryStore::new(100);
        store.insert("only");

        assert_eq!(
            store.copy_out(1),
            Err(HistoryError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            store.copy_out(99),
            Err(HistoryError::IndexOutOfRange { index: 99, len: 1 })
        );
    }

    #[test]
    fn test_clear_empties_and_marks_dirty() {
        let mut store = HistoryStore::new(100);
        store.insert("something");
        store.clear();

        assert!(store.is_empty());
        assert!(store.is_dirty());
    }

    #[test]
    fn test_save_then_load_round_trips_identical_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileStore::new(temp_dir.path().to_path_buf());

        let mut store = HistoryStore::new(100);
        store.insert("first entry");
        store.insert("second entry\nwith a newline");
        store.save(&kv).unwrap();

        let mut restored = HistoryStore::new(100);
        restored.load(&kv);

        assert_eq!(restored.entries(), store.entries());
        assert_eq!(restored.entries()[0].preview, "second entry with a newline");
    }

    #[test]
    fn test_save_skipped_when_not_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileStore::new(temp_dir.path().to_path_buf());

        let mut store = HistoryStore::new(100);
        store.insert("entry");
        store.save(&kv).unwrap();
        assert!(!store.is_dirty());

        // Second save with no mutation must not touch the store.
        store.save(&kv).unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_load_malformed_data_yields_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileStore::new(temp_dir.path().to_path_buf());
        kv.set(HISTORY_KEY, b"{not json at all").unwrap();

        let mut store = HistoryStore::new(100);
        store.load(&kv);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_missing_data_yields_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileStore::new(temp_dir.path().to_path_buf());

        let mut store = HistoryStore::new(100);
        store.insert("stale in-memory entry");
        store.load(&kv);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_clamps_to_capacity() {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileStore::new(temp_dir.path().to_path_buf());

        let mut big = HistoryStore::new(10);
        for i in 0..10 {
            big.insert(&format!("entry {i}"));
        }
        big.save(&kv).unwrap();

        let mut small = HistoryStore::new(3);
        small.load(&kv);
        assert_eq!(small.len(), 3);
        assert_eq!(small.entries()[0].content, "entry 9");
    }
}
