// ABOUTME: Polling-based clipboard change detection using the generation token
// ABOUTME: Each tick is O(1) when nothing changed; content is only read after a token change

use crate::clipboard::Clipboard;
use crate::history::HistoryStore;
use tracing::debug;

/// Compares the clipboard generation token against the last observed value
/// and feeds new text into the history store. The token is updated on every
/// change, including non-text ones, so a rapid non-text-then-text sequence
/// is still picked up on the following tick.
pub struct ChangePoller {
    last_seen: i64,
}

impl ChangePoller {
    /// Starts observing from the clipboard's current generation. Content
    /// already on the clipboard at startup is not captured.
    pub fn new(clipboard: &dyn Clipboard) -> Self {
        Self {
            last_seen: clipboard.change_count(),
        }
    }

    /// One poll cycle. Returns true when a new entry was recorded.
    pub fn tick(&mut self, clipboard: &dyn Clipboard, history: &mut HistoryStore) -> bool {
        let current = clipboard.change_count();
        if current == self.last_seen {
            return false;
        }
        self.last_seen = current;

        match clipboard.read_text() {
            Some(text) if !text.trim().is_empty() => {
                debug!("Clipboard changed (generation {current}), recording entry");
                history.insert(&text);
                true
            }
            _ => false,
        }
    }

    /// Re-syncs the token after this process wrote the clipboard itself, so
    /// re-copying a history entry is not captured as a new change.
    pub fn mark_seen(&mut self, clipboard: &dyn Clipboard) {
        self.last_seen = clipboard.change_count();
    }
}
