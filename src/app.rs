// ABOUTME: Core application state coordinating history, polling, and the tap detector
// ABOUTME: All mutation funnels through handle() on a single thread; no locks needed

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::debounce::TapDetector;
use crate::history::HistoryStore;
use crate::poller::ChangePoller;
use crate::storage::KvStore;
use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

/// Commands delivered to the single serialization point. Timer ticks, hotkey
/// presses, and presentation-layer requests all arrive through this enum so
/// shared state is only ever touched from one thread.
#[derive(Debug, Clone)]
pub enum Command {
    /// One poll cycle of the clipboard change detector.
    Tick,
    /// A press edge of either Option key, stamped at delivery time.
    ModifierPress(Instant),
    /// Re-copy the history entry at the given index to the clipboard.
    /// Sent by the presentation layer when the user selects an entry.
    #[allow(dead_code)]
    CopyEntry(usize),
    /// Empty the history and persist the empty state.
    ClearHistory,
    /// Reload the history from durable storage.
    #[allow(dead_code)]
    Reload,
}

/// What the caller should do after a command was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    None,
    /// The history sequence changed; any visible list should refresh.
    HistoryChanged,
    /// A double tap was recognized; the presentation layer opens its popup.
    Activate,
}

pub struct App<C: Clipboard, S: KvStore> {
    pub config: Config,
    history: HistoryStore,
    poller: ChangePoller,
    detector: TapDetector,
    clipboard: C,
    store: S,
}

impl<C: Clipboard, S: KvStore> App<C, S> {
    /// Builds the app and loads any persisted history. The poller starts at
    /// the clipboard's current generation, so whatever is on the clipboard
    /// at launch is not captured.
    pub fn new(config: Config, clipboard: C, store: S) -> Self {
        let mut history = HistoryStore::new(config.history.capacity);
        history.load(&store);

        let poller = ChangePoller::new(&clipboard);
        let detector = TapDetector::new(config.double_tap_window());

        Self {
            config,
            history,
            poller,
            detector,
            clipboard,
            store,
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<Reaction> {
        match command {
            Command::Tick => {
                if self.poller.tick(&self.clipboard, &mut self.history) {
                    Ok(Reaction::HistoryChanged)
                } else {
                    Ok(Reaction::None)
                }
            }

            Command::ModifierPress(at) => {
                if self.detector.press(at) {
                    info!("Double-tap Option detected");
                    Ok(Reaction::Activate)
                } else {
                    Ok(Reaction::None)
                }
            }

            Command::CopyEntry(index) => {
                let entry = self.history.copy_out(index)?;
                self.clipboard.write_text(&entry.content);
                // Our own write must not be re-captured as a new entry.
                self.poller.mark_seen(&self.clipboard);
                info!("Copied history entry {index} back to the clipboard");
                Ok(Reaction::None)
            }

            Command::ClearHistory => {
                self.history.clear();
                info!("Clipboard history cleared");
                Ok(Reaction::HistoryChanged)
            }

            Command::Reload => {
                self.history.load(&self.store);
                Ok(Reaction::HistoryChanged)
            }
        }
    }

    /// Persists pending history mutations. Called from the event loop after
    /// each command; failures are logged and retried on the next mutation.
    pub fn flush(&mut self) {
        if let Err(e) = self.history.save(&self.store) {
            warn!("Failed to persist clipboard history: {e}");
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
