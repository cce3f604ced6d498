// ABOUTME: Binary entry point wiring config, history, polling, hotkey, and tray together
// ABOUTME: A single mpsc loop is the serialization point for every state mutation

mod app;
mod clipboard;
mod config;
mod debounce;
mod entry;
mod history;
mod platform;
mod poller;
mod storage;
#[cfg(target_os = "macos")]
mod tray;

use anyhow::Result;
use app::{App, Command, Reaction};
use clipboard::Clipboard;
use config::Config;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use storage::{FileStore, KvStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "macos")]
use objc2_app_kit::NSApplication;
#[cfg(target_os = "macos")]
use objc2_foundation::MainThreadMarker;
#[cfg(target_os = "macos")]
use std::time::Instant;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // NSApplication must exist before any other AppKit call (pasteboard,
    // event monitor, tray icon).
    #[cfg(target_os = "macos")]
    {
        unsafe {
            let mtm = MainThreadMarker::new_unchecked();
            let _app = NSApplication::sharedApplication(mtm);
        }
    }

    let config = load_config();
    let clipboard = platform::system_clipboard()?;
    let store = FileStore::open_default()?;
    let mut app = App::new(config, clipboard, store);

    let (sender, receiver) = mpsc::channel();

    #[cfg(target_os = "macos")]
    let _monitor = setup_option_monitor(&app.config, sender.clone());

    #[cfg(target_os = "macos")]
    let _tray = match tray::MultiCopyTray::new() {
        Ok(tray) => Some(tray),
        Err(e) => {
            warn!("Failed to create menu bar icon: {e}");
            None
        }
    };

    info!("MultiCopy is running - double-tap Option to recall clipboard history");
    run_loop(&mut app, receiver, sender)
}

fn load_config() -> Config {
    let config = match Config::default_config_path() {
        Ok(path) => {
            if !path.exists() {
                match Config::save_default_config(&path) {
                    Ok(()) => info!("Created default configuration at {}", path.display()),
                    Err(e) => warn!("Failed to write default config: {e}"),
                }
            }
            match Config::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to load config: {e}. Using defaults");
                    Config::default()
                }
            }
        }
        Err(e) => {
            warn!("{e}. Using defaults");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        warn!("Invalid configuration: {e}. Using defaults");
        return Config::default();
    }

    config
}

#[cfg(target_os = "macos")]
fn setup_option_monitor(
    config: &Config,
    sender: Sender<Command>,
) -> Option<platform::macos::OptionKeyMonitor> {
    if !config.hotkey.enabled {
        info!("Global hotkey disabled by configuration");
        return None;
    }

    let mut monitor = platform::macos::OptionKeyMonitor::new();
    monitor.set_callback(move || {
        // Stamp the press at delivery time and marshal it onto the main
        // loop; the callback itself never touches shared state.
        let _ = sender.send(Command::ModifierPress(Instant::now()));
    });

    match monitor.register() {
        Ok(()) => Some(monitor),
        Err(e) => {
            warn!("Failed to set up global hotkey: {e}");
            warn!("Continuing with menu-bar-only operation");
            None
        }
    }
}

/// Single-threaded event loop: hotkey presses arrive through the channel,
/// poll ticks fire on the receive timeout, and tray events are drained each
/// iteration. Pending history writes are flushed between commands.
fn run_loop<C: Clipboard, S: KvStore>(
    app: &mut App<C, S>,
    receiver: Receiver<Command>,
    _sender: Sender<Command>,
) -> Result<()> {
    let poll_interval = app.config.poll_interval();

    loop {
        #[cfg(target_os = "macos")]
        {
            if let Some(event) = tray::MultiCopyTray::try_recv_tray_event() {
                match event {
                    tray::TrayEvent::ShowHistory => show_history(app),
                    tray::TrayEvent::ClearHistory => {
                        if let Err(e) = app.handle(Command::ClearHistory) {
                            warn!("Failed to clear history: {e}");
                        }
                    }
                    tray::TrayEvent::Quit => {
                        info!("Quit requested from menu");
                        break;
                    }
                }
            }
        }

        let command = match receiver.recv_timeout(poll_interval) {
            Ok(command) => command,
            Err(RecvTimeoutError::Timeout) => Command::Tick,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match app.handle(command) {
            Ok(Reaction::Activate) => show_history(app),
            Ok(_) => {}
            Err(e) => warn!("Command failed: {e}"),
        }

        app.flush();
    }

    app.flush();
    Ok(())
}

/// Presentation stub: the popup list window belongs to the UI layer; until
/// it lands, activation logs the current history previews.
fn show_history<C: Clipboard, S: KvStore>(app: &App<C, S>) {
    if app.history().is_empty() {
        info!("Clipboard history is empty");
        return;
    }

    info!("Clipboard history ({} entries):", app.history().len());
    for (index, entry) in app.history().entries().iter().enumerate() {
        info!("  {index}: {}", entry.display_text());
    }
}
