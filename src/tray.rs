// ABOUTME: Menu bar icon and menu using the tray-icon crate
// ABOUTME: Events are polled from the main loop via try_recv, never on a separate thread

use anyhow::Result;
use tracing::debug;
use tray_icon::{
    TrayIcon, TrayIconBuilder, TrayIconEvent,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
};

const ICON_SIZE: u32 = 32;

pub struct MultiCopyTray {
    _tray_icon: TrayIcon,
}

// Menu item IDs - created at runtime
fn show_history_id() -> MenuId {
    MenuId::new("show_history")
}
fn clear_history_id() -> MenuId {
    MenuId::new("clear_history")
}
fn quit_id() -> MenuId {
    MenuId::new("quit_multicopy")
}

impl MultiCopyTray {
    pub fn new() -> Result<Self> {
        let menu = Menu::new();

        let show_item = MenuItem::with_id(show_history_id(), "Show History", true, None);
        let separator1 = PredefinedMenuItem::separator();
        let clear_item = MenuItem::with_id(clear_history_id(), "Clear History", true, None);
        let separator2 = PredefinedMenuItem::separator();
        let quit_item = MenuItem::with_id(quit_id(), "Quit MultiCopy", true, None);

        menu.append(&show_item)?;
        menu.append(&separator1)?;
        menu.append(&clear_item)?;
        menu.append(&separator2)?;
        menu.append(&quit_item)?;

        let icon = tray_icon::Icon::from_rgba(clipboard_glyph_rgba(), ICON_SIZE, ICON_SIZE)?;

        // Template mode lets macOS recolor the icon for dark menu bars.
        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip("MultiCopy Clipboard History")
            .with_icon(icon)
            .with_icon_as_template(true)
            .build()?;

        debug!("Created menu bar tray icon");

        Ok(Self {
            _tray_icon: tray_icon,
        })
    }

    /// Check for tray icon events and return the event type
    pub fn try_recv_tray_event() -> Option<TrayEvent> {
        if let Ok(event) = TrayIconEvent::receiver().try_recv() {
            debug!("Tray icon event: {event:?}");
            if let TrayIconEvent::Click { .. } = event {
                return Some(TrayEvent::ShowHistory);
            }
        }

        if let Ok(event) = MenuEvent::receiver().try_recv() {
            debug!("Menu event: {event:?}");
            if event.id == show_history_id() {
                return Some(TrayEvent::ShowHistory);
            } else if event.id == clear_history_id() {
                return Some(TrayEvent::ClearHistory);
            } else if event.id == quit_id() {
                return Some(TrayEvent::Quit);
            }
        }

        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrayEvent {
    ShowHistory,
    ClearHistory,
    Quit,
}

/// Draws a simple clipboard outline into an RGBA buffer: a bordered body
/// with a clip across the top edge. Opaque black so template mode works.
fn clipboard_glyph_rgba() -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    let mut paint = |x: usize, y: usize| {
        let offset = (y * size + x) * 4;
        rgba[offset..offset + 4].copy_from_slice(&[0, 0, 0, 255]);
    };

    // Clipboard body border (two pixels thick).
    for y in 5..30 {
        for x in 6..26 {
            let on_border = y < 7 || y >= 28 || x < 8 || x >= 24;
            if on_border {
                paint(x, y);
            }
        }
    }

    // Clip across the top edge.
    for y in 2..8 {
        for x in 12..20 {
            paint(x, y);
        }
    }

    rgba
}
