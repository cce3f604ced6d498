// ABOUTME: Platform layer exposing the system clipboard and the global key monitor
// ABOUTME: Only macOS is supported; other targets get a stub so core tests still run

use crate::clipboard::Clipboard;
use anyhow::Result;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub fn system_clipboard() -> Result<Box<dyn Clipboard>> {
    Ok(Box::new(macos::SystemPasteboard::new()))
}

#[cfg(not(target_os = "macos"))]
pub fn system_clipboard() -> Result<Box<dyn Clipboard>> {
    anyhow::bail!("the system clipboard is only available on macOS")
}
