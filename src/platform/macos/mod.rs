// ABOUTME: macOS implementations of the clipboard accessor and the option-key monitor
// ABOUTME: Built on NSPasteboard and NSEvent global monitors via objc2

mod hotkey;
mod pasteboard;

pub use hotkey::OptionKeyMonitor;
pub use pasteboard::SystemPasteboard;
