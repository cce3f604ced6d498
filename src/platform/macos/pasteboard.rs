// ABOUTME: Clipboard accessor backed by the general NSPasteboard
// ABOUTME: changeCount serves as the opaque generation token for the poller

use crate::clipboard::Clipboard;
use objc2::rc::Retained;
use objc2_app_kit::{NSPasteboard, NSPasteboardTypeString};
use objc2_foundation::NSString;

pub struct SystemPasteboard {
    pasteboard: Retained<NSPasteboard>,
}

impl SystemPasteboard {
    pub fn new() -> Self {
        Self {
            pasteboard: unsafe { NSPasteboard::generalPasteboard() },
        }
    }
}

impl Clipboard for SystemPasteboard {
    fn change_count(&self) -> i64 {
        unsafe { self.pasteboard.changeCount() as i64 }
    }

    fn read_text(&self) -> Option<String> {
        unsafe { self.pasteboard.stringForType(NSPasteboardTypeString) }
            .map(|s| s.to_string())
    }

    fn write_text(&self, text: &str) {
        unsafe {
            self.pasteboard.clearContents();
            self.pasteboard
                .setString_forType(&NSString::from_str(text), NSPasteboardTypeString);
        }
    }
}
