// ABOUTME: Global NSEvent monitor filtering Option-key press edges system-wide
// ABOUTME: Forwards each qualifying press to a callback; the gesture logic lives in the core

use anyhow::{Result, anyhow};
use block2::RcBlock;
use objc2::runtime::AnyObject;
use objc2_app_kit::{NSEvent, NSEventMask, NSEventModifierFlags, NSEventType};
use std::ptr::NonNull;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// Hardware keycodes for the left and right Option keys. Both sides count
// as the same logical modifier for the double-tap gesture.
const KEYCODE_OPTION_LEFT: u16 = 58;
const KEYCODE_OPTION_RIGHT: u16 = 61;

// Link to ApplicationServices framework for accessibility permissions
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

// Global callback storage for the NSEvent monitor
static MODIFIER_PRESS_CALLBACK: Mutex<Option<Arc<dyn Fn() + Send + Sync>>> = Mutex::new(None);

/// Watches flag-change events system-wide and invokes the registered
/// callback once per Option-key press edge. Release edges and every other
/// key are ignored here, so the core debouncer only ever sees qualifying
/// presses.
pub struct OptionKeyMonitor {
    event_monitor: Option<objc2::rc::Retained<AnyObject>>,
}

impl OptionKeyMonitor {
    pub fn new() -> Self {
        Self {
            event_monitor: None,
        }
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut global_callback = MODIFIER_PRESS_CALLBACK.lock().unwrap();
        *global_callback = Some(Arc::new(callback));
    }

    pub fn register(&mut self) -> Result<()> {
        if !self.check_and_report_accessibility_permissions() {
            return Err(anyhow!(
                "Accessibility permissions required for the global hotkey. \
                 Please enable accessibility access for MultiCopy in System Settings > \
                 Privacy & Security > Accessibility and restart MultiCopy"
            ));
        }

        unsafe {
            // Flag-change events carry both press and release edges; the
            // Option flag being set distinguishes the press.
            let handler = RcBlock::new(|event: NonNull<NSEvent>| {
                let event = event.as_ref();

                if event.r#type() != NSEventType::FlagsChanged {
                    return;
                }

                let key_code = event.keyCode();
                if key_code != KEYCODE_OPTION_LEFT && key_code != KEYCODE_OPTION_RIGHT {
                    return;
                }

                if !event.modifierFlags().contains(NSEventModifierFlags::Option) {
                    return;
                }

                if let Ok(callback_guard) = MODIFIER_PRESS_CALLBACK.lock() {
                    if let Some(ref callback) = *callback_guard {
                        callback();
                    }
                }
            });

            let mask = NSEventMask::FlagsChanged;
            let monitor = NSEvent::addGlobalMonitorForEventsMatchingMask_handler(mask, &handler);

            match monitor {
                Some(monitor_obj) => {
                    self.event_monitor = Some(monitor_obj);
                    info!("Registered global Option-key monitor");
                    Ok(())
                }
                None => Err(anyhow!(
                    "Failed to register global event monitor. \
                     Please ensure accessibility permissions are granted in System Settings > \
                     Privacy & Security > Accessibility"
                )),
            }
        }
    }

    fn check_and_report_accessibility_permissions(&self) -> bool {
        if unsafe { AXIsProcessTrusted() } {
            return true;
        }

        warn!("Accessibility permissions not granted");
        warn!("To enable the double-tap Option hotkey:");
        warn!("   1. Open System Settings > Privacy & Security > Accessibility");
        warn!("   2. Click the lock icon to make changes (enter your password)");
        warn!("   3. Add MultiCopy to the list and enable its checkbox");
        warn!("   4. Restart MultiCopy");
        warn!("For now, use the menu bar icon to access clipboard history");

        false
    }

    /// Removes the monitor. No further events are delivered once this
    /// returns.
    pub fn unregister(&mut self) {
        if let Some(monitor) = self.event_monitor.take() {
            unsafe {
                NSEvent::removeMonitor(&monitor);
            }
            info!("Unregistered global Option-key monitor");
        }
    }
}

impl Drop for OptionKeyMonitor {
    fn drop(&mut self) {
        self.unregister();
    }
}
