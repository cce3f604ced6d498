// ABOUTME: Double-tap detection over modifier key press events
// ABOUTME: Pure state machine fed explicit instants so tests need no real timers

use std::time::{Duration, Instant};

/// Recognizes two qualifying presses within a fixed window as one logical
/// "activate" gesture. Release edges and unrelated keys never reach this
/// type; the platform event source filters them out.
///
/// States: idle (`armed_at == None`) and armed-once. An armed state whose
/// window has elapsed counts as idle again; the expiry is observed on the
/// next press rather than through a timer, which is indistinguishable from
/// an eager timeout since expiry alone emits no signal.
pub struct TapDetector {
    window: Duration,
    armed_at: Option<Instant>,
}

impl TapDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    /// Feeds one modifier press edge. Returns true exactly when this press
    /// completes a double tap, after which the detector is idle again.
    pub fn press(&mut self, now: Instant) -> bool {
        match self.armed_at {
            Some(first) if now.duration_since(first) <= self.window => {
                self.armed_at = None;
                true
            }
            _ => {
                self.armed_at = Some(now);
                false
            }
        }
    }

    #[allow(dead_code)]
    pub fn is_armed(&self, now: Instant) -> bool {
        matches!(self.armed_at, Some(first) if now.duration_since(first) <= self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_single_press_does_not_activate() {
        let mut detector = TapDetector::new(WINDOW);
        let now = Instant::now();

        assert!(!detector.press(now));
        assert!(detector.is_armed(now));
    }

    #[test]
    fn test_double_tap_within_window_activates_once() {
        let mut detector = TapDetector::new(WINDOW);
        let start = Instant::now();

        assert!(!detector.press(start));
        assert!(detector.press(start + Duration::from_millis(200)));

        // Count reset: the very next press arms again instead of firing.
        assert!(!detector.press(start + Duration::from_millis(250)));
    }

    #[test]
    fn test_presses_separated_by_more_than_window_never_activate() {
        let mut detector = TapDetector::new(WINDOW);
        let start = Instant::now();

        assert!(!detector.press(start));
        assert!(!detector.press(start + Duration::from_millis(700)));
        assert!(!detector.press(start + Duration::from_millis(1400)));
    }

    #[test]
    fn test_press_at_exact_window_boundary_activates() {
        let mut detector = TapDetector::new(WINDOW);
        let start = Instant::now();

        assert!(!detector.press(start));
        assert!(detector.press(start + WINDOW));
    }

    #[test]
    fn test_stale_arm_is_treated_as_idle() {
        let mut detector = TapDetector::new(WINDOW);
        let start = Instant::now();

        assert!(!detector.press(start));
        assert!(!detector.is_armed(start + Duration::from_millis(600)));

        // The late press re-arms, and a quick follow-up fires.
        assert!(!detector.press(start + Duration::from_millis(600)));
        assert!(detector.press(start + Duration::from_millis(800)));
    }

    #[test]
    fn test_triple_tap_fires_once_then_rearms() {
        let mut detector = TapDetector::new(WINDOW);
        let start = Instant::now();

        assert!(!detector.press(start));
        assert!(detector.press(start + Duration::from_millis(100)));
        assert!(!detector.press(start + Duration::from_millis(200)));
        assert!(detector.press(start + Duration::from_millis(300)));
    }
}
