//! Transient gesture state of a knob.

use serde::{Deserialize, Serialize};

use crate::timer::{Duration, Instant, Timer, earliest};

/// Default double-tap window in milliseconds.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 500;
/// Default wheel commit debounce in milliseconds.
pub const WHEEL_COMMIT_DELAY_MS: u64 = 250;

/// Timing parameters for gesture detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GestureTiming {
    /// Window, starting at the first tap, in which taps are counted.
    pub double_tap_window_ms: u64,
    /// Quiet period after the last wheel tick before the value is committed.
    pub wheel_commit_delay_ms: u64,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            wheel_commit_delay_ms: WHEEL_COMMIT_DELAY_MS,
        }
    }
}

impl GestureTiming {
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    pub fn wheel_commit_delay(&self) -> Duration {
        Duration::from_millis(self.wheel_commit_delay_ms)
    }
}

/// Phase of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No button or finger is driving the value.
    #[default]
    Idle,
    /// A primary button or single finger is down on the widget.
    Dragging,
}

/// Gesture bookkeeping owned by a knob.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    /// Primary button (or a finger) is down.
    pub(crate) button_down: bool,
    /// Touch-starts seen in the current double-tap window.
    pub(crate) tap_count: u32,
    pub(crate) double_tap: Timer,
    pub(crate) wheel_commit: Timer,
}

impl GestureState {
    /// Create an idle gesture state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current drag phase.
    pub fn phase(&self) -> DragPhase {
        if self.button_down {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Touch-starts counted in the current double-tap window.
    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Whether a wheel commit is waiting for its debounce to elapse.
    pub fn has_pending_wheel_commit(&self) -> bool {
        self.wheel_commit.is_pending()
    }

    /// Whether a double-tap window is open.
    pub fn has_pending_double_tap(&self) -> bool {
        self.double_tap.is_pending()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.double_tap.deadline(), self.wheel_commit.deadline())
    }

    /// Drop all gesture state and cancel both timers.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
