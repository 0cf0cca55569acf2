//! Cancelable one-shot timers.
//!
//! Timers are polled: the owner calls [`Timer::fire`] with the current time
//! (typically from its event loop) and acts when it returns `true`. Hosts can
//! ask for the earliest pending deadline to schedule a wake-up.

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

/// A single pending deadline. Starting the timer again replaces the old
/// deadline, so there is never more than one outstanding expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to expire `delay` after `now`, cancelling any pending expiry.
    pub fn start(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Cancel the pending expiry, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether an expiry is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the pending deadline has passed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consume the expiry if it is due. Returns `true` exactly once per
    /// armed deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

/// Earliest of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start(t0, Duration::from_millis(250));

        assert!(timer.is_pending());
        assert!(!timer.fire(t0 + Duration::from_millis(249)));
        assert!(timer.fire(t0 + Duration::from_millis(250)));
        assert!(!timer.fire(t0 + Duration::from_millis(500)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_restart_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start(t0, Duration::from_millis(250));
        timer.start(t0 + Duration::from_millis(200), Duration::from_millis(250));

        assert!(!timer.fire(t0 + Duration::from_millis(300)));
        assert!(timer.fire(t0 + Duration::from_millis(450)));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start(t0, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_earliest() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(5);
        assert_eq!(earliest(Some(t1), Some(t0)), Some(t0));
        assert_eq!(earliest(None, Some(t1)), Some(t1));
        assert_eq!(earliest(Some(t0), None), Some(t0));
        assert_eq!(earliest(None, None), None);
    }
}
