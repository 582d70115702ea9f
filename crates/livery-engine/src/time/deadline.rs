use std::time::{Duration, Instant};

/// One-shot timer that can be armed, cancelled, and polled.
///
/// Fires at most once per arming. Cancelling before the deadline guarantees
/// no late fire.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub const fn idle() -> Self {
        Self { at: None }
    }

    /// Arms (or re-arms) the timer to fire `after` past `now`.
    pub fn start(&mut self, now: Instant, after: Duration) {
        self.at = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
