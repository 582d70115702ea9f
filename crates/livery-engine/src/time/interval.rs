use std::time::{Duration, Instant};

/// Recurring timer driven by caller-supplied timestamps.
///
/// `Interval` never reads the clock itself; hosts pass `now` on every poll so
/// tests can drive it deterministically. Missed periods do not burst: after a
/// long stall the interval fires once and re-arms one period after `now`.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// First fire happens one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        debug_assert!(!period.is_zero());
        Self { period, next: start + period }
    }

    /// Returns `true` when a period has elapsed since the last fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
