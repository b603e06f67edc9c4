//! Fixed-period polling owned by a mounted page. Dropping the page drops the
//! poller, which is how an unmounted page stops refreshing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    period: Duration,
    next_due: Instant,
}

impl Poller {
    /// First tick is one full period after `now`; the mount itself fetches.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True at most once per period. A late check does not queue extra ticks.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }
}
