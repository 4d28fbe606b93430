//! Clock implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::traits::Clock;

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Manually driven clock for tests and simulations.
///
/// Only moves forward: [`set`](Self::set) ignores timestamps in the past.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Advance by `secs`, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        let cur = self.now.load(Ordering::SeqCst);
        self.now.store(cur.saturating_add(secs), Ordering::SeqCst);
    }

    /// Jump to `ts` if it is not in the past.
    pub fn set(&self, ts: u64) {
        self.now.fetch_max(ts, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let c = ManualClock::new(100);
        c.advance(50);
        assert_eq!(c.now(), 150);
    }

    #[test]
    fn manual_clock_never_goes_back() {
        let c = ManualClock::new(100);
        c.set(90);
        assert_eq!(c.now(), 100);
        c.set(200);
        assert_eq!(c.now(), 200);
    }

    #[test]
    fn manual_clock_saturates() {
        let c = ManualClock::new(u64::MAX - 1);
        c.advance(10);
        assert_eq!(c.now(), u64::MAX);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
