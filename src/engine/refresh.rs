//! The periodic refresh process.
//!
//! A `RefreshTimer` holds at most one live `TimerHandle`. Starting always
//! cancels the previous handle first, so a DisplaySet change can never leave a
//! stale process computing against an outdated list, and two quick changes in a
//! row still leave exactly one process running.
//!
//! The timer does not sleep or spawn anything. The host loop owns time: it asks
//! for [`RefreshTimer::next_due`], waits however it likes, then calls
//! [`RefreshTimer::poll`] with the current `Instant`.
//!
//! ```text
//! start(t0) ──▶ due at t0+1s ──poll──▶ fire ──▶ due at t0+2s ──▶ ...
//!     ▲                                   │
//!     └──── start(t1) cancels handle ◀────┘ (schedule restarts from t1)
//! ```
//!
//! Late polls fire a single tick and skip ahead to the next slot in the
//! future; missed ticks are not replayed.

use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed refresh cadence.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

/// Explicit handle for one running periodic process.
#[derive(Debug)]
struct TimerHandle {
    id: u64,
    next_due: Instant,
}

#[derive(Debug)]
pub struct RefreshTimer {
    interval: Duration,
    active: Option<TimerHandle>,
    next_id: u64,
}

impl RefreshTimer {
    /// `interval` is clamped to at least one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(1)), active: None, next_id: 0 }
    }

    /// Cancel any running process, then start a new one anchored at `now`.
    ///
    /// Returns `true` if a previous process had to be canceled.
    pub fn start(&mut self, now: Instant) -> bool {
        let canceled = self.cancel();

        self.next_id += 1;
        let handle = TimerHandle { id: self.next_id, next_due: now + self.interval };
        debug!(timer = handle.id, interval_ms = self.interval.as_millis() as u64, "refresh timer started");
        self.active = Some(handle);

        canceled
    }

    /// Stop the running process, if any. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                debug!(timer = handle.id, "refresh timer canceled");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// When the running process next fires.
    pub fn next_due(&self) -> Option<Instant> {
        self.active.as_ref().map(|h| h.next_due)
    }

    /// Fire if the running process is due at `now`. At most one tick per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let interval = self.interval;
        let Some(handle) = self.active.as_mut() else {
            return false;
        };
        if now < handle.next_due {
            return false;
        }

        while handle.next_due <= now {
            handle.next_due += interval;
        }
        true
    }
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(REFRESH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_on_fixed_cadence() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::default();
        assert!(!timer.poll(t0));

        assert!(!timer.start(t0));
        assert_eq!(timer.next_due(), Some(t0 + ms(1000)));

        assert!(!timer.poll(t0 + ms(999)));
        assert!(timer.poll(t0 + ms(1000)));
        assert!(!timer.poll(t0 + ms(1500)));
        assert!(timer.poll(t0 + ms(2000)));
        assert_eq!(timer.next_due(), Some(t0 + ms(3000)));
    }

    #[test]
    fn restart_cancels_previous_handle() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::default();
        timer.start(t0);

        assert!(timer.start(t0 + ms(400)));
        // The old schedule (due at t0+1000) is gone.
        assert!(!timer.poll(t0 + ms(1000)));
        assert!(timer.poll(t0 + ms(1400)));
    }

    #[test]
    fn late_poll_fires_once_and_skips_ahead() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::default();
        timer.start(t0);

        assert!(timer.poll(t0 + ms(3500)));
        assert!(!timer.poll(t0 + ms(3600)));
        assert_eq!(timer.next_due(), Some(t0 + ms(4000)));
    }

    #[test]
    fn cancel_stops_firing() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(ms(250));
        timer.start(t0);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.is_active());
        assert_eq!(timer.next_due(), None);
        assert!(!timer.poll(t0 + ms(10_000)));
    }
}
