//! Refresh counters.
//!
//! Cheap monotonically increasing counters kept by the dashboard so callers
//! (and tests) can see how often the snapshot was rebuilt and whether the
//! periodic process was restarted cleanly.
//!
//! - `recomputes` counts every full snapshot rebuild, whatever triggered it.
//! - `ticks` counts only rebuilds caused by the periodic timer firing.
//! - `timers_started` / `timers_canceled` track handle lifecycle; while the
//!   dashboard is mounted they always differ by exactly one.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickMetrics {
    /// Full snapshot rebuilds.
    pub recomputes: u64,
    /// Rebuilds triggered by the periodic timer.
    pub ticks: u64,
    /// Periodic processes started.
    pub timers_started: u64,
    /// Periodic processes canceled (restart or unmount).
    pub timers_canceled: u64,
}

impl TickMetrics {
    /// Number of periodic processes currently alive.
    pub fn active_timers(&self) -> u64 {
        self.timers_started - self.timers_canceled
    }
}
