use crate::engine::{AddOutcome, Clock, REFRESH_INTERVAL, RefreshTimer, Selection, SystemClock, TickMetrics, snapshot_at};
use crate::{INITIAL_ZONE_COUNT, TimeSnapshot, TimeZoneDescriptor, catalog, view};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// How many catalog zones are displayed on mount.
    pub initial_zones: usize,
    /// Cadence of the periodic refresh.
    pub refresh_interval: Duration,
    /// Cards per row when rendering.
    pub columns: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { initial_zones: INITIAL_ZONE_COUNT, refresh_interval: REFRESH_INTERVAL, columns: 3 }
    }
}

/// Per-card display state. One-way: a card goes live once and stays live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardState {
    AwaitingFirstComputation,
    Live(String),
}

/// One rendered zone card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub zone: &'static TimeZoneDescriptor,
    pub state: CardState,
    /// e.g. `"UTC+5.5"`.
    pub offset_label: String,
}

/// One row of the zone selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorEntry {
    pub zone: &'static TimeZoneDescriptor,
    /// Already displayed; shown but not choosable.
    pub disabled: bool,
    /// Currently the pending choice.
    pub pending: bool,
}

/// The time zone dashboard component.
///
/// Owns the DisplaySet, the pending selection, the latest snapshot and the
/// refresh timer. All methods are synchronous; the host drives time by passing
/// `Instant`s to [`Dashboard::mount`], [`Dashboard::confirm_add`] and
/// [`Dashboard::poll`].
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use std::time::Instant;
/// use tzdash::{Dashboard, FixedClock, Options};
///
/// let utc = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let mut dash = Dashboard::new(FixedClock::at_utc(utc), Options::default());
/// dash.mount(Instant::now());
///
/// assert_eq!(dash.snapshot().get("IST"), Some("01:30:00 PM"));
/// ```
#[derive(Debug)]
pub struct Dashboard<C: Clock = SystemClock> {
    clock: C,
    options: Options,
    selection: Selection,
    timer: RefreshTimer,
    snapshot: TimeSnapshot,
    metrics: TickMetrics,
    mounted: bool,
}

impl<C: Clock> Dashboard<C> {
    /// Build an unmounted dashboard. Nothing is computed until [`Dashboard::mount`].
    pub fn new(clock: C, options: Options) -> Self {
        let selection = Selection::new(options.initial_zones);
        let timer = RefreshTimer::new(options.refresh_interval);
        Self {
            clock,
            options,
            selection,
            timer,
            snapshot: TimeSnapshot::empty(),
            metrics: TickMetrics::default(),
            mounted: false,
        }
    }

    /// Compute the first snapshot and start the periodic refresh.
    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        info!(zones = self.selection.displayed().len(), "dashboard mounted");
        self.restart(now);
    }

    /// Stop the periodic refresh. The last snapshot stays readable.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if self.timer.cancel() {
            self.metrics.timers_canceled += 1;
        }
        info!("dashboard unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a periodic refresh process is currently alive.
    pub fn is_refreshing(&self) -> bool {
        self.timer.is_active()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    // --- Selection -----------------------------------------------------------

    pub fn displayed(&self) -> &[&'static TimeZoneDescriptor] {
        self.selection.displayed()
    }

    pub fn pending(&self) -> Option<&str> {
        self.selection.pending()
    }

    pub fn select_pending(&mut self, id: &str) {
        self.selection.select_pending(id);
    }

    pub fn can_confirm(&self) -> bool {
        self.selection.can_confirm()
    }

    pub fn is_selectable(&self, id: &str) -> bool {
        self.selection.is_selectable(id)
    }

    /// Add the pending zone. Invalid adds are silently ignored.
    ///
    /// On success the snapshot is rebuilt immediately and the periodic refresh
    /// is restarted from `now`.
    pub fn confirm_add(&mut self, now: Instant) -> AddOutcome {
        let outcome = self.selection.confirm_add();
        match outcome {
            AddOutcome::Added(id) => {
                info!(zone = id, zones = self.selection.displayed().len(), "zone added");
                if self.mounted {
                    self.restart(now);
                }
            }
            AddOutcome::Rejected(reason) => {
                debug!(pending = ?self.selection.pending(), %reason, "add ignored");
            }
        }
        outcome
    }

    // --- Refresh -------------------------------------------------------------

    /// Run the periodic refresh if it is due. Returns `true` if the snapshot was rebuilt.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.metrics.ticks += 1;
        self.recompute();
        true
    }

    /// When the next periodic refresh is due, if mounted.
    pub fn next_due(&self) -> Option<Instant> {
        self.timer.next_due()
    }

    pub fn snapshot(&self) -> &TimeSnapshot {
        &self.snapshot
    }

    pub fn metrics(&self) -> TickMetrics {
        self.metrics
    }

    // --- Presentation --------------------------------------------------------

    /// One card per displayed zone, in display order.
    pub fn cards(&self) -> Vec<Card> {
        self.selection
            .displayed()
            .iter()
            .map(|&zone| {
                let state = match self.snapshot.get(zone.id) {
                    Some(time) => CardState::Live(time.to_string()),
                    None => CardState::AwaitingFirstComputation,
                };
                Card { zone, state, offset_label: view::offset_label(zone.offset) }
            })
            .collect()
    }

    /// Every catalog zone, with already-displayed ones disabled.
    pub fn selector(&self) -> Vec<SelectorEntry> {
        let pending = self.selection.pending();
        catalog::catalog()
            .iter()
            .map(|zone| SelectorEntry {
                zone,
                disabled: !self.selection.is_selectable(zone.id),
                pending: pending == Some(zone.id),
            })
            .collect()
    }

    // --- Internals -----------------------------------------------------------

    fn restart(&mut self, now: Instant) {
        self.recompute();
        if self.timer.start(now) {
            self.metrics.timers_canceled += 1;
        }
        self.metrics.timers_started += 1;
    }

    fn recompute(&mut self) {
        self.snapshot = snapshot_at(self.clock.now(), self.selection.displayed());
        self.metrics.recomputes += 1;
        trace!(zones = self.snapshot.len(), "snapshot recomputed");
    }
}

impl<C: Clock> Drop for Dashboard<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Compute a snapshot for `zones` from the current reading of `clock`.
pub fn compute_snapshot(clock: &impl Clock, zones: &[&'static TimeZoneDescriptor]) -> TimeSnapshot {
    snapshot_at(clock.now(), zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at_utc(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn cards_await_until_mounted() {
        let mut dash = Dashboard::new(clock(), Options::default());
        assert!(dash.cards().iter().all(|c| c.state == CardState::AwaitingFirstComputation));
        assert_eq!(dash.next_due(), None);

        dash.mount(Instant::now());
        let cards = dash.cards();
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[1].state, CardState::Live("03:00:00 AM".to_string()));
        assert_eq!(cards[1].offset_label, "UTC-5");
    }

    #[test]
    fn selector_disables_displayed_zones() {
        let mut dash = Dashboard::new(clock(), Options::default());
        dash.select_pending("AEST");

        let entries = dash.selector();
        assert_eq!(entries.len(), 10);
        assert!(entries[..6].iter().all(|e| e.disabled));
        assert!(entries[6..].iter().all(|e| !e.disabled));
        assert_eq!(entries.iter().filter(|e| e.pending).count(), 1);
        assert_eq!(entries[7].zone.id, "AEST");
        assert!(entries[7].pending);
    }

    #[test]
    fn add_before_mount_does_not_start_timer() {
        let mut dash = Dashboard::new(clock(), Options::default());
        dash.select_pending("JST");
        assert!(dash.confirm_add(Instant::now()).is_added());

        assert_eq!(dash.metrics().timers_started, 0);
        assert!(dash.snapshot().is_empty());
    }

    #[test]
    fn unmount_cancels_timer_and_is_idempotent() {
        let t0 = Instant::now();
        let mut dash = Dashboard::new(clock(), Options::default());
        dash.mount(t0);
        dash.mount(t0);
        assert_eq!(dash.metrics().active_timers(), 1);
        assert!(dash.is_refreshing());

        dash.unmount();
        dash.unmount();
        assert!(!dash.is_mounted());
        assert!(!dash.is_refreshing());
        assert_eq!(dash.metrics().active_timers(), 0);
        assert!(!dash.poll(t0 + Duration::from_secs(5)));
        // The last snapshot survives unmount.
        assert_eq!(dash.snapshot().len(), 6);
    }

    #[test]
    fn compute_snapshot_matches_mounted_dashboard() {
        let mut dash = Dashboard::new(clock(), Options::default());
        dash.mount(Instant::now());
        assert_eq!(&compute_snapshot(&clock(), dash.displayed()), dash.snapshot());
    }
}
