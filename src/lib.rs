extern crate self as tzdash;

#[macro_use]
mod macros;
mod api;
mod catalog;
mod command;
mod engine;
mod error;
mod view;


pub use api::{Card, CardState, Dashboard, Options, SelectorEntry, compute_snapshot};
pub use catalog::{INITIAL_ZONE_COUNT, catalog, initial_zones, lookup};
pub use command::{Command, HELP, Reply};
pub use engine::{AddOutcome, Clock, FixedClock, HostReading, RejectReason, SystemClock, TickMetrics};
pub use error::{Error, Result};
pub use view::{Palette, offset_label, render_dashboard, render_selector};

use std::collections::HashMap;

// --- Data model --------------------------------------------------------------

/// A zone in the compiled-in catalog.
///
/// Zones are modeled as a single constant offset from UTC; there is no
/// daylight-saving or historical rule awareness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeZoneDescriptor {
    /// Short unique token, e.g. `"EST"`. The only identity key.
    pub id: &'static str,
    /// Human-readable label including the abbreviation.
    pub name: &'static str,
    /// Signed hours relative to UTC. Half-hour zones are allowed.
    pub offset: f64,
}

impl TimeZoneDescriptor {
    /// Offset in whole seconds, rounded to the nearest second.
    pub fn offset_seconds(&self) -> i64 {
        (self.offset * 3600.0).round() as i64
    }
}

/// Zone id -> formatted time of day, as computed by one refresh.
///
/// Snapshots are rebuilt from scratch on every refresh and never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSnapshot {
    times: HashMap<&'static str, String>,
}

impl TimeSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Formatted time for `id`, if this snapshot covers it.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.times.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub(crate) fn insert(&mut self, id: &'static str, time: String) {
        self.times.insert(id, time);
    }
}
