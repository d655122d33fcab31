//! Host clock seam and the fixed-offset time computation.
//!
//! The host supplies a *local* wall-clock reading together with its offset to
//! UTC. The engine anchors on UTC and then applies each zone's constant
//! offset:
//!
//! ```text
//! local ──(+ offset_to_utc_minutes)──▶ utc ──(+ zone.offset * 3600 s)──▶ zone time
//! ```
//!
//! No rule database is consulted, so daylight-saving transitions are never
//! reflected. That is the model, not a bug.
//!
//! Only the time of day is displayed, so the offsets are applied on the clock
//! face (`NaiveTime`, wrapping at midnight). This keeps the computation total
//! for every representable instant, including ones at the edge of chrono's
//! date range.

use crate::{TimeSnapshot, TimeZoneDescriptor};
use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};

/// Fixed display format: `hh:mm:ss AM`, en-US 12-hour clock.
const TIME_FORMAT: &str = "%I:%M:%S %p";
const SECONDS_PER_DAY: i64 = 86_400;

/// One reading of the host's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostReading {
    /// Local wall-clock time.
    pub local: NaiveDateTime,
    /// Minutes to add to `local` to reach UTC (positive west of Greenwich).
    pub offset_to_utc_minutes: i32,
}

impl HostReading {
    /// A reading taken on a host whose local time is UTC.
    pub fn from_utc(utc: NaiveDateTime) -> Self {
        Self { local: utc, offset_to_utc_minutes: 0 }
    }

    /// The UTC instant, or `None` if it falls outside chrono's range.
    pub fn utc(&self) -> Option<NaiveDateTime> {
        self.local.checked_add_signed(self.to_utc())
    }

    /// UTC time of day. Never fails: the date is dropped before shifting.
    pub fn utc_time_of_day(&self) -> NaiveTime {
        self.local.time().overflowing_add_signed(self.to_utc()).0
    }

    fn to_utc(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.offset_to_utc_minutes) * 60)
    }
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> HostReading;
}

/// The host's real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> HostReading {
        let now = Local::now();
        HostReading { local: now.naive_local(), offset_to_utc_minutes: -now.offset().local_minus_utc() / 60 }
    }
}

/// A clock pinned to one reading. Used for `--at` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub HostReading);

impl FixedClock {
    pub fn at_utc(utc: NaiveDateTime) -> Self {
        Self(HostReading::from_utc(utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> HostReading {
        self.0
    }
}

/// Format a zone-local time of day as `hh:mm:ss AM|PM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Compute a full snapshot for `zones` at `reading`.
///
/// Pure: the same reading and zones always produce the same snapshot.
pub fn snapshot_at<'a, I>(reading: HostReading, zones: I) -> TimeSnapshot
where
    I: IntoIterator<Item = &'a &'static TimeZoneDescriptor>,
{
    let utc = reading.utc_time_of_day();
    let mut snapshot = TimeSnapshot::empty();
    for tz in zones {
        // Whole days don't move the clock face.
        let shift = TimeDelta::seconds(tz.offset_seconds().rem_euclid(SECONDS_PER_DAY));
        snapshot.insert(tz.id, format_time(utc.overflowing_add_signed(shift).0));
    }
    snapshot
}
