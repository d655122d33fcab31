//! The compiled-in zone catalog.
//!
//! Ten fixed-offset zones covering positive, negative, zero and fractional
//! offsets. The table is process-wide immutable data; the id index is built
//! lazily on first lookup.

use crate::TimeZoneDescriptor;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Number of catalog entries displayed when the dashboard mounts.
pub const INITIAL_ZONE_COUNT: usize = 6;

static CATALOG: [TimeZoneDescriptor; 10] = [
    zone!("UTC", "UTC", 0.0),
    zone!("EST", "Eastern Time (EST)", -5.0),
    zone!("PST", "Pacific Time (PST)", -8.0),
    zone!("CET", "Central European Time (CET)", 1.0),
    zone!("GMT", "Greenwich Mean Time (GMT)", 0.0),
    zone!("IST", "Indian Standard Time (IST)", 5.5),
    zone!("JST", "Japan Standard Time (JST)", 9.0),
    zone!("AEST", "Australian Eastern Time (AEST)", 10.0),
    zone!("BRT", "Brasília Time (BRT)", -3.0),
    zone!("CST", "China Standard Time (CST)", 8.0),
];

static BY_ID: Lazy<HashMap<&'static str, &'static TimeZoneDescriptor>> =
    Lazy::new(|| CATALOG.iter().map(|tz| (tz.id, tz)).collect());

/// All known zones, in catalog order.
pub fn catalog() -> &'static [TimeZoneDescriptor] {
    &CATALOG
}

/// Look up a zone by its exact id.
pub fn lookup(id: &str) -> Option<&'static TimeZoneDescriptor> {
    BY_ID.get(id).copied()
}

/// The first `count` catalog entries, truncated to what the catalog holds.
pub fn initial_zones(count: usize) -> Vec<&'static TimeZoneDescriptor> {
    CATALOG.iter().take(count).collect()
}
