//! Dashboard state engine.
//!
//! The dashboard is one component, but its state splits into three concerns
//! that are kept in separate submodules under `src/engine/`:
//!
//! ```text
//!   user input ──▶ Selection (selection.rs)
//!                    - pending selection
//!                    - DisplaySet (dedup, append-only)
//!                         │ changed?
//!                         v
//!                  RefreshTimer (refresh.rs) ◀── host loop polls with `Instant`
//!                    - cancel old handle, start new one
//!                    - fixed 1000 ms cadence
//!                         │ fired / restarted
//!                         v
//!                  compute (clock.rs)
//!                    - host reading -> UTC -> per-zone fixed offset
//!                    - full TimeSnapshot rebuild
//! ```
//!
//! ## Responsibilities by module
//!
//! - `clock.rs`: the host clock seam (`Clock`, `HostReading`) and the
//!   fixed-offset snapshot computation.
//! - `selection.rs`: `DisplaySet` and the pending selection, plus the
//!   silent-rejection add policy.
//! - `refresh.rs`: the periodic refresh process and its explicit handle.
//! - `metrics.rs`: counters used to observe refresh behavior.
//!
//! The public `Dashboard` in `api.rs` wires these together; nothing here knows
//! about rendering.

#[path = "engine/clock.rs"]
mod clock;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/refresh.rs"]
mod refresh;
#[path = "engine/selection.rs"]
mod selection;

pub use clock::{Clock, FixedClock, HostReading, SystemClock, snapshot_at};
pub use metrics::TickMetrics;
pub use refresh::{REFRESH_INTERVAL, RefreshTimer};
pub use selection::{AddOutcome, RejectReason, Selection};
