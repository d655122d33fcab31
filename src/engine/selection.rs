//! Display selection and the pending choice.
//!
//! `Selection` owns the `DisplaySet` (ordered, append-only, unique by id) and
//! the pending id typed or picked by the user. Adding follows an
//! "ignore invalid action" policy: a rejected add changes nothing and is only
//! reported back to the caller for logging.

use crate::TimeZoneDescriptor;
use crate::catalog;
use std::fmt;

/// Why a `confirm_add` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NothingPending,
    UnknownZone,
    AlreadyDisplayed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::NothingPending => "no zone selected",
            RejectReason::UnknownZone => "zone is not in the catalog",
            RejectReason::AlreadyDisplayed => "zone is already displayed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(&'static str),
    Rejected(RejectReason),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    displayed: Vec<&'static TimeZoneDescriptor>,
    /// Empty string means nothing is pending.
    pending: String,
}

impl Selection {
    /// Start with the first `initial` catalog zones and nothing pending.
    pub fn new(initial: usize) -> Self {
        Self { displayed: catalog::initial_zones(initial), pending: String::new() }
    }

    /// The DisplaySet, in display order.
    pub fn displayed(&self) -> &[&'static TimeZoneDescriptor] {
        &self.displayed
    }

    pub fn pending(&self) -> Option<&str> {
        if self.pending.is_empty() { None } else { Some(self.pending.as_str()) }
    }

    /// Store `id` as the provisional choice. Any value is accepted.
    pub fn select_pending(&mut self, id: &str) {
        self.pending.clear();
        self.pending.push_str(id);
    }

    /// Whether the add action is currently enabled.
    pub fn can_confirm(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True iff `id` is not already displayed.
    pub fn is_selectable(&self, id: &str) -> bool {
        !self.displayed.iter().any(|tz| tz.id == id)
    }

    /// Append the pending zone to the DisplaySet and clear the pending choice.
    ///
    /// Preconditions are checked in order: something is pending, it names a
    /// catalog zone, and that zone is not displayed yet. On any failure the
    /// selection is left untouched.
    pub fn confirm_add(&mut self) -> AddOutcome {
        if self.pending.is_empty() {
            return AddOutcome::Rejected(RejectReason::NothingPending);
        }
        let Some(tz) = catalog::lookup(&self.pending) else {
            return AddOutcome::Rejected(RejectReason::UnknownZone);
        };
        if !self.is_selectable(tz.id) {
            return AddOutcome::Rejected(RejectReason::AlreadyDisplayed);
        }

        self.displayed.push(tz);
        self.pending.clear();
        AddOutcome::Added(tz.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(sel: &Selection) -> Vec<&'static str> {
        sel.displayed().iter().map(|tz| tz.id).collect()
    }

    #[test]
    fn select_pending_accepts_anything() {
        let mut sel = Selection::new(6);
        assert_eq!(sel.pending(), None);
        assert!(!sel.can_confirm());

        sel.select_pending("NOT-A-ZONE");
        assert_eq!(sel.pending(), Some("NOT-A-ZONE"));
        assert!(sel.can_confirm());

        sel.select_pending("");
        assert_eq!(sel.pending(), None);
    }

    #[test]
    fn confirm_add_appends_and_clears() {
        let mut sel = Selection::new(6);
        sel.select_pending("CST");

        assert_eq!(sel.confirm_add(), AddOutcome::Added("CST"));
        assert_eq!(ids(&sel), vec!["UTC", "EST", "PST", "CET", "GMT", "IST", "CST"]);
        assert_eq!(sel.pending(), None);
        assert!(!sel.is_selectable("CST"));
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let mut sel = Selection::new(6);
        let before = ids(&sel);

        assert_eq!(sel.confirm_add(), AddOutcome::Rejected(RejectReason::NothingPending));

        sel.select_pending("XYZ");
        assert_eq!(sel.confirm_add(), AddOutcome::Rejected(RejectReason::UnknownZone));
        assert_eq!(sel.pending(), Some("XYZ"));

        sel.select_pending("EST");
        assert_eq!(sel.confirm_add(), AddOutcome::Rejected(RejectReason::AlreadyDisplayed));
        assert_eq!(sel.pending(), Some("EST"));

        assert_eq!(ids(&sel), before);
    }

    #[test]
    fn every_catalog_zone_can_be_added_once() {
        let mut sel = Selection::new(0);
        for tz in catalog::catalog() {
            sel.select_pending(tz.id);
            assert!(sel.confirm_add().is_added());
            sel.select_pending(tz.id);
            assert!(!sel.confirm_add().is_added());
        }
        assert_eq!(sel.displayed().len(), catalog::catalog().len());
        assert!(catalog::catalog().iter().all(|tz| !sel.is_selectable(tz.id)));
    }

    #[test]
    fn reject_reasons_read_naturally() {
        assert_eq!(RejectReason::AlreadyDisplayed.to_string(), "zone is already displayed");
    }
}
