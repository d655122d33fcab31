//! Text rendering of the dashboard.
//!
//! Purely derived from `Dashboard` state: a title, the selector line with the
//! add action, and a grid of zone cards.

use crate::api::{Card, CardState, Dashboard};
use crate::engine::Clock;
use std::fmt::Write as _;

pub const TITLE: &str = "Time Zone Dashboard";
pub const PLACEHOLDER: &str = "Select a time zone";
pub const ADD_LABEL: &str = "Add Time Zone";
pub const LOADING: &str = "Loading...";
const CLOCK_GLYPH: &str = "◷";
const MIN_CARD_WIDTH: usize = 24;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// ANSI styling that degrades to plain text when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
        if self.enabled { format!("{}{}{}", color, s.as_ref(), ansi::RESET) } else { s.as_ref().to_string() }
    }

    fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::BOLD)
    }

    fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::DIM)
    }
}

/// `UTC+0`, `UTC-5`, `UTC+5.5`: explicit plus for non-negative offsets.
pub fn offset_label(offset: f64) -> String {
    // -0.0 would otherwise print as "-0".
    let offset = if offset == 0.0 { 0.0 } else { offset };
    if offset >= 0.0 { format!("UTC+{offset}") } else { format!("UTC{offset}") }
}

/// Render the full dashboard frame.
pub fn render_dashboard<C: Clock>(dash: &Dashboard<C>, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.bold(TITLE));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", selector_line(dash, palette));
    let _ = writeln!(out);

    let cards = dash.cards();
    let width = cards.iter().map(|c| c.zone.name.chars().count() + 2).max().unwrap_or(0).max(MIN_CARD_WIDTH);
    let columns = dash.options().columns.max(1);

    for row in cards.chunks(columns) {
        let boxes: Vec<Vec<String>> = row.iter().map(|card| card_lines(card, width, palette)).collect();
        for line in 0..boxes[0].len() {
            let joined: Vec<&str> = boxes.iter().map(|b| b[line].as_str()).collect();
            let _ = writeln!(out, "{}", joined.join("  "));
        }
    }
    out
}

/// Render the catalog as a list; displayed zones are marked and dimmed.
pub fn render_selector<C: Clock>(dash: &Dashboard<C>, palette: Palette) -> String {
    let mut out = String::new();
    for entry in dash.selector() {
        let marker = match (entry.disabled, entry.pending) {
            (true, _) => "[x]",
            (false, true) => "[>]",
            (false, false) => "[ ]",
        };
        let line = format!("{} {:<5} {}", marker, entry.zone.id, entry.zone.name);
        let line = if entry.disabled { palette.dim(line) } else { line };
        let _ = writeln!(out, "  {line}");
    }
    out
}

fn selector_line<C: Clock>(dash: &Dashboard<C>, palette: Palette) -> String {
    let choice = match dash.pending() {
        Some(id) => crate::catalog::lookup(id).map_or(id, |tz| tz.name).to_string(),
        None => palette.dim(PLACEHOLDER),
    };
    let button = format!("[ {ADD_LABEL} ]");
    let button = if dash.can_confirm() { palette.paint(button, ansi::CYAN) } else { palette.dim(button) };
    format!("[ {choice} ▾ ]  {button}")
}

fn card_lines(card: &Card, width: usize, palette: Palette) -> Vec<String> {
    let (time, time_color) = match &card.state {
        CardState::Live(time) => (time.as_str(), ansi::GREEN),
        CardState::AwaitingFirstComputation => (LOADING, ansi::GRAY),
    };
    let title = format!("{CLOCK_GLYPH} {}", card.zone.name);

    let border = "─".repeat(width + 2);
    vec![
        palette.dim(format!("┌{border}┐")),
        boxed(&title, width, |s| palette.bold(s), palette),
        boxed(time, width, |s| palette.bold(palette.paint(s, time_color)), palette),
        boxed(&card.offset_label, width, |s| palette.dim(s), palette),
        palette.dim(format!("└{border}┘")),
    ]
}

/// Pad `text` to `width` columns before styling so escapes don't skew alignment.
fn boxed(text: &str, width: usize, style: impl Fn(&str) -> String, palette: Palette) -> String {
    let pad = width.saturating_sub(text.chars().count());
    format!("{} {}{} {}", palette.dim("│"), style(text), " ".repeat(pad), palette.dim("│"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, Options};
    use chrono::NaiveDate;
    use std::time::Instant;

    fn dashboard() -> Dashboard<FixedClock> {
        let utc = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        Dashboard::new(FixedClock::at_utc(utc), Options::default())
    }

    #[test]
    fn offset_labels() {
        assert_eq!(offset_label(0.0), "UTC+0");
        assert_eq!(offset_label(-0.0), "UTC+0");
        assert_eq!(offset_label(-5.0), "UTC-5");
        assert_eq!(offset_label(5.5), "UTC+5.5");
        assert_eq!(offset_label(10.0), "UTC+10");
        assert_eq!(offset_label(-3.5), "UTC-3.5");
    }

    #[test]
    fn unmounted_cards_show_loading() {
        let frame = render_dashboard(&dashboard(), Palette::plain());
        assert!(frame.starts_with(TITLE));
        assert_eq!(frame.matches(LOADING).count(), 6);
        assert!(frame.contains(PLACEHOLDER));
    }

    #[test]
    fn mounted_cards_show_times_and_offsets() {
        let mut dash = dashboard();
        dash.mount(Instant::now());
        let frame = render_dashboard(&dash, Palette::plain());

        assert!(!frame.contains(LOADING));
        assert!(frame.contains("◷ Indian Standard Time (IST)"));
        assert!(frame.contains("01:30:00 PM"));
        assert!(frame.contains("UTC+5.5"));
        assert!(frame.contains("UTC-8"));
        // Two rows of three cards, five lines each.
        assert_eq!(frame.lines().filter(|l| l.starts_with('┌')).count(), 2);
    }

    #[test]
    fn grid_rows_are_aligned() {
        let mut dash = dashboard();
        dash.mount(Instant::now());
        let frame = render_dashboard(&dash, Palette::plain());

        let widths: Vec<usize> = frame.lines().skip(4).map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn selector_line_tracks_pending_choice() {
        let mut dash = dashboard();
        dash.select_pending("JST");
        let frame = render_dashboard(&dash, Palette::plain());
        assert!(frame.contains("[ Japan Standard Time (JST) ▾ ]"));

        let list = render_selector(&dash, Palette::plain());
        assert!(list.contains("[x] UTC"));
        assert!(list.contains("[>] JST"));
        assert!(list.contains("[ ] CST"));
    }

    #[test]
    fn colors_only_when_enabled() {
        let mut dash = dashboard();
        dash.mount(Instant::now());
        assert!(!render_dashboard(&dash, Palette::plain()).contains('\x1b'));
        assert!(render_dashboard(&dash, Palette::new(true)).contains('\x1b'));
    }
}
