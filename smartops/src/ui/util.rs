//! Small UI helpers: percentages, relative times, truncation, centered popups.

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;

pub fn format_percent(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}%")
}

/// "42s ago", "5m ago", "3h ago", "2d ago".
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Local wall-clock time, e.g. "9:05:07 PM".
pub fn clock_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%-I:%M:%S %p").to_string()
}

pub fn local_datetime(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Cut to `max` chars and append "...".
pub fn truncate_text(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max).collect();
    format!("{head}...")
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
