//! Shared UI theme constants.

use ratatui::style::Color;

use crate::types::{ServerStatus, Severity};

// Scrollbar colors
pub const SB_ARROW: Color = Color::Rgb(170, 170, 180);
pub const SB_TRACK: Color = Color::Rgb(170, 170, 180);
pub const SB_THUMB: Color = Color::Rgb(170, 170, 180);

pub const ORANGE: Color = Color::Rgb(255, 140, 0);

pub const CPU: Color = Color::Rgb(59, 130, 246);
pub const RAM: Color = Color::Rgb(16, 185, 129);
pub const PREDICTED: Color = Color::Rgb(96, 165, 250);
pub const UPPER: Color = Color::Rgb(147, 197, 253);
pub const LOWER: Color = Color::Rgb(30, 64, 175);

pub fn status_color(status: ServerStatus) -> Color {
    match status {
        ServerStatus::Online => Color::Green,
        ServerStatus::Warning => Color::Yellow,
        ServerStatus::Critical => Color::Red,
        ServerStatus::Offline => Color::Gray,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::High => ORANGE,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Blue,
    }
}

/// Green below 60%, yellow below 85%, red above.
pub fn usage_color(pct: f64) -> Color {
    match pct {
        x if x < 60.0 => Color::Green,
        x if x < 85.0 => Color::Yellow,
        _ => Color::Red,
    }
}
