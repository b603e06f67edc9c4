//! Top bar with product name, page tabs and the signed-in user.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};

use crate::pages::Route;
use crate::types::User;

pub const NAV: [(&str, &str); 4] = [
    ("1", "Dashboard"),
    ("2", "Servers"),
    ("3", "Anomalies"),
    ("4", "Predictions"),
];

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, route: &Route, user: Option<&User>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(32),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Smart OPS",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        cols[0],
    );

    if user.is_some() {
        let titles: Vec<Line> = NAV
            .iter()
            .map(|(key, label)| Line::from(format!("{key} {label}")))
            .collect();
        let active = NAV.iter().position(|(_, label)| *label == route.title());
        let tabs = Tabs::new(titles)
            .select(active.unwrap_or(usize::MAX))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .divider("|");
        f.render_widget(tabs, cols[1]);
    }

    let who = match user {
        Some(u) => format!("{} (L: logout)", u.name),
        None => "not signed in".into(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(who, Style::default().fg(Color::Gray))).right_aligned(),
        cols[2],
    );
}
