//! UI module root: one drawing function per page plus shared widgets.

pub mod anomalies;
pub mod auth;
pub mod charts;
pub mod dashboard;
pub mod header;
pub mod predictions;
pub mod scrollbar;
pub mod server_details;
pub mod servers;
pub mod theme;
pub mod util;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
};

use crate::pages::Page;
use crate::types::User;

pub fn draw(f: &mut ratatui::Frame<'_>, page: &Page, user: Option<&User>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(5),    // page
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    header::draw_header(f, rows[0], &page.route(), user);

    match page {
        Page::Login(p) => auth::draw_login(f, rows[1], p),
        Page::Register(p) => auth::draw_register(f, rows[1], p),
        Page::Dashboard(p) => {
            if p.loading {
                f.render_widget(Paragraph::new("Loading dashboard..."), rows[1]);
            } else {
                dashboard::draw_dashboard(f, rows[1], p);
            }
        }
        Page::Servers(p) => servers::draw_servers(f, rows[1], p),
        Page::ServerDetails(p) => server_details::draw_server_details(f, rows[1], p),
        Page::Anomalies(p) => anomalies::draw_anomalies(f, rows[1], p),
        Page::Predictions(p) => predictions::draw_predictions(f, rows[1], p),
    }

    let hints = if page.captures_text() {
        "Tab/↑/↓ move  Enter submit  Esc back  Ctrl-C quit"
    } else {
        "1-4 pages  ↑/↓ select  L logout  q quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        rows[2],
    );
}

/// Shown while the stored session is being checked.
pub fn draw_loading(f: &mut ratatui::Frame<'_>) {
    f.render_widget(Paragraph::new("Loading..."), f.area());
}
