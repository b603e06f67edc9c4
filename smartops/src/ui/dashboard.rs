//! Dashboard: four stat cards, the CPU chart and the latest anomalies.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::pages::DashboardPage;
use crate::series::hour_labels;
use crate::types::Anomaly;
use crate::ui::charts::draw_metric_chart;
use crate::ui::theme::{severity_color, CPU};
use crate::ui::util::clock_time;

fn draw_stat_card(f: &mut ratatui::Frame<'_>, area: Rect, title: &str, value: usize, color: Color) {
    let p = Paragraph::new(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(p, area);
}

/// Compact anomaly card: server + time, explanation, type/severity badges.
pub fn anomaly_lines(a: &Anomaly) -> Vec<Line<'static>> {
    let color = severity_color(a.severity);
    vec![
        Line::from(vec![
            Span::styled(
                a.server_name
                    .clone()
                    .unwrap_or_else(|| "Unknown Server".into()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", clock_time(a.timestamp)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(a.explanation.clone()),
        Line::from(vec![
            Span::styled(format!("[{}]", a.kind.label()), Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(format!("[{}]", a.severity.as_str()), Style::default().fg(color)),
        ]),
        Line::from(""),
    ]
}

pub fn draw_anomaly_feed(f: &mut ratatui::Frame<'_>, area: Rect, title: &str, anomalies: &[Anomaly]) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    if anomalies.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No anomalies detected",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }
    let lines: Vec<Line> = anomalies.iter().flat_map(anomaly_lines).collect();
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, area: Rect, page: &DashboardPage) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
        ])
        .split(area);

    let status = if page.refreshing {
        "Refreshing..."
    } else {
        "[r] Refresh"
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::Gray))).right_aligned(),
        rows[0],
    );

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    let stats = page.stats.clone().unwrap_or_default();
    draw_stat_card(f, cards[0], "Total Servers", stats.total_servers, Color::Blue);
    draw_stat_card(f, cards[1], "Online", stats.online_servers, Color::Green);
    draw_stat_card(f, cards[2], "Warnings", stats.warning_servers, Color::Yellow);
    draw_stat_card(f, cards[3], "Critical", stats.critical_servers, Color::Red);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);
    draw_metric_chart(
        f,
        bottom[0],
        "CPU Usage (Last 24h)",
        &page.cpu,
        &hour_labels(page.cpu.len()),
        CPU,
    );
    draw_anomaly_feed(f, bottom[1], "Recent Anomalies", &page.anomalies);
}
