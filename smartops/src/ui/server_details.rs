use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::pages::ServerDetailsPage;
use crate::ui::charts::draw_metric_chart;
use crate::ui::dashboard::draw_anomaly_feed;
use crate::ui::theme::{status_color, usage_color, CPU, RAM};
use crate::ui::util::{clock_time, format_percent, local_datetime};

pub fn draw_server_details(f: &mut ratatui::Frame<'_>, area: Rect, page: &ServerDetailsPage) {
    if page.loading {
        f.render_widget(Paragraph::new("Loading server details..."), area);
        return;
    }
    let Some(server) = page.server.as_ref() else {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Server not found", Style::default().fg(Color::Red))),
                Line::from("[Esc] Back to Servers"),
            ])
            .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(10),
        ])
        .split(area);

    let summary = vec![
        Line::from(vec![
            Span::styled(
                server.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(server.ip.clone(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(
                server.status.as_str(),
                Style::default().fg(status_color(server.status)),
            ),
        ]),
        Line::from(vec![
            Span::raw("CPU "),
            Span::styled(
                format_percent(server.cpu, 1),
                Style::default().fg(usage_color(server.cpu)),
            ),
            Span::raw("   RAM "),
            Span::styled(
                format_percent(server.ram, 1),
                Style::default().fg(usage_color(server.ram)),
            ),
            Span::styled(
                format!("   last seen {}", local_datetime(server.last_seen)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    f.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Server  [Esc] back"),
        ),
        rows[0],
    );

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let cpu_labels: Vec<String> = page.cpu.iter().map(|s| clock_time(s.time)).collect();
    let ram_labels: Vec<String> = page.ram.iter().map(|s| clock_time(s.time)).collect();
    draw_metric_chart(f, charts[0], "CPU Usage (Last Hour)", &page.cpu, &cpu_labels, CPU);
    draw_metric_chart(f, charts[1], "RAM Usage (Last Hour)", &page.ram, &ram_labels, RAM);

    draw_anomaly_feed(f, rows[2], "Anomalies for this Server", &page.anomalies);
}
