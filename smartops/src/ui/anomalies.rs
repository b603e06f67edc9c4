//! Anomaly table with search, severity filter, export hint and summary counts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::filter::severity_counts;
use crate::pages::AnomaliesPage;
use crate::ui::scrollbar::{draw_scrollbar, scroll_offset};
use crate::ui::theme::severity_color;
use crate::ui::util::{inner, local_datetime, truncate_text};

const COLS: [Constraint; 5] = [
    Constraint::Length(18), // Server
    Constraint::Length(16), // Type
    Constraint::Length(9),  // Severity
    Constraint::Length(22), // Time
    Constraint::Min(20),    // Explanation
];

pub fn draw_anomalies(f: &mut ratatui::Frame<'_>, area: Rect, page: &AnomaliesPage) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    // Filters
    let search_style = if page.editing_search {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Gray)
    };
    let search_text = if page.search.value.is_empty() && !page.editing_search {
        page.search.label.to_string()
    } else if page.editing_search {
        format!("{}_", page.search.value)
    } else {
        page.search.value.clone()
    };
    let filters = Line::from(vec![
        Span::raw("🔍 "),
        Span::styled(search_text, search_style),
        Span::raw("   severity: "),
        Span::styled(
            page.filter.severity.label(),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(
        Paragraph::new(filters).block(Block::default().borders(Borders::ALL).title("Filters")),
        rows[0],
    );

    // Table
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Anomalies ({} of {})",
        page.filtered.len(),
        page.anomalies.len()
    ));
    if page.loading {
        f.render_widget(Paragraph::new("Loading anomalies...").block(block), rows[1]);
    } else if page.filtered.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No anomalies found",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            rows[1],
        );
    } else {
        f.render_widget(block, rows[1]);
        let body = inner(rows[1]);
        let content = Rect {
            width: body.width.saturating_sub(2),
            ..body
        };
        let viewport = content.height.saturating_sub(1) as usize;
        let offset = scroll_offset(page.selected, page.filtered.len(), viewport);
        let explanation_width = content.width.saturating_sub(70).max(20) as usize;

        let table_rows = page
            .filtered
            .iter()
            .enumerate()
            .skip(offset)
            .take(viewport)
            .map(|(i, a)| {
                let style = if i == page.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(a.server_label().to_string()),
                    Cell::from(a.kind.label()),
                    Cell::from(a.severity.as_str())
                        .style(Style::default().fg(severity_color(a.severity))),
                    Cell::from(local_datetime(a.timestamp)),
                    Cell::from(truncate_text(&a.explanation, explanation_width)),
                ])
                .style(style)
            });
        let header = Row::new(vec!["Server", "Type", "Severity", "Time", "Explanation"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(
            Table::new(table_rows, COLS.to_vec())
                .header(header)
                .column_spacing(1),
            content,
        );
        draw_scrollbar(
            f,
            Rect {
                x: body.x + body.width.saturating_sub(1),
                width: 1,
                ..body
            },
            page.filtered.len(),
            viewport,
            offset,
        );
    }

    // Summary
    let mut summary: Vec<Span> = Vec::new();
    for (sev, n) in severity_counts(&page.filtered) {
        summary.push(Span::styled(
            format!("{}: {n}   ", sev.as_str()),
            Style::default().fg(severity_color(sev)),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(summary))
            .block(Block::default().borders(Borders::ALL).title("Summary")),
        rows[2],
    );

    let footer = match &page.notice {
        Some(n) => Span::styled(n.clone(), Style::default().fg(Color::Green)),
        None => Span::styled(
            "[/] Search  [s] Severity  [c] Clear  [e] Export CSV  [r] Reload",
            Style::default().fg(Color::Gray),
        ),
    };
    f.render_widget(Paragraph::new(footer), rows[3]);
}
