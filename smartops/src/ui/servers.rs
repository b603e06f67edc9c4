//! Server table, add-server modal and delete confirmation.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use crate::pages::servers::{AddServerModal, ServersPage};
use crate::ui::auth::{draw_error, draw_fields};
use crate::ui::scrollbar::{draw_scrollbar, scroll_offset};
use crate::ui::theme::{status_color, usage_color};
use crate::ui::util::{centered_rect, format_percent, inner, time_ago};

const COLS: [Constraint; 6] = [
    Constraint::Percentage(28), // Name
    Constraint::Length(16),     // IP
    Constraint::Length(10),     // Status
    Constraint::Length(8),      // CPU
    Constraint::Length(8),      // RAM
    Constraint::Min(10),        // Last seen
];

pub fn draw_servers(f: &mut ratatui::Frame<'_>, area: Rect, page: &ServersPage) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Servers ({})", page.servers.len()));
    if page.loading && page.servers.is_empty() {
        f.render_widget(Paragraph::new("Loading servers...").block(block), rows[0]);
    } else {
        f.render_widget(block, rows[0]);
        let body = inner(rows[0]);
        let content = Rect {
            width: body.width.saturating_sub(2),
            ..body
        };
        let viewport = content.height.saturating_sub(1) as usize;
        let offset = scroll_offset(page.selected, page.servers.len(), viewport);
        let now = Utc::now();

        let table_rows = page
            .servers
            .iter()
            .enumerate()
            .skip(offset)
            .take(viewport)
            .map(|(i, s)| {
                let style = if i == page.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(s.name.clone()),
                    Cell::from(s.ip.clone()).style(Style::default().fg(Color::DarkGray)),
                    Cell::from(s.status.as_str()).style(Style::default().fg(status_color(s.status))),
                    Cell::from(format_percent(s.cpu, 1)).style(Style::default().fg(usage_color(s.cpu))),
                    Cell::from(format_percent(s.ram, 1)).style(Style::default().fg(usage_color(s.ram))),
                    Cell::from(time_ago(s.last_seen, now)),
                ])
                .style(style)
            });
        let header = Row::new(vec!["Name", "IP", "Status", "CPU", "RAM", "Last seen"]).style(
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
            page.servers.len(),
            viewport,
            offset,
        );
    }

    let footer = if let Some(id) = &page.confirm_delete {
        Span::styled(
            format!("Are you sure you want to delete server {id}? [y/N]"),
            Style::default().fg(Color::Red),
        )
    } else if let Some(notice) = &page.notice {
        Span::styled(notice.clone(), Style::default().fg(Color::Red))
    } else {
        Span::styled(
            "[a] Add Server  [Enter] Details  [d] Delete  [r] Reload",
            Style::default().fg(Color::Gray),
        )
    };
    f.render_widget(Paragraph::new(footer), rows[1]);

    if let Some(modal) = &page.modal {
        draw_add_server_modal(f, area, modal);
    }
}

pub fn draw_add_server_modal(f: &mut ratatui::Frame<'_>, area: Rect, modal: &AddServerModal) {
    let popup = centered_rect(56, 13, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Add New Server"),
        popup,
    );
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner(popup));
    draw_error(f, rows[0], modal.error.as_deref());
    draw_fields(f, rows[1], &modal.form.fields(), modal.form.focus.index);
    f.render_widget(
        Paragraph::new(Span::styled(
            "This key will be used by the monitoring agent",
            Style::default().fg(Color::DarkGray),
        )),
        rows[2],
    );
    let hint = if modal.submitting {
        "Adding..."
    } else {
        "[Enter] Add Server  [Esc] Cancel"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Cyan))),
        rows[3],
    );
}
