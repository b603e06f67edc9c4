//! Login and registration forms.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::forms::TextField;
use crate::pages::{LoginPage, RegisterPage};
use crate::ui::util::{centered_rect, inner};

/// One labelled input per row pair; the focused one is highlighted.
pub fn draw_fields(f: &mut ratatui::Frame<'_>, area: Rect, fields: &[&TextField], focus: usize) {
    let constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(2)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    for (i, (field, slot)) in fields.iter().zip(rows.iter()).enumerate() {
        let focused = i == focus;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused { "_" } else { "" };
        let lines = vec![
            Line::from(Span::styled(
                format!("{marker}{}", field.label),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{cursor}", field.display()), value_style),
            ]),
        ];
        f.render_widget(Paragraph::new(lines), *slot);
    }
}

pub fn draw_error(f: &mut ratatui::Frame<'_>, area: Rect, error: Option<&str>) {
    if let Some(msg) = error {
        f.render_widget(
            Paragraph::new(Span::styled(format!("⚠ {msg}"), Style::default().fg(Color::Red))),
            area,
        );
    }
}

fn form_frame(f: &mut ratatui::Frame<'_>, area: Rect, title: &str, height: u16) -> Rect {
    let popup = centered_rect(52, height, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default().borders(Borders::ALL).title(title.to_string()),
        popup,
    );
    inner(popup)
}

pub fn draw_login(f: &mut ratatui::Frame<'_>, area: Rect, page: &LoginPage) {
    let body = form_frame(f, area, "Smart OPS - Sign in", 12);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(body);
    draw_error(f, rows[0], page.error.as_deref());
    draw_fields(f, rows[1], &page.form.fields(), page.form.focus.index);
    let button = if page.submitting {
        "Signing in..."
    } else {
        "[Enter] Sign in"
    };
    f.render_widget(
        Paragraph::new(Span::styled(button, Style::default().fg(Color::Cyan))),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Don't have an account? Ctrl-R to sign up"),
            Line::from(Span::styled(
                "Demo: any email and password",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        rows[3],
    );
}

pub fn draw_register(f: &mut ratatui::Frame<'_>, area: Rect, page: &RegisterPage) {
    let body = form_frame(f, area, "Smart OPS - Create account", 16);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(body);
    draw_error(f, rows[0], page.error.as_deref());
    draw_fields(f, rows[1], &page.form.fields(), page.form.focus.index);
    let button = if page.submitting {
        "Creating account..."
    } else {
        "[Enter] Create Account"
    };
    f.render_widget(
        Paragraph::new(Span::styled(button, Style::default().fg(Color::Cyan))),
        rows[2],
    );
    f.render_widget(
        Paragraph::new("Already have an account? Ctrl-R to log in"),
        rows[3],
    );
}
