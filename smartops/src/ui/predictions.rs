use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::pages::PredictionsPage;
use crate::ui::charts::draw_forecast_chart;
use crate::ui::theme::{LOWER, PREDICTED, UPPER};

pub fn draw_predictions(f: &mut ratatui::Frame<'_>, area: Rect, page: &PredictionsPage) {
    if page.loading {
        f.render_widget(Paragraph::new("Loading predictions..."), area);
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
        ])
        .split(area);

    let mut picker: Vec<Span> = vec![Span::raw("◀ ")];
    for (i, s) in page.servers.iter().enumerate() {
        let style = if Some(i) == page.selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        picker.push(Span::styled(s.name.clone(), style));
        picker.push(Span::raw("  "));
    }
    picker.push(Span::raw("▶"));
    f.render_widget(
        Paragraph::new(Line::from(picker)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Server  [←/→] select"),
        ),
        rows[0],
    );

    let title = match page.selected_server() {
        Some(s) => format!("CPU Forecast: {} (next 30 minutes)", s.name),
        None => "CPU Forecast".to_string(),
    };
    draw_forecast_chart(f, rows[1], &title, &page.bands, (UPPER, PREDICTED, LOWER));

    let peak = match page.bands.peak() {
        Some((x, y)) => format!("Peak usage predicted around minute {x:.0} ({y:.1}%). "),
        None => String::new(),
    };
    let analysis = format!(
        "Based on historical patterns, CPU usage is expected to remain stable with slight \
         variations. {peak}The confidence interval shows possible range of values. No critical \
         anomalies forecasted for the next 30 minutes."
    );
    f.render_widget(
        Paragraph::new(analysis)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("📊 AI Analysis")),
        rows[2],
    );
}
