//! Line charts for metric series and the forecast band.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::series::{chart_points, ForecastBands};
use crate::types::MetricSample;

fn y_axis() -> Axis<'static> {
    Axis::default()
        .style(Style::default().fg(Color::DarkGray))
        .bounds([0.0, 100.0])
        .labels(vec![Line::from("0"), Line::from("50"), Line::from("100")])
}

// first / middle / last label
fn x_axis(labels: &[String]) -> Axis<'static> {
    let max_x = labels.len().saturating_sub(1).max(1) as f64;
    let picked: Vec<Line<'static>> = match labels.len() {
        0 => vec![],
        1 => vec![Line::from(labels[0].clone())],
        n => vec![
            Line::from(labels[0].clone()),
            Line::from(labels[n / 2].clone()),
            Line::from(labels[n - 1].clone()),
        ],
    };
    Axis::default()
        .style(Style::default().fg(Color::DarkGray))
        .bounds([0.0, max_x])
        .labels(picked)
}

/// Single-series chart on a 0..100 scale. `labels` has one entry per sample.
pub fn draw_metric_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    samples: &[MetricSample],
    labels: &[String],
    color: Color,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    if samples.is_empty() {
        f.render_widget(Paragraph::new("No data").block(block), area);
        return;
    }
    let data = chart_points(samples);
    let title_now = format!(
        "{title} (now: {:>5.1}%)",
        samples.last().map(|s| s.value).unwrap_or(0.0)
    );
    let ds = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);
    let chart = Chart::new(vec![ds])
        .block(Block::default().borders(Borders::ALL).title(title_now))
        .x_axis(x_axis(labels))
        .y_axis(y_axis());
    f.render_widget(chart, area);
}

pub fn draw_forecast_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    bands: &ForecastBands,
    colors: (Color, Color, Color),
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    if bands.is_empty() {
        f.render_widget(Paragraph::new("No forecast").block(block), area);
        return;
    }
    let (upper_c, predicted_c, lower_c) = colors;
    let labels: Vec<String> = (0..bands.len()).map(|i| format!("{i} min")).collect();
    let datasets = vec![
        Dataset::default()
            .name("Upper Bound")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(upper_c))
            .data(&bands.upper),
        Dataset::default()
            .name("Predicted")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(predicted_c))
            .data(&bands.predicted),
        Dataset::default()
            .name("Lower Bound")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(lower_c))
            .data(&bands.lower),
    ];
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis(&labels))
        .y_axis(y_axis());
    f.render_widget(chart, area);
}
