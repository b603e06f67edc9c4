//! Chart-ready views over metric and forecast data.

use crate::types::{ForecastPoint, MetricSample};

/// The last `n` samples (all of them when fewer).
pub fn tail(samples: &[MetricSample], n: usize) -> &[MetricSample] {
    &samples[samples.len().saturating_sub(n)..]
}

/// (index, value) pairs for a line chart.
pub fn chart_points(samples: &[MetricSample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.value))
        .collect()
}

/// "0:00", "1:00", ... one label per sample.
pub fn hour_labels(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("{i}:00")).collect()
}

/// Forecast split into the three plotted lines, values rounded to one decimal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastBands {
    pub predicted: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
    pub upper: Vec<(f64, f64)>,
}

impl ForecastBands {
    pub fn from_forecast(points: &[ForecastPoint]) -> Self {
        let round1 = |v: f64| (v * 10.0).round() / 10.0;
        let mut bands = ForecastBands::default();
        for (i, p) in points.iter().enumerate() {
            let x = i as f64;
            bands.predicted.push((x, round1(p.predicted_value)));
            bands.lower.push((x, round1(p.lower_bound)));
            bands.upper.push((x, round1(p.upper_bound)));
        }
        bands
    }

    pub fn len(&self) -> usize {
        self.predicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicted.is_empty()
    }

    /// Point with the highest predicted value.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.predicted
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}
