//! CSV export of the anomaly table.

use std::fmt::Write as _;
use std::{fs, io, path::Path, path::PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::info;

use crate::types::Anomaly;

pub const CSV_HEADER: &str = "Server,Type,Severity,Time,Explanation";

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Locale-style local timestamp, e.g. `3/14/2026, 9:05:07 PM`.
pub fn format_csv_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Header line plus one quoted row per anomaly, joined by `\n`.
pub fn anomalies_csv(anomalies: &[Anomaly]) -> String {
    let mut out = String::from(CSV_HEADER);
    for a in anomalies {
        let cells = [
            a.server_label().to_string(),
            a.kind.as_str().to_string(),
            a.severity.as_str().to_string(),
            format_csv_time(a.timestamp),
            a.explanation.clone(),
        ];
        let row: Vec<String> = cells.iter().map(|c| quote(c)).collect();
        let _ = write!(out, "\n{}", row.join(","));
    }
    out
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("anomalies_{}.csv", now.format("%Y-%m-%d"))
}

pub fn write_anomalies_csv(
    dir: &Path,
    anomalies: &[Anomaly],
    now: DateTime<Utc>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(now));
    fs::write(&path, anomalies_csv(anomalies))?;
    info!(path = %path.display(), rows = anomalies.len(), "exported anomalies");
    Ok(path)
}
