//! CSV export of the anomaly table.

use chrono::{TimeZone, Utc};
use smartops::export::{anomalies_csv, export_filename, format_csv_time, write_anomalies_csv, CSV_HEADER};
use smartops::types::{Anomaly, AnomalyType, Severity};

fn sample() -> Vec<Anomaly> {
    let ts = Utc.with_ymd_and_hms(2026, 3, 14, 21, 5, 7).unwrap();
    vec![
        Anomaly {
            id: "anom_1".into(),
            server_id: "srv_2".into(),
            server_name: Some("Database Server".into()),
            timestamp: ts,
            kind: AnomalyType::CpuSpike,
            severity: Severity::High,
            explanation: "CPU up 45%, backup running".into(),
        },
        Anomaly {
            id: "anom_2".into(),
            server_id: "srv_9".into(),
            server_name: None,
            timestamp: ts,
            kind: AnomalyType::MemoryLeak,
            severity: Severity::Critical,
            explanation: "said \"leak\"".into(),
        },
    ]
}

#[test]
fn header_plus_one_line_per_anomaly() {
    let csv = anomalies_csv(&sample());
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[0], "Server,Type,Severity,Time,Explanation");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn every_field_is_quoted() {
    let csv = anomalies_csv(&sample());
    let first = csv.split('\n').nth(1).unwrap();
    let when = format_csv_time(sample()[0].timestamp);
    assert_eq!(
        first,
        format!("\"Database Server\",\"cpu_spike\",\"high\",\"{when}\",\"CPU up 45%, backup running\"")
    );
}

#[test]
fn embedded_quotes_are_doubled_and_missing_name_is_unknown() {
    let csv = anomalies_csv(&sample());
    let second = csv.split('\n').nth(2).unwrap();
    assert!(second.starts_with("\"Unknown\",\"memory_leak\",\"critical\","));
    assert!(second.ends_with("\"said \"\"leak\"\"\""));
}

#[test]
fn empty_list_is_header_only() {
    assert_eq!(anomalies_csv(&[]), CSV_HEADER);
}

#[test]
fn filename_carries_the_date() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    assert_eq!(export_filename(now), "anomalies_2026-10-16.csv");
}

#[test]
fn writes_file_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports");
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let path = write_anomalies_csv(&target, &sample(), now).unwrap();
    assert_eq!(path, target.join("anomalies_2026-10-16.csv"));
    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body, anomalies_csv(&sample()));
}
