//! Anomaly search and severity filtering.

use chrono::{TimeZone, Utc};
use smartops::filter::{severity_counts, AnomalyFilter, SeverityFilter};
use smartops::types::{Anomaly, AnomalyType, Severity};

fn anomaly(id: &str, server: Option<&str>, kind: AnomalyType, severity: Severity, text: &str) -> Anomaly {
    Anomaly {
        id: id.into(),
        server_id: format!("srv_{id}"),
        server_name: server.map(str::to_string),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        kind,
        severity,
        explanation: text.into(),
    }
}

fn sample() -> Vec<Anomaly> {
    vec![
        anomaly("1", Some("Database Server"), AnomalyType::CpuSpike, Severity::High, "Backup job"),
        anomaly("2", Some("Cache Server"), AnomalyType::MemoryLeak, Severity::Critical, "RAM growing"),
        anomaly("3", Some("Web Server 1"), AnomalyType::NetworkAnomaly, Severity::Medium, "3x bandwidth"),
        anomaly("4", None, AnomalyType::DiskFull, Severity::Critical, "Volume at 99%"),
    ]
}

fn ids(list: &[Anomaly]) -> Vec<&str> {
    list.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn severity_filter_keeps_exact_matches() {
    let f = AnomalyFilter {
        severity: SeverityFilter::Only(Severity::Critical),
        ..Default::default()
    };
    assert_eq!(ids(&f.apply(&sample())), vec!["2", "4"]);
}

#[test]
fn empty_filter_keeps_everything_in_order() {
    assert_eq!(ids(&AnomalyFilter::default().apply(&sample())), vec!["1", "2", "3", "4"]);
}

#[test]
fn search_is_case_insensitive_over_name_type_and_explanation() {
    let by = |s: &str| {
        let f = AnomalyFilter {
            search: s.into(),
            ..Default::default()
        };
        f.apply(&sample())
    };
    assert_eq!(ids(&by("cache")), vec!["2"]);
    assert_eq!(ids(&by("BANDWIDTH")), vec!["3"]);
    assert_eq!(ids(&by("memory_leak")), vec!["2"]);
    assert_eq!(ids(&by("server")), vec!["1", "2", "3"]);
    assert!(by("nothing like this").is_empty());
}

#[test]
fn search_and_severity_combine() {
    let f = AnomalyFilter {
        search: "volume".into(),
        severity: SeverityFilter::Only(Severity::Critical),
    };
    assert_eq!(ids(&f.apply(&sample())), vec!["4"]);
    let f = AnomalyFilter {
        search: "volume".into(),
        severity: SeverityFilter::Only(Severity::Low),
    };
    assert!(f.apply(&sample()).is_empty());
}

#[test]
fn severity_filter_cycles_and_parses() {
    let mut s = SeverityFilter::All;
    let mut seen = vec![s.label()];
    for _ in 0..5 {
        s = s.cycle();
        seen.push(s.label());
    }
    assert_eq!(
        seen,
        vec!["All Severities", "Critical", "High", "Medium", "Low", "All Severities"]
    );
    assert_eq!(SeverityFilter::parse("ALL"), Some(SeverityFilter::All));
    assert_eq!(
        SeverityFilter::parse("High"),
        Some(SeverityFilter::Only(Severity::High))
    );
    assert_eq!(SeverityFilter::parse("urgent"), None);
}

#[test]
fn counts_follow_severity_order() {
    let counts = severity_counts(&sample());
    assert_eq!(
        counts,
        [
            (Severity::Critical, 2),
            (Severity::High, 1),
            (Severity::Medium, 1),
            (Severity::Low, 0),
        ]
    );
}

#[test]
fn missing_server_name_reads_unknown() {
    assert_eq!(sample()[3].server_label(), "Unknown");
}
