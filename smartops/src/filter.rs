//! Anomaly list filtering: free-text search plus a severity selector.

use crate::types::{Anomaly, Severity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    /// all -> critical -> high -> medium -> low -> all
    pub fn cycle(self) -> Self {
        match self {
            SeverityFilter::All => SeverityFilter::Only(Severity::Critical),
            SeverityFilter::Only(Severity::Critical) => SeverityFilter::Only(Severity::High),
            SeverityFilter::Only(Severity::High) => SeverityFilter::Only(Severity::Medium),
            SeverityFilter::Only(Severity::Medium) => SeverityFilter::Only(Severity::Low),
            SeverityFilter::Only(Severity::Low) => SeverityFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityFilter::All => "All Severities",
            SeverityFilter::Only(Severity::Critical) => "Critical",
            SeverityFilter::Only(Severity::High) => "High",
            SeverityFilter::Only(Severity::Medium) => "Medium",
            SeverityFilter::Only(Severity::Low) => "Low",
        }
    }

    /// "all" or a severity name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(SeverityFilter::All);
        }
        Severity::parse(s).map(SeverityFilter::Only)
    }

    pub fn matches(self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(s) => s == severity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnomalyFilter {
    pub search: String,
    pub severity: SeverityFilter,
}

impl AnomalyFilter {
    pub fn matches(&self, a: &Anomaly) -> bool {
        if !self.severity.matches(a.severity) {
            return false;
        }
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        a.server_name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&needle))
            || a.explanation.to_lowercase().contains(&needle)
            || a.kind.as_str().contains(&needle)
    }

    /// Matching anomalies in their original order.
    pub fn apply(&self, anomalies: &[Anomaly]) -> Vec<Anomaly> {
        anomalies.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

/// Count per severity, in `Severity::ALL` order.
pub fn severity_counts(anomalies: &[Anomaly]) -> [(Severity, usize); 4] {
    Severity::ALL.map(|sev| (sev, anomalies.iter().filter(|a| a.severity == sev).count()))
}
