//! Records exchanged with the data service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Warning,
    Critical,
    Offline,
}

impl ServerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Warning => "warning",
            ServerStatus::Critical => "critical",
            ServerStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub status: ServerStatus,
    // percentages, display only
    pub cpu: f64,
    pub ram: f64,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub time: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Ram,
    DiskIo,
    Network,
}

/// Named metric series for one server, oldest sample first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub cpu: Vec<MetricSample>,
    pub ram: Vec<MetricSample>,
    pub disk_io: Vec<MetricSample>,
    pub network: Vec<MetricSample>,
}

impl Metrics {
    pub fn series(&self, kind: MetricKind) -> &[MetricSample] {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Ram => &self.ram,
            MetricKind::DiskIo => &self.disk_io,
            MetricKind::Network => &self.network,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    CpuSpike,
    MemoryLeak,
    DiskFull,
    NetworkAnomaly,
    ProcessCrash,
}

impl AnomalyType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyType::CpuSpike => "cpu_spike",
            AnomalyType::MemoryLeak => "memory_leak",
            AnomalyType::DiskFull => "disk_full",
            AnomalyType::NetworkAnomaly => "network_anomaly",
            AnomalyType::ProcessCrash => "process_crash",
        }
    }

    /// Display form: the first underscore becomes a space ("cpu spike").
    pub fn label(self) -> String {
        self.as_str().replacen('_', " ", 1)
    }
}

/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    pub server_id: String,
    #[serde(default)]
    pub server_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AnomalyType,
    pub severity: Severity,
    pub explanation: String,
}

impl Anomaly {
    pub fn server_label(&self) -> &str {
        self.server_name.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub server_id: String,
    pub created_at: DateTime<Utc>,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_servers: usize,
    pub online_servers: usize,
    pub warning_servers: usize,
    pub critical_servers: usize,
    pub total_anomalies_today: usize,
    pub avg_cpu_usage: f64,
    pub avg_ram_usage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}
