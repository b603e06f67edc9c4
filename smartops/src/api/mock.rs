//! In-memory data service: canned servers and anomalies, randomly generated
//! metric series, and a sinusoidal forecast. Every call resolves after a fixed
//! artificial delay.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use super::{endpoints, ApiError, DataService};
use crate::types::{
    Anomaly, AnomalyType, AuthResponse, DashboardStats, DeleteResponse, ForecastPoint,
    MetricSample, Metrics, Prediction, Server, ServerStatus, Severity, User,
};

const SERIES_POINTS: usize = 50;
const FORECAST_POINTS: usize = 30;

/// Artificial per-call delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub base: Duration,
    pub current_user: Duration,
    pub stats: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self {
            base: Duration::ZERO,
            current_user: Duration::ZERO,
            stats: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            current_user: Duration::from_millis(200),
            stats: Duration::from_millis(300),
        }
    }
}

struct MockState {
    servers: Mutex<Vec<Server>>,
    anomalies: Vec<Anomaly>,
    metrics: Metrics,
    latency: Latency,
    last_id_ms: AtomicI64,
}

#[derive(Clone)]
pub struct MockService {
    state: Arc<MockState>,
}

impl MockService {
    pub fn new(latency: Latency) -> Self {
        let now = Utc::now();
        let mut rng = rand::thread_rng();
        let metrics = Metrics {
            cpu: generate_series(&mut rng, now, SERIES_POINTS, 45.0, 40.0),
            ram: generate_series(&mut rng, now, SERIES_POINTS, 65.0, 30.0),
            disk_io: generate_series(&mut rng, now, SERIES_POINTS, 30.0, 25.0),
            network: generate_series(&mut rng, now, SERIES_POINTS, 50.0, 35.0),
        };
        Self {
            state: Arc::new(MockState {
                servers: Mutex::new(seed_servers(now)),
                anomalies: seed_anomalies(now),
                metrics,
                latency,
                last_id_ms: AtomicI64::new(0),
            }),
        }
    }

    /// No artificial delay; used by tests and headless commands.
    pub fn instant() -> Self {
        Self::new(Latency::none())
    }

    fn servers(&self) -> MutexGuard<'_, Vec<Server>> {
        self.state
            .servers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Millisecond timestamps, bumped so two calls never share an id.
    fn next_id(&self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .state
            .last_id_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        format!("{prefix}{}", now.max(prev + 1))
    }

    async fn delay(&self, d: Duration) {
        if !d.is_zero() {
            sleep(d).await;
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidCredentials);
    }
    Ok(())
}

impl DataService for MockService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        debug!(endpoint = endpoints::AUTH_LOGIN, "mock request");
        self.delay(self.state.latency.base).await;
        check_credentials(email, password)?;
        Ok(AuthResponse {
            token: self.next_id("mock_jwt_token_"),
            user: User {
                id: "user_1".into(),
                email: email.to_string(),
                name: "Demo User".into(),
            },
        })
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        debug!(endpoint = endpoints::AUTH_REGISTER, "mock request");
        self.delay(self.state.latency.base).await;
        check_credentials(email, password)?;
        Ok(AuthResponse {
            token: self.next_id("mock_jwt_token_"),
            user: User {
                id: self.next_id("user_"),
                email: email.to_string(),
                name: name.to_string(),
            },
        })
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        debug!(endpoint = endpoints::AUTH_ME, "mock request");
        self.delay(self.state.latency.current_user).await;
        Ok(User {
            id: "user_1".into(),
            email: "demo@smartops.com".into(),
            name: "Demo User".into(),
        })
    }

    async fn get_servers(&self) -> Result<Vec<Server>, ApiError> {
        debug!(endpoint = endpoints::SERVERS_LIST, "mock request");
        self.delay(self.state.latency.base).await;
        Ok(self.servers().clone())
    }

    async fn get_server_by_id(&self, id: &str) -> Result<Server, ApiError> {
        debug!(endpoint = %endpoints::resolve(endpoints::SERVERS_DETAIL, id), "mock request");
        self.delay(self.state.latency.base).await;
        self.servers()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::ServerNotFound(id.to_string()))
    }

    async fn add_server(
        &self,
        name: &str,
        ip: &str,
        _api_key: Option<&str>,
    ) -> Result<Server, ApiError> {
        debug!(endpoint = endpoints::SERVERS_CREATE, "mock request");
        self.delay(self.state.latency.base).await;
        let server = Server {
            id: self.next_id("srv_"),
            name: name.to_string(),
            ip: ip.to_string(),
            status: ServerStatus::Online,
            cpu: 0.0,
            ram: 0.0,
            last_seen: Utc::now(),
        };
        self.servers().push(server.clone());
        Ok(server)
    }

    async fn delete_server(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        debug!(endpoint = %endpoints::resolve(endpoints::SERVERS_DELETE, id), "mock request");
        self.delay(self.state.latency.base).await;
        self.servers().retain(|s| s.id != id);
        Ok(DeleteResponse { success: true })
    }

    async fn get_metrics(&self, server_id: &str) -> Result<Metrics, ApiError> {
        debug!(endpoint = %endpoints::resolve(endpoints::METRICS_GET, server_id), "mock request");
        self.delay(self.state.latency.base).await;
        Ok(self.state.metrics.clone())
    }

    async fn get_anomalies(&self, server_id: Option<&str>) -> Result<Vec<Anomaly>, ApiError> {
        match server_id {
            Some(id) => debug!(
                endpoint = %endpoints::resolve(endpoints::ANOMALIES_BY_SERVER, id),
                "mock request"
            ),
            None => debug!(endpoint = endpoints::ANOMALIES_LIST, "mock request"),
        }
        self.delay(self.state.latency.base).await;
        Ok(self
            .state
            .anomalies
            .iter()
            .filter(|a| server_id.map_or(true, |id| a.server_id == id))
            .cloned()
            .collect())
    }

    async fn get_predictions(&self, server_id: &str) -> Result<Prediction, ApiError> {
        debug!(
            endpoint = %endpoints::resolve(endpoints::PREDICTIONS_GET, server_id),
            "mock request"
        );
        self.delay(self.state.latency.base).await;
        let now = Utc::now();
        Ok(Prediction {
            server_id: server_id.to_string(),
            created_at: now,
            forecast: generate_forecast(now, FORECAST_POINTS),
        })
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.delay(self.state.latency.stats).await;
        let servers = self.servers().clone();
        Ok(compute_stats(&servers, &self.state.anomalies, Local::now()))
    }
}

/// One sample per minute, ending at `now`; values clamped to 0..=100 here only.
pub fn generate_series<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    points: usize,
    base: f64,
    variance: f64,
) -> Vec<MetricSample> {
    (0..points)
        .map(|i| MetricSample {
            time: now - TimeDelta::minutes((points - i) as i64),
            value: (base + (rng.gen::<f64>() - 0.5) * variance).clamp(0.0, 100.0),
        })
        .collect()
}

pub fn generate_forecast(now: DateTime<Utc>, points: usize) -> Vec<ForecastPoint> {
    (0..points)
        .map(|i| {
            let wave = (i as f64 / 5.0).sin() * 15.0;
            ForecastPoint {
                time: now + TimeDelta::minutes(i as i64),
                predicted_value: 45.0 + wave,
                lower_bound: 35.0 + wave,
                upper_bound: 55.0 + wave,
            }
        })
        .collect()
}

pub fn compute_stats(
    servers: &[Server],
    anomalies: &[Anomaly],
    now: DateTime<Local>,
) -> DashboardStats {
    let count = |status: ServerStatus| servers.iter().filter(|s| s.status == status).count();
    let avg = |f: fn(&Server) -> f64| {
        if servers.is_empty() {
            0.0
        } else {
            let mean = servers.iter().map(f).sum::<f64>() / servers.len() as f64;
            (mean * 10.0).round() / 10.0
        }
    };
    let today = now.date_naive();
    DashboardStats {
        total_servers: servers.len(),
        online_servers: count(ServerStatus::Online),
        warning_servers: count(ServerStatus::Warning),
        critical_servers: count(ServerStatus::Critical),
        total_anomalies_today: anomalies
            .iter()
            .filter(|a| a.timestamp.with_timezone(&Local).date_naive() == today)
            .count(),
        avg_cpu_usage: avg(|s| s.cpu),
        avg_ram_usage: avg(|s| s.ram),
    }
}

fn seed_servers(now: DateTime<Utc>) -> Vec<Server> {
    let server = |id: &str, name: &str, ip: &str, status, cpu, ram, secs_ago| Server {
        id: id.into(),
        name: name.into(),
        ip: ip.into(),
        status,
        cpu,
        ram,
        last_seen: now - TimeDelta::seconds(secs_ago),
    };
    vec![
        server("srv_1", "Web Server 1", "192.168.1.100", ServerStatus::Online, 45.2, 67.8, 30),
        server("srv_2", "Database Server", "192.168.1.101", ServerStatus::Warning, 78.5, 82.1, 45),
        server("srv_3", "API Gateway", "192.168.1.102", ServerStatus::Online, 32.1, 54.3, 20),
        server("srv_4", "Cache Server", "192.168.1.103", ServerStatus::Critical, 92.7, 95.4, 120),
    ]
}

fn seed_anomalies(now: DateTime<Utc>) -> Vec<Anomaly> {
    vec![
        Anomaly {
            id: "anom_1".into(),
            server_id: "srv_2".into(),
            server_name: Some("Database Server".into()),
            timestamp: now - TimeDelta::minutes(5),
            kind: AnomalyType::CpuSpike,
            severity: Severity::High,
            explanation: "CPU usage increased by 45% in 2 minutes. Likely caused by backup \
                          process consuming excessive resources."
                .into(),
        },
        Anomaly {
            id: "anom_2".into(),
            server_id: "srv_4".into(),
            server_name: Some("Cache Server".into()),
            timestamp: now - TimeDelta::minutes(3),
            kind: AnomalyType::MemoryLeak,
            severity: Severity::Critical,
            explanation: "RAM usage growing steadily at 2% per minute. Possible memory leak in \
                          application process."
                .into(),
        },
        Anomaly {
            id: "anom_3".into(),
            server_id: "srv_1".into(),
            server_name: Some("Web Server 1".into()),
            timestamp: now - TimeDelta::minutes(10),
            kind: AnomalyType::NetworkAnomaly,
            severity: Severity::Medium,
            explanation: "Unusual network traffic pattern detected. 3x normal bandwidth usage \
                          observed."
                .into(),
        },
    ]
}
