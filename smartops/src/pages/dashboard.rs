use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::{Action, Fetch, Loaded};
use crate::refresh::Poller;
use crate::series::tail;
use crate::types::{Anomaly, DashboardStats, MetricSample};

pub const CPU_CHART_POINTS: usize = 24;
pub const RECENT_ANOMALIES: usize = 3;

pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
    pub cpu: Vec<MetricSample>,
    pub anomalies: Vec<Anomaly>,
    pub loading: bool,
    pub refreshing: bool,
    poller: Poller,
}

impl DashboardPage {
    pub fn new(refresh: Duration, now: Instant) -> Self {
        Self {
            stats: None,
            cpu: Vec::new(),
            anomalies: Vec::new(),
            loading: true,
            refreshing: false,
            poller: Poller::new(refresh, now),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') if !self.refreshing => {
                self.refreshing = true;
                Action::Fetch(Fetch::Dashboard)
            }
            _ => Action::None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Fetch> {
        if self.poller.due(now) {
            vec![Fetch::Dashboard]
        } else {
            vec![]
        }
    }

    pub fn apply(&mut self, loaded: Loaded) -> Vec<Fetch> {
        let Loaded::Dashboard(res) = loaded else {
            return vec![];
        };
        match res {
            Ok(data) => {
                self.stats = Some(data.stats);
                self.cpu = tail(&data.metrics.cpu, CPU_CHART_POINTS).to_vec();
                self.anomalies = data.anomalies.into_iter().take(RECENT_ANOMALIES).collect();
            }
            Err(e) => warn!(error = %e, "error loading dashboard"),
        }
        self.loading = false;
        self.refreshing = false;
        vec![]
    }
}
