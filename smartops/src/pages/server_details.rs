use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::{Action, Loaded, Route};
use crate::series::tail;
use crate::types::{Anomaly, MetricSample, Server};

pub const DETAIL_CHART_POINTS: usize = 50;

pub struct ServerDetailsPage {
    pub id: String,
    pub server: Option<Server>,
    pub cpu: Vec<MetricSample>,
    pub ram: Vec<MetricSample>,
    pub anomalies: Vec<Anomaly>,
    pub loading: bool,
}

impl ServerDetailsPage {
    pub fn new(id: String) -> Self {
        Self {
            id,
            server: None,
            cpu: Vec::new(),
            ram: Vec::new(),
            anomalies: Vec::new(),
            loading: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                Action::Navigate(Route::Servers)
            }
            _ => Action::None,
        }
    }

    pub fn apply(&mut self, loaded: Loaded) -> Vec<super::Fetch> {
        let Loaded::ServerDetails(id, res) = loaded else {
            return vec![];
        };
        if id != self.id {
            return vec![];
        }
        match res {
            Ok(data) => {
                self.server = Some(data.server);
                self.cpu = tail(&data.metrics.cpu, DETAIL_CHART_POINTS).to_vec();
                self.ram = tail(&data.metrics.ram, DETAIL_CHART_POINTS).to_vec();
                self.anomalies = data.anomalies;
            }
            Err(e) => warn!(error = %e, id = %id, "error loading server details"),
        }
        self.loading = false;
        vec![]
    }
}
