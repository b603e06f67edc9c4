use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::{Action, Fetch, Loaded};
use crate::series::ForecastBands;
use crate::types::{Prediction, Server};

#[derive(Default)]
pub struct PredictionsPage {
    pub servers: Vec<Server>,
    pub selected: Option<usize>,
    pub prediction: Option<Prediction>,
    pub bands: ForecastBands,
    pub loading: bool,
}

impl PredictionsPage {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn selected_server(&self) -> Option<&Server> {
        self.selected.and_then(|i| self.servers.get(i))
    }

    /// Move the selection by `delta`; a changed selection re-fetches. Earlier
    /// requests still in flight are not cancelled and may land afterwards.
    pub fn select_by(&mut self, delta: isize) -> Action {
        let Some(cur) = self.selected else {
            return Action::None;
        };
        let last = self.servers.len().saturating_sub(1) as isize;
        let next = (cur as isize + delta).clamp(0, last) as usize;
        if next == cur {
            return Action::None;
        }
        self.selected = Some(next);
        Action::Fetch(Fetch::Prediction(self.servers[next].id.clone()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.select_by(-1)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.select_by(1)
            }
            _ => Action::None,
        }
    }

    pub fn apply(&mut self, loaded: Loaded) -> Vec<Fetch> {
        match loaded {
            Loaded::PredictionServers(res) => {
                self.loading = false;
                match res {
                    Ok(list) => {
                        self.servers = list;
                        if let Some(first) = self.servers.first() {
                            self.selected = Some(0);
                            return vec![Fetch::Prediction(first.id.clone())];
                        }
                    }
                    Err(e) => warn!(error = %e, "error loading servers"),
                }
            }
            Loaded::Prediction(res) => match res {
                Ok(p) => {
                    self.bands = ForecastBands::from_forecast(&p.forecast);
                    self.prediction = Some(p);
                }
                Err(e) => warn!(error = %e, "error loading predictions"),
            },
            _ => {}
        }
        vec![]
    }
}
