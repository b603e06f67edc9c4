use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::{Action, Fetch, Loaded};
use crate::filter::AnomalyFilter;
use crate::forms::TextField;
use crate::types::Anomaly;

pub struct AnomaliesPage {
    pub anomalies: Vec<Anomaly>,
    /// Recomputed whenever the list, search text or severity changes.
    pub filtered: Vec<Anomaly>,
    pub filter: AnomalyFilter,
    pub search: TextField,
    pub editing_search: bool,
    pub selected: usize,
    pub loading: bool,
    pub notice: Option<String>,
}

impl Default for AnomaliesPage {
    fn default() -> Self {
        Self {
            anomalies: Vec::new(),
            filtered: Vec::new(),
            filter: AnomalyFilter::default(),
            search: TextField::new("Search anomalies..."),
            editing_search: false,
            selected: 0,
            loading: true,
            notice: None,
        }
    }
}

impl AnomaliesPage {
    fn refilter(&mut self) {
        self.filter.search = self.search.value.clone();
        self.filtered = self.filter.apply(&self.anomalies);
        self.selected = self.selected.min(self.filtered.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.editing_search {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.editing_search = false,
                _ => {
                    if self.search.handle_key(key) {
                        self.refilter();
                    }
                }
            }
            return Action::None;
        }
        match key.code {
            KeyCode::Char('/') => {
                self.editing_search = true;
                self.notice = None;
                Action::None
            }
            KeyCode::Char('s') => {
                self.filter.severity = self.filter.severity.cycle();
                self.refilter();
                Action::None
            }
            KeyCode::Char('c') => {
                self.search.clear();
                self.filter = AnomalyFilter::default();
                self.refilter();
                Action::None
            }
            KeyCode::Char('e') => Action::Export(self.filtered.clone()),
            KeyCode::Char('r') => Action::Fetch(Fetch::Anomalies),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn apply(&mut self, loaded: Loaded) -> Vec<Fetch> {
        let Loaded::Anomalies(res) = loaded else {
            return vec![];
        };
        match res {
            Ok(list) => {
                self.anomalies = list;
                self.refilter();
            }
            Err(e) => warn!(error = %e, "error loading anomalies"),
        }
        self.loading = false;
        vec![]
    }
}
