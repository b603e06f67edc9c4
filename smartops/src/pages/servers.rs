use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use super::{Action, Fetch, Loaded, Route};
use crate::forms::{AddServerForm, FormInput};
use crate::refresh::Poller;
use crate::types::Server;

#[derive(Debug, Default)]
pub struct AddServerModal {
    pub form: AddServerForm,
    pub error: Option<String>,
    pub submitting: bool,
}

pub struct ServersPage {
    pub servers: Vec<Server>,
    pub loading: bool,
    pub selected: usize,
    pub modal: Option<AddServerModal>,
    /// Id awaiting y/N confirmation.
    pub confirm_delete: Option<String>,
    pub notice: Option<String>,
    poller: Poller,
}

impl ServersPage {
    pub fn new(refresh: Duration, now: Instant) -> Self {
        Self {
            servers: Vec::new(),
            loading: true,
            selected: 0,
            modal: None,
            confirm_delete: None,
            notice: None,
            poller: Poller::new(refresh, now),
        }
    }

    pub fn selected_server(&self) -> Option<&Server> {
        self.servers.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.modal.is_some() {
            return self.modal_key(key);
        }
        if let Some(id) = self.confirm_delete.take() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Action::Fetch(Fetch::DeleteServer(id)),
                _ => Action::None,
            };
        }
        self.notice = None;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.servers.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.modal = Some(AddServerModal::default());
                Action::None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(s) = self.selected_server() {
                    self.confirm_delete = Some(s.id.clone());
                }
                Action::None
            }
            KeyCode::Char('r') => Action::Fetch(Fetch::Servers),
            KeyCode::Enter => match self.selected_server() {
                Some(s) => Action::Navigate(Route::ServerDetails(s.id.clone())),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn modal_key(&mut self, key: KeyEvent) -> Action {
        let Some(modal) = self.modal.as_mut() else {
            return Action::None;
        };
        if modal.submitting {
            return Action::None;
        }
        match modal.form.handle_key(key) {
            FormInput::Cancel => {
                self.modal = None;
                Action::None
            }
            FormInput::Submit => match modal.form.validate() {
                Ok(new) => {
                    modal.error = None;
                    modal.submitting = true;
                    Action::Fetch(Fetch::AddServer(new))
                }
                Err(e) => {
                    modal.error = Some(e.to_string());
                    Action::None
                }
            },
            _ => Action::None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Fetch> {
        if self.poller.due(now) {
            vec![Fetch::Servers]
        } else {
            vec![]
        }
    }

    pub fn apply(&mut self, loaded: Loaded) -> Vec<Fetch> {
        match loaded {
            Loaded::Servers(res) => {
                match res {
                    Ok(list) => self.servers = list,
                    Err(e) => warn!(error = %e, "error loading servers"),
                }
                self.loading = false;
            }
            Loaded::ServerAdded(res) => match res {
                Ok(server) => {
                    info!(id = %server.id, name = %server.name, "server added");
                    self.servers.push(server);
                    self.modal = None;
                }
                Err(e) => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.submitting = false;
                        modal.error = Some(e.to_string());
                    }
                }
            },
            Loaded::ServerDeleted(id, res) => match res {
                Ok(_) => self.servers.retain(|s| s.id != id),
                Err(e) => {
                    warn!(error = %e, id = %id, "error deleting server");
                    self.notice = Some("Failed to delete server".into());
                }
            },
            _ => {}
        }
        self.selected = self.selected.min(self.servers.len().saturating_sub(1));
        vec![]
    }
}
