//! Page state. Pages never touch the terminal or the data service directly:
//! keys come in and produce an `Action`, fetch results come back as `Loaded`.

pub mod anomalies;
pub mod auth;
pub mod dashboard;
pub mod fetch;
pub mod predictions;
pub mod server_details;
pub mod servers;

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::api::ApiError;
use crate::config::Config;
use crate::forms::{NewServer, Registration};
use crate::types::{Anomaly, DashboardStats, DeleteResponse, Metrics, Prediction, Server};

pub use anomalies::AnomaliesPage;
pub use auth::{LoginPage, RegisterPage};
pub use dashboard::DashboardPage;
pub use fetch::run_fetch;
pub use predictions::PredictionsPage;
pub use server_details::ServerDetailsPage;
pub use servers::ServersPage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Servers,
    ServerDetails(String),
    Anomalies,
    Predictions,
}

impl Route {
    /// Reachable without signing in.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Servers | Route::ServerDetails(_) => "Servers",
            Route::Anomalies => "Anomalies",
            Route::Predictions => "Predictions",
        }
    }
}

/// A data-service request issued by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Dashboard,
    Servers,
    ServerDetails(String),
    Anomalies,
    PredictionServers,
    Prediction(String),
    AddServer(NewServer),
    DeleteServer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub metrics: Metrics,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerDetailsData {
    pub server: Server,
    pub metrics: Metrics,
    pub anomalies: Vec<Anomaly>,
}

/// Result of a `Fetch`, routed back to whichever page is mounted.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Dashboard(Result<DashboardData, ApiError>),
    Servers(Result<Vec<Server>, ApiError>),
    ServerDetails(String, Result<ServerDetailsData, ApiError>),
    Anomalies(Result<Vec<Anomaly>, ApiError>),
    PredictionServers(Result<Vec<Server>, ApiError>),
    Prediction(Result<Prediction, ApiError>),
    ServerAdded(Result<Server, ApiError>),
    ServerDeleted(String, Result<DeleteResponse, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Navigate(Route),
    Fetch(Fetch),
    Login { email: String, password: String },
    Register(Registration),
    Export(Vec<Anomaly>),
}

pub enum Page {
    Login(LoginPage),
    Register(RegisterPage),
    Dashboard(DashboardPage),
    Servers(ServersPage),
    ServerDetails(ServerDetailsPage),
    Anomalies(AnomaliesPage),
    Predictions(PredictionsPage),
}

impl Page {
    /// Build fresh state for `route` and the fetches it issues on mount.
    pub fn mount(route: &Route, config: &Config, now: Instant) -> (Page, Vec<Fetch>) {
        match route {
            Route::Login => (Page::Login(LoginPage::default()), vec![]),
            Route::Register => (Page::Register(RegisterPage::default()), vec![]),
            Route::Dashboard => (
                Page::Dashboard(DashboardPage::new(config.dashboard_refresh(), now)),
                vec![Fetch::Dashboard],
            ),
            Route::Servers => (
                Page::Servers(ServersPage::new(config.servers_refresh(), now)),
                vec![Fetch::Servers],
            ),
            Route::ServerDetails(id) => (
                Page::ServerDetails(ServerDetailsPage::new(id.clone())),
                vec![Fetch::ServerDetails(id.clone())],
            ),
            Route::Anomalies => (Page::Anomalies(AnomaliesPage::default()), vec![Fetch::Anomalies]),
            Route::Predictions => (
                Page::Predictions(PredictionsPage::new()),
                vec![Fetch::PredictionServers],
            ),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Login(_) => Route::Login,
            Page::Register(_) => Route::Register,
            Page::Dashboard(_) => Route::Dashboard,
            Page::Servers(_) => Route::Servers,
            Page::ServerDetails(p) => Route::ServerDetails(p.id.clone()),
            Page::Anomalies(_) => Route::Anomalies,
            Page::Predictions(_) => Route::Predictions,
        }
    }

    /// Whether plain character keys belong to a text input right now.
    pub fn captures_text(&self) -> bool {
        match self {
            Page::Login(_) | Page::Register(_) => true,
            Page::Servers(p) => p.modal.is_some() || p.confirm_delete.is_some(),
            Page::Anomalies(p) => p.editing_search,
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self {
            Page::Login(p) => p.handle_key(key),
            Page::Register(p) => p.handle_key(key),
            Page::Dashboard(p) => p.handle_key(key),
            Page::Servers(p) => p.handle_key(key),
            Page::ServerDetails(p) => p.handle_key(key),
            Page::Anomalies(p) => p.handle_key(key),
            Page::Predictions(p) => p.handle_key(key),
        }
    }

    /// Periodic refreshes that have come due.
    pub fn tick(&mut self, now: Instant) -> Vec<Fetch> {
        match self {
            Page::Dashboard(p) => p.tick(now),
            Page::Servers(p) => p.tick(now),
            _ => vec![],
        }
    }

    /// Apply a result; returns follow-up fetches. Results meant for another
    /// page are dropped.
    pub fn apply(&mut self, loaded: Loaded) -> Vec<Fetch> {
        match self {
            Page::Dashboard(p) => p.apply(loaded),
            Page::Servers(p) => p.apply(loaded),
            Page::ServerDetails(p) => p.apply(loaded),
            Page::Anomalies(p) => p.apply(loaded),
            Page::Predictions(p) => p.apply(loaded),
            Page::Login(_) | Page::Register(_) => vec![],
        }
    }

    /// Surface a failed login/registration on the form.
    pub fn auth_failed(&mut self, message: String) {
        match self {
            Page::Login(p) => p.failed(message),
            Page::Register(p) => p.failed(message),
            _ => {}
        }
    }

    pub fn set_notice(&mut self, notice: String) {
        match self {
            Page::Anomalies(p) => p.notice = Some(notice),
            Page::Servers(p) => p.notice = Some(notice),
            _ => {}
        }
    }
}
