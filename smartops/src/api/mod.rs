//! Data service seam. Pages and the auth context only talk to `DataService`;
//! `MockService` is the in-memory stand-in until a real backend exists.

pub mod endpoints;
pub mod mock;

use std::future::Future;

use thiserror::Error;

use crate::types::{
    Anomaly, AuthResponse, DashboardStats, DeleteResponse, Metrics, Prediction, Server, User,
};

pub use mock::{Latency, MockService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Server not found")]
    ServerNotFound(String),
}

pub trait DataService: Clone + Send + Sync + 'static {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    fn get_current_user(&self) -> impl Future<Output = Result<User, ApiError>> + Send;

    fn get_servers(&self) -> impl Future<Output = Result<Vec<Server>, ApiError>> + Send;

    fn get_server_by_id(&self, id: &str)
        -> impl Future<Output = Result<Server, ApiError>> + Send;

    fn add_server(
        &self,
        name: &str,
        ip: &str,
        api_key: Option<&str>,
    ) -> impl Future<Output = Result<Server, ApiError>> + Send;

    fn delete_server(&self, id: &str)
        -> impl Future<Output = Result<DeleteResponse, ApiError>> + Send;

    fn get_metrics(&self, server_id: &str)
        -> impl Future<Output = Result<Metrics, ApiError>> + Send;

    /// All anomalies, or only those of `server_id` when given.
    fn get_anomalies(
        &self,
        server_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Anomaly>, ApiError>> + Send;

    fn get_predictions(
        &self,
        server_id: &str,
    ) -> impl Future<Output = Result<Prediction, ApiError>> + Send;

    fn get_dashboard_stats(&self) -> impl Future<Output = Result<DashboardStats, ApiError>> + Send;
}
