//! Smart OPS: a terminal dashboard for monitoring servers, metrics, anomalies
//! and CPU forecasts, backed by an in-memory mock data service.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod export;
pub mod filter;
pub mod forms;
pub mod pages;
pub mod refresh;
pub mod series;
pub mod storage;
pub mod types;
pub mod ui;
