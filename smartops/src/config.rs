//! Dashboard settings: refresh periods, mock latency, export and log locations.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/smartops/config.json (fallback ~/.config/smartops/config.json)

use std::{fs, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard_refresh_secs: u64,
    pub servers_refresh_secs: u64,
    pub simulate_latency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashboard_refresh_secs: 30,
            servers_refresh_secs: 30,
            simulate_latency: true,
            export_dir: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs.max(1))
    }

    pub fn servers_refresh(&self) -> Duration {
        Duration::from_secs(self.servers_refresh_secs.max(1))
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join("smartops.log"))
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("smartops")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smartops")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Missing file means defaults; a malformed one is logged and ignored.
pub fn load_config(path: &Path) -> Config {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
