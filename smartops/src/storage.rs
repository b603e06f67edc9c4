//! Local storage: a flat string map persisted as JSON.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/smartops/storage.json (fallback ~/.config/smartops/storage.json)

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use tracing::warn;

use crate::config::config_dir;

pub const TOKEN_KEY: &str = "token";

pub fn storage_path() -> PathBuf {
    config_dir().join("storage.json")
}

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    // None keeps everything in memory
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing or unreadable file starts empty.
    pub fn open(path: PathBuf) -> Self {
        let items = match fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding malformed storage file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: Some(path),
            items,
        }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove_item(&mut self, key: &str) -> io::Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.items).map_err(io::Error::other)?;
        fs::write(path, data)
    }
}
