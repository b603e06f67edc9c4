//! Config file loading and the persisted key/value store.

use std::time::Duration;

use smartops::config::{load_config, Config};
use smartops::storage::LocalStorage;

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config(&dir.path().join("absent.json"));
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.dashboard_refresh(), Duration::from_secs(30));
    assert!(cfg.simulate_latency);
    assert_eq!(cfg.export_dir(), std::path::PathBuf::from("."));
}

#[test]
fn partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"servers_refresh_secs": 5, "export_dir": "/tmp/out"}"#).unwrap();
    let cfg = load_config(&path);
    assert_eq!(cfg.servers_refresh(), Duration::from_secs(5));
    assert_eq!(cfg.dashboard_refresh(), Duration::from_secs(30));
    assert_eq!(cfg.export_dir(), std::path::PathBuf::from("/tmp/out"));
}

#[test]
fn zero_refresh_is_raised_to_one_second() {
    let cfg = Config {
        dashboard_refresh_secs: 0,
        ..Config::default()
    };
    assert_eq!(cfg.dashboard_refresh(), Duration::from_secs(1));
}

#[test]
fn malformed_config_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_config(&path), Config::default());
}

#[test]
fn storage_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");
    let mut s = LocalStorage::open(path.clone());
    assert_eq!(s.get_item("token"), None);
    s.set_item("token", "abc").unwrap();
    s.set_item("theme", "dark").unwrap();

    let mut reopened = LocalStorage::open(path.clone());
    assert_eq!(reopened.get_item("token"), Some("abc"));
    reopened.remove_item("token").unwrap();
    assert_eq!(LocalStorage::open(path).get_item("token"), None);
}

#[test]
fn malformed_storage_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "[1,2,3]").unwrap();
    let s = LocalStorage::open(path);
    assert_eq!(s.get_item("token"), None);
}

#[test]
fn in_memory_storage_never_touches_disk() {
    let mut s = LocalStorage::in_memory();
    s.set_item("k", "v").unwrap();
    assert_eq!(s.get_item("k"), Some("v"));
    s.remove_item("k").unwrap();
    assert_eq!(s.get_item("k"), None);
}
