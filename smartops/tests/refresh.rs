//! Poller timing.

use std::time::{Duration, Instant};

use smartops::refresh::Poller;

#[test]
fn first_tick_is_one_period_after_mount() {
    let t0 = Instant::now();
    let mut p = Poller::new(Duration::from_secs(30), t0);
    assert_eq!(p.period(), Duration::from_secs(30));
    assert!(!p.due(t0));
    assert!(!p.due(t0 + Duration::from_secs(29)));
    assert!(p.due(t0 + Duration::from_secs(30)));
}

#[test]
fn fires_once_per_period() {
    let t0 = Instant::now();
    let mut p = Poller::new(Duration::from_secs(10), t0);
    let t1 = t0 + Duration::from_secs(10);
    assert!(p.due(t1));
    assert!(!p.due(t1));
    assert!(!p.due(t1 + Duration::from_secs(9)));
    assert!(p.due(t1 + Duration::from_secs(10)));
}

#[test]
fn late_check_does_not_backlog() {
    let t0 = Instant::now();
    let mut p = Poller::new(Duration::from_secs(5), t0);
    let late = t0 + Duration::from_secs(60);
    assert!(p.due(late));
    assert!(!p.due(late + Duration::from_secs(1)));
}
