//! Page state machines: keys in, actions out, results applied.

use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smartops::api::{ApiError, DataService, MockService};
use smartops::config::Config;
use smartops::filter::SeverityFilter;
use smartops::forms::Registration;
use smartops::pages::{
    run_fetch, Action, AnomaliesPage, DashboardPage, Fetch, Loaded, Page, PredictionsPage,
    RegisterPage, Route, ServerDetailsPage, ServersPage,
};
use smartops::types::{Server, ServerStatus, Severity};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn chars(text: &str) -> impl Iterator<Item = KeyEvent> + '_ {
    text.chars().map(|c| key(KeyCode::Char(c)))
}

fn fill_register(page: &mut RegisterPage, values: [&str; 4]) -> Action {
    let mut last = Action::None;
    for (i, v) in values.iter().enumerate() {
        for k in chars(v) {
            page.handle_key(k);
        }
        last = page.handle_key(key(KeyCode::Enter));
        if i < 3 {
            assert_eq!(last, Action::None);
        }
    }
    last
}

fn server(id: &str, name: &str) -> Server {
    Server {
        id: id.into(),
        name: name.into(),
        ip: "10.0.0.1".into(),
        status: ServerStatus::Online,
        cpu: 10.0,
        ram: 20.0,
        last_seen: Utc::now(),
    }
}

#[test]
fn register_mismatch_never_submits() {
    let mut page = RegisterPage::default();
    let action = fill_register(&mut page, ["Ada", "ada@x.io", "secret1", "secret2"]);
    assert_eq!(action, Action::None);
    assert_eq!(page.error.as_deref(), Some("Passwords do not match"));
    assert!(!page.submitting);
}

#[test]
fn register_short_password_never_submits() {
    let mut page = RegisterPage::default();
    let action = fill_register(&mut page, ["Ada", "ada@x.io", "abc", "abc"]);
    assert_eq!(action, Action::None);
    assert_eq!(
        page.error.as_deref(),
        Some("Password must be at least 6 characters")
    );

    // Editing a field clears the message
    page.handle_key(key(KeyCode::Char('d')));
    assert_eq!(page.error, None);
}

#[test]
fn register_valid_submits_once() {
    let mut page = RegisterPage::default();
    let action = fill_register(&mut page, ["Ada", "ada@x.io", "secret", "secret"]);
    assert_eq!(
        action,
        Action::Register(Registration {
            name: "Ada".into(),
            email: "ada@x.io".into(),
            password: "secret".into(),
        })
    );
    assert!(page.submitting);
    assert_eq!(page.handle_key(key(KeyCode::Enter)), Action::None);
    page.failed("Registration failed".into());
    assert!(!page.submitting);
    assert_eq!(page.error.as_deref(), Some("Registration failed"));
}

#[test]
fn mount_issues_initial_fetches() {
    let cfg = Config::default();
    let now = Instant::now();
    let (_, f) = Page::mount(&Route::Dashboard, &cfg, now);
    assert_eq!(f, vec![Fetch::Dashboard]);
    let (p, f) = Page::mount(&Route::ServerDetails("srv_3".into()), &cfg, now);
    assert_eq!(f, vec![Fetch::ServerDetails("srv_3".into())]);
    assert_eq!(p.route(), Route::ServerDetails("srv_3".into()));
    assert_eq!(p.route().title(), "Servers");
    let (p, f) = Page::mount(&Route::Login, &cfg, now);
    assert!(f.is_empty());
    assert!(p.captures_text());
    assert!(Route::Register.is_public());
    assert!(!Route::Anomalies.is_public());
}

#[test]
fn dashboard_polls_on_period() {
    let t0 = Instant::now();
    let mut page = DashboardPage::new(Duration::from_secs(30), t0);
    assert!(page.tick(t0 + Duration::from_secs(29)).is_empty());
    assert_eq!(page.tick(t0 + Duration::from_secs(30)), vec![Fetch::Dashboard]);
}

#[test]
fn dashboard_refresh_key_is_debounced() {
    let mut page = DashboardPage::new(Duration::from_secs(30), Instant::now());
    assert_eq!(page.handle_key(key(KeyCode::Char('r'))), Action::Fetch(Fetch::Dashboard));
    assert_eq!(page.handle_key(key(KeyCode::Char('r'))), Action::None);
    page.apply(Loaded::Dashboard(Err(ApiError::InvalidCredentials)));
    assert!(!page.refreshing);
    assert!(!page.loading);
}

#[tokio::test]
async fn dashboard_keeps_tail_and_recent() {
    let svc = MockService::instant();
    let loaded = run_fetch(&svc, Fetch::Dashboard).await;
    let mut page = DashboardPage::new(Duration::from_secs(30), Instant::now());
    page.apply(loaded);
    assert_eq!(page.cpu.len(), 24);
    assert_eq!(page.anomalies.len(), 3);
    assert_eq!(page.stats.as_ref().map(|s| s.total_servers), Some(4));
}

#[tokio::test]
async fn server_details_not_found() {
    let svc = MockService::instant();
    let loaded = run_fetch(&svc, Fetch::ServerDetails("nope".into())).await;
    let mut page = ServerDetailsPage::new("nope".into());
    page.apply(loaded);
    assert!(!page.loading);
    assert!(page.server.is_none());
    assert_eq!(page.handle_key(key(KeyCode::Esc)), Action::Navigate(Route::Servers));
}

#[tokio::test]
async fn server_details_ignores_other_ids() {
    let svc = MockService::instant();
    let loaded = run_fetch(&svc, Fetch::ServerDetails("srv_4".into())).await;
    let mut page = ServerDetailsPage::new("srv_1".into());
    page.apply(loaded.clone());
    assert!(page.loading);

    let mut page = ServerDetailsPage::new("srv_4".into());
    page.apply(loaded);
    assert_eq!(page.server.as_ref().map(|s| s.name.as_str()), Some("Cache Server"));
    assert_eq!(page.cpu.len(), 50);
    assert_eq!(page.anomalies.len(), 1);
}

#[test]
fn servers_add_flow() {
    let mut page = ServersPage::new(Duration::from_secs(30), Instant::now());
    page.apply(Loaded::Servers(Ok(vec![server("srv_1", "Web")])));
    assert!(!page.loading);

    page.handle_key(key(KeyCode::Char('a')));
    assert!(page.modal.is_some());

    // Name, then a malformed IP, then submit from the last field
    for k in chars("Edge") {
        page.handle_key(k);
    }
    page.handle_key(key(KeyCode::Tab));
    for k in chars("10.0.0") {
        page.handle_key(k);
    }
    page.handle_key(key(KeyCode::Tab));
    assert_eq!(page.handle_key(key(KeyCode::Enter)), Action::None);
    let modal = page.modal.as_ref().unwrap();
    assert_eq!(modal.error.as_deref(), Some("Invalid IP address format"));

    page.handle_key(key(KeyCode::BackTab));
    for k in chars(".9") {
        page.handle_key(k);
    }
    page.handle_key(key(KeyCode::Tab));
    let action = page.handle_key(key(KeyCode::Enter));
    let Action::Fetch(Fetch::AddServer(new)) = action else {
        panic!("expected add-server fetch, got {action:?}");
    };
    assert_eq!(new.ip, "10.0.0.9");
    assert_eq!(new.api_key, None);

    page.apply(Loaded::ServerAdded(Ok(server("srv_99", "Edge"))));
    assert!(page.modal.is_none());
    assert_eq!(page.servers.len(), 2);
}

#[test]
fn servers_modal_escape_discards() {
    let mut page = ServersPage::new(Duration::from_secs(30), Instant::now());
    page.handle_key(key(KeyCode::Char('a')));
    page.handle_key(key(KeyCode::Char('x')));
    page.handle_key(key(KeyCode::Esc));
    assert!(page.modal.is_none());
    page.handle_key(key(KeyCode::Char('a')));
    assert!(page.modal.as_ref().unwrap().form.name.value.is_empty());
}

#[test]
fn servers_delete_needs_confirmation() {
    let mut page = ServersPage::new(Duration::from_secs(30), Instant::now());
    page.apply(Loaded::Servers(Ok(vec![server("srv_1", "Web"), server("srv_2", "Db")])));
    page.handle_key(key(KeyCode::Down));
    page.handle_key(key(KeyCode::Char('d')));
    assert_eq!(page.confirm_delete.as_deref(), Some("srv_2"));
    // Anything but y cancels
    assert_eq!(page.handle_key(key(KeyCode::Char('n'))), Action::None);
    assert!(page.confirm_delete.is_none());

    page.handle_key(key(KeyCode::Char('d')));
    assert_eq!(
        page.handle_key(key(KeyCode::Char('y'))),
        Action::Fetch(Fetch::DeleteServer("srv_2".into()))
    );
    page.apply(Loaded::ServerDeleted("srv_2".into(), Ok(smartops::types::DeleteResponse { success: true })));
    assert_eq!(page.servers.len(), 1);
    assert_eq!(page.selected, 0);
}

#[test]
fn servers_failed_delete_leaves_notice() {
    let mut page = ServersPage::new(Duration::from_secs(30), Instant::now());
    page.apply(Loaded::Servers(Ok(vec![server("srv_1", "Web")])));
    page.apply(Loaded::ServerDeleted(
        "srv_1".into(),
        Err(ApiError::ServerNotFound("srv_1".into())),
    ));
    assert_eq!(page.servers.len(), 1);
    assert_eq!(page.notice.as_deref(), Some("Failed to delete server"));
}

#[test]
fn servers_enter_opens_details() {
    let mut page = ServersPage::new(Duration::from_secs(30), Instant::now());
    page.apply(Loaded::Servers(Ok(vec![server("srv_1", "Web")])));
    assert_eq!(
        page.handle_key(key(KeyCode::Enter)),
        Action::Navigate(Route::ServerDetails("srv_1".into()))
    );
}

#[tokio::test]
async fn anomalies_filter_and_export() {
    let svc = MockService::instant();
    let mut page = AnomaliesPage::default();
    page.apply(Loaded::Anomalies(svc.get_anomalies(None).await));
    assert_eq!(page.filtered.len(), 3);

    page.handle_key(key(KeyCode::Char('s')));
    assert_eq!(page.filter.severity, SeverityFilter::Only(Severity::Critical));
    assert_eq!(page.filtered.len(), 1);

    page.handle_key(key(KeyCode::Char('c')));
    assert_eq!(page.filtered.len(), 3);

    page.handle_key(key(KeyCode::Char('/')));
    assert!(Page::Anomalies(AnomaliesPage {
        editing_search: true,
        ..AnomaliesPage::default()
    })
    .captures_text());
    for k in chars("NETWORK") {
        page.handle_key(k);
    }
    page.handle_key(key(KeyCode::Enter));
    assert!(!page.editing_search);
    assert_eq!(page.filtered.len(), 1);
    assert_eq!(page.filtered[0].id, "anom_3");

    let action = page.handle_key(key(KeyCode::Char('e')));
    assert_eq!(action, Action::Export(page.filtered.clone()));
}

#[test]
fn predictions_select_first_and_refetch_on_change() {
    let mut page = PredictionsPage::new();
    assert!(page.loading);
    let follow = page.apply(Loaded::PredictionServers(Ok(vec![
        server("srv_1", "Web"),
        server("srv_2", "Db"),
    ])));
    assert_eq!(follow, vec![Fetch::Prediction("srv_1".into())]);
    assert_eq!(page.selected, Some(0));

    assert_eq!(
        page.handle_key(key(KeyCode::Right)),
        Action::Fetch(Fetch::Prediction("srv_2".into()))
    );
    // Already at the end
    assert_eq!(page.handle_key(key(KeyCode::Right)), Action::None);
    assert_eq!(page.selected_server().map(|s| s.id.as_str()), Some("srv_2"));
}

#[test]
fn predictions_with_no_servers_fetch_nothing() {
    let mut page = PredictionsPage::new();
    assert!(page.apply(Loaded::PredictionServers(Ok(vec![]))).is_empty());
    assert_eq!(page.selected, None);
    assert_eq!(page.handle_key(key(KeyCode::Right)), Action::None);
}

#[tokio::test]
async fn predictions_build_bands() {
    let svc = MockService::instant();
    let mut page = PredictionsPage::new();
    page.apply(Loaded::Prediction(svc.get_predictions("srv_1").await));
    assert_eq!(page.bands.len(), 30);
    assert_eq!(page.bands.predicted[0], (0.0, 45.0));
    assert_eq!(page.bands.lower[0], (0.0, 35.0));
    assert_eq!(page.bands.upper[0], (0.0, 55.0));
}
