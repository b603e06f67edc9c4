//! App routing without a terminal: session start, auth guard, global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smartops::api::MockService;
use smartops::app::App;
use smartops::config::Config;
use smartops::pages::{Page, Route};
use smartops::storage::{LocalStorage, TOKEN_KEY};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App<MockService>, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn new_app(storage: LocalStorage) -> App<MockService> {
    App::new(MockService::instant(), storage, Config::default())
}

#[tokio::test]
async fn signed_out_start_lands_on_login() {
    let mut app = new_app(LocalStorage::in_memory());
    app.start().await;
    assert_eq!(app.page().route(), Route::Login);

    // Protected routes bounce back
    app.navigate(Route::Servers);
    assert_eq!(app.page().route(), Route::Login);

    // Page keys are typed into the form, not treated as navigation
    type_text(&mut app, "2q");
    assert_eq!(app.page().route(), Route::Login);
    assert!(!app.should_quit());
}

#[tokio::test]
async fn login_then_dashboard_then_logout() {
    let mut app = new_app(LocalStorage::in_memory());
    app.start().await;
    type_text(&mut app, "ops@example.com");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "pw");
    app.handle_key(key(KeyCode::Enter));
    app.settle_auth().await;
    assert_eq!(app.page().route(), Route::Dashboard);
    assert!(app.auth().is_authenticated());

    assert!(app.apply_next().await);
    let Page::Dashboard(d) = app.page() else {
        panic!("dashboard not mounted");
    };
    assert!(!d.loading);

    app.handle_key(key(KeyCode::Char('3')));
    assert_eq!(app.page().route(), Route::Anomalies);

    app.handle_key(key(KeyCode::Char('L')));
    assert_eq!(app.page().route(), Route::Login);
    assert!(app.auth().token().is_none());
}

#[tokio::test]
async fn empty_password_shows_login_failed() {
    let mut app = new_app(LocalStorage::in_memory());
    app.start().await;
    type_text(&mut app, "ops@example.com");
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Enter));
    app.settle_auth().await;
    let Page::Login(p) = app.page() else {
        panic!("login not mounted");
    };
    assert_eq!(p.error.as_deref(), Some("Login failed"));
    assert!(!p.submitting);
}

#[tokio::test]
async fn stored_token_starts_on_dashboard() {
    let mut storage = LocalStorage::in_memory();
    storage.set_item(TOKEN_KEY, "mock_jwt_token_1").unwrap();
    let mut app = new_app(storage);
    app.start().await;
    assert_eq!(app.page().route(), Route::Dashboard);

    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());
}

#[tokio::test]
async fn ctrl_c_quits_from_text_input() {
    let mut app = new_app(LocalStorage::in_memory());
    app.start().await;
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}
