//! App state and main loop: input handling, routing, background fetches, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::DataService;
use crate::auth::AuthContext;
use crate::config::Config;
use crate::export::write_anomalies_csv;
use crate::forms::Registration;
use crate::pages::{run_fetch, Action, Fetch, Loaded, Page, Route};
use crate::storage::LocalStorage;
use crate::ui;

/// Login or registration waiting to run once the "submitting" frame is drawn.
enum PendingAuth {
    Login { email: String, password: String },
    Register(Registration),
}

pub struct App<S> {
    service: S,
    auth: AuthContext<S>,
    config: Config,
    page: Page,

    // Fetch results from spawned tasks
    tx: UnboundedSender<Loaded>,
    rx: UnboundedReceiver<Loaded>,

    pending_auth: Option<PendingAuth>,
    should_quit: bool,
}

impl<S: DataService> App<S> {
    pub fn new(service: S, storage: LocalStorage, config: Config) -> Self {
        let (tx, rx) = unbounded_channel();
        let (page, _) = Page::mount(&Route::Login, &config, Instant::now());
        Self {
            auth: AuthContext::new(service.clone(), storage),
            service,
            config,
            page,
            tx,
            rx,
            pending_auth: None,
            should_quit: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn auth(&self) -> &AuthContext<S> {
        &self.auth
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        terminal.draw(ui::draw_loading)?;
        self.start().await;

        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if k.kind == KeyEventKind::Press {
                        self.handle_key(k);
                    }
                }
            }
            if self.should_quit {
                break;
            }

            self.drain(Instant::now());

            // Draw
            terminal.draw(|f| ui::draw(f, &self.page, self.auth.user()))?;

            // Runs after the draw so the form shows its submitting state
            self.settle_auth().await;

            sleep(Duration::from_millis(50)).await;
        }

        Ok(())
    }

    /// Restore the session and mount the first page.
    pub async fn start(&mut self) {
        self.auth.init().await;
        if self.auth.is_authenticated() {
            self.navigate(Route::Dashboard);
        } else {
            self.navigate(Route::Login);
        }
    }

    /// Global keys first, then the mounted page.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if !self.page.captures_text() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('L') if self.auth.is_authenticated() => {
                    self.logout();
                    return;
                }
                KeyCode::Char(c @ '1'..='4') if self.auth.is_authenticated() => {
                    let route = match c {
                        '1' => Route::Dashboard,
                        '2' => Route::Servers,
                        '3' => Route::Anomalies,
                        _ => Route::Predictions,
                    };
                    self.navigate(route);
                    return;
                }
                _ => {}
            }
        }
        let action = self.page.handle_key(key);
        self.perform(action);
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(route) => self.navigate(route),
            Action::Fetch(fetch) => self.spawn_fetch(fetch),
            Action::Login { email, password } => {
                self.pending_auth = Some(PendingAuth::Login { email, password });
            }
            Action::Register(reg) => self.pending_auth = Some(PendingAuth::Register(reg)),
            Action::Export(rows) => self.export(&rows),
        }
    }

    /// Protected routes bounce to the login page without a session. The
    /// previous page's state, pollers included, is dropped.
    pub fn navigate(&mut self, route: Route) {
        let route = if !route.is_public() && !self.auth.is_authenticated() {
            Route::Login
        } else {
            route
        };
        debug!(route = ?route, "navigate");
        let (page, fetches) = Page::mount(&route, &self.config, Instant::now());
        self.page = page;
        for f in fetches {
            self.spawn_fetch(f);
        }
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.navigate(Route::Login);
    }

    fn spawn_fetch(&self, fetch: Fetch) {
        let svc = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let loaded = run_fetch(&svc, fetch).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(loaded);
        });
    }

    /// Apply every result that has arrived, then fire due refreshes.
    pub fn drain(&mut self, now: Instant) {
        while let Ok(loaded) = self.rx.try_recv() {
            self.apply(loaded);
        }
        for f in self.page.tick(now) {
            self.spawn_fetch(f);
        }
    }

    /// Wait for the next fetch result and apply it.
    pub async fn apply_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(loaded) => {
                self.apply(loaded);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, loaded: Loaded) {
        for f in self.page.apply(loaded) {
            self.spawn_fetch(f);
        }
    }

    pub async fn settle_auth(&mut self) {
        let Some(req) = self.pending_auth.take() else {
            return;
        };
        let res = match req {
            PendingAuth::Login { email, password } => self.auth.login(&email, &password).await,
            PendingAuth::Register(reg) => {
                self.auth
                    .register(&reg.email, &reg.password, &reg.name)
                    .await
            }
        };
        match res {
            Ok(_) => self.navigate(Route::Dashboard),
            Err(e) => self.page.auth_failed(e.to_string()),
        }
    }

    fn export(&mut self, rows: &[crate::types::Anomaly]) {
        let dir = self.config.export_dir();
        match write_anomalies_csv(&dir, rows, Utc::now()) {
            Ok(path) => {
                info!(path = %path.display(), "csv export");
                self.page
                    .set_notice(format!("Exported {} rows to {}", rows.len(), path.display()));
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "csv export failed");
                self.page.set_notice(format!("Export failed: {e}"));
            }
        }
    }
}
