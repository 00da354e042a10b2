//! Dashboard state: the mounted route, its poller, input modes and the
//! login form. Rendering reads this; key handling mutates it.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::{DashboardConfig, DataSourceMode};
use crate::logging::AlertPulse;
use crate::mock::MockDataService;
use crate::query::{
    MetricsPayload, MetricsSource, MockSource, Poller, QueryKey, QueryOptions, QueryState,
    RemoteSource, SharedQueryCache, read_cache, shared_cache, write_cache,
};
use crate::router::{Navigator, Route};
use crate::session::{AdminSession, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub pending: bool,
}

impl LoginForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a path to jump to, e.g. `/admin/economy`.
    PathPrompt(String),
}

type LoginResult = Result<AdminSession, ApiError>;

pub struct App {
    pub config: DashboardConfig,
    route: Route,
    navigator: Navigator,
    route_rx: watch::Receiver<Route>,
    cache: SharedQueryCache,
    source: Arc<dyn MetricsSource>,
    client: Option<ApiClient>,
    session: SessionStore,
    options: QueryOptions,
    poller: Option<Poller>,
    pub input: InputMode,
    pub login: LoginForm,
    login_rx: Option<oneshot::Receiver<LoginResult>>,
    pub status: Option<String>,
    pulse: AlertPulse,
    overview_version: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: DashboardConfig, session: SessionStore) -> anyhow::Result<Self> {
        let (navigator, route_rx) = Navigator::new(Route::Overview);

        let (source, client): (Arc<dyn MetricsSource>, Option<ApiClient>) = match config.data_source
        {
            DataSourceMode::Mock => (Arc::new(MockSource::new(MockDataService::new())), None),
            DataSourceMode::Remote => {
                let client = ApiClient::new(&config, session.clone(), navigator.clone())?;
                (Arc::new(RemoteSource::new(client.clone())), Some(client))
            }
        };

        let options = QueryOptions::with_interval(config.refresh_interval);
        let mut app = Self {
            config,
            route: Route::Overview,
            navigator,
            route_rx,
            cache: shared_cache(),
            source,
            client,
            session,
            options,
            poller: None,
            input: InputMode::Normal,
            login: LoginForm::default(),
            login_rx: None,
            status: None,
            pulse: AlertPulse::default(),
            overview_version: 0,
            should_quit: false,
        };
        app.mount(Route::Overview);
        Ok(app)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_remote(&self) -> bool {
        self.client.is_some()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn admin_session(&self) -> Option<AdminSession> {
        self.session.admin_session()
    }

    pub fn source_origin(&self, key: QueryKey) -> &'static str {
        self.source.origin(key)
    }

    pub fn query_state(&self, key: QueryKey) -> QueryState {
        read_cache(&self.cache).state(key)
    }

    /// State of the mounted page's query, if it has one.
    pub fn current_query(&self) -> Option<QueryState> {
        self.route.query_key().map(|key| self.query_state(key))
    }

    pub fn is_fetching(&self) -> bool {
        read_cache(&self.cache).is_fetching()
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    fn requires_login(&self, route: Route) -> bool {
        self.is_remote() && route.requires_session() && !self.session.is_authenticated()
    }

    /// Swaps the mounted page. Dropping the previous poller stops it.
    fn mount(&mut self, requested: Route) {
        let route = if self.requires_login(requested) {
            Route::Login
        } else {
            requested
        };
        if route != requested {
            info!(requested = requested.path(), "sign-in required");
        }

        self.poller = None;
        self.route = route;
        self.poller = route
            .query_key()
            .map(|key| Poller::spawn(key, self.cache.clone(), self.source.clone(), self.options));
        if route == Route::Login {
            self.login.pending = false;
        }
    }

    /// Housekeeping between frames.
    pub fn tick(&mut self) {
        self.sync_route();
        self.poll_login();
        self.pulse_alerts();
    }

    fn sync_route(&mut self) {
        if self.route_rx.has_changed().unwrap_or(false) {
            let requested = *self.route_rx.borrow_and_update();
            self.mount(requested);
        }
    }

    fn poll_login(&mut self) {
        let Some(rx) = self.login_rx.as_mut() else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(ApiError::Network("sign-in task ended unexpectedly".to_string()))
            }
        };
        self.login_rx = None;
        self.login.pending = false;

        match outcome {
            Ok(session) => {
                self.status = Some(format!("Signed in as {}", session.user.display_name()));
                self.login = LoginForm::default();
                self.navigate(Route::Overview);
            }
            Err(err) => {
                self.login.password.clear();
                self.login.error = Some(err.to_string());
            }
        }
    }

    fn pulse_alerts(&mut self) {
        let state = self.query_state(QueryKey::Overview);
        if state.version == self.overview_version {
            return;
        }
        self.overview_version = state.version;
        if let Some(MetricsPayload::Overview(overview)) = state.data.as_deref() {
            self.pulse.observe(overview);
        }
    }

    pub fn refetch(&self) {
        if let Some(poller) = &self.poller {
            poller.refetch();
        }
    }

    pub fn logout(&mut self) {
        let cleared = match &self.client {
            Some(client) => client.sign_out(),
            None => self
                .session
                .clear()
                .map_err(ApiError::from)
                .inspect(|_| info!("signed out")),
        };
        if let Err(err) = cleared {
            warn!(error = %err, "failed to clear session");
        }
        write_cache(&self.cache).clear();
        self.overview_version = 0;
        self.status = Some("Signed out".to_string());
        if self.is_remote() {
            self.navigate(Route::Login);
        }
    }

    fn submit_login(&mut self) {
        let Some(client) = self.client.clone() else {
            self.login.error = Some("Mock mode does not need a sign-in".to_string());
            return;
        };
        if self.login.username.is_empty() || self.login.password.is_empty() {
            self.login.error = Some("Username and password are required".to_string());
            return;
        }
        let (tx, rx) = oneshot::channel();
        let username = self.login.username.clone();
        let password = self.login.password.clone();
        tokio::spawn(async move {
            let outcome = client.sign_in(&username, &password).await;
            let _ = tx.send(outcome);
        });
        self.login_rx = Some(rx);
        self.login.pending = true;
        self.login.error = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let InputMode::PathPrompt(buffer) = &mut self.input {
            match key.code {
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter => {
                    let path = std::mem::take(buffer);
                    self.input = InputMode::Normal;
                    let route = self.navigator.navigate_path(&path);
                    self.status = Some(format!("{} → {}", path, route.path()));
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
            return;
        }

        if self.route == Route::Login && self.is_remote() {
            self.handle_login_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.navigate(self.route.next()),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.navigate(self.route.prev())
            }
            KeyCode::Char(':') | KeyCode::Char('/') => {
                self.input = InputMode::PathPrompt(String::from("/"));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.refetch(),
            KeyCode::Char('L') => self.logout(),
            KeyCode::Char('i') if self.is_remote() => self.navigate(Route::Login),
            KeyCode::Esc => self.status = None,
            KeyCode::Char(c) => {
                if let Some(route) = Route::from_hotkey(c) {
                    self.navigate(route);
                }
            }
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login.pending {
            return;
        }
        match key.code {
            KeyCode::Esc => self.login = LoginForm::default(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Enter => match self.login.focus {
                LoginField::Username => self.login.focus = LoginField::Password,
                LoginField::Password => self.submit_login(),
            },
            KeyCode::Backspace => {
                self.login.field_mut().pop();
            }
            KeyCode::Char(c) => self.login.field_mut().push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserProfile;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn remote_config() -> DashboardConfig {
        DashboardConfig {
            data_source: DataSourceMode::Remote,
            base_url: "http://127.0.0.1:9".to_string(),
            ..DashboardConfig::default()
        }
    }

    #[tokio::test]
    async fn mock_mode_starts_on_overview_with_a_poller() {
        let app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        assert_eq!(app.route(), Route::Overview);
        assert_eq!(app.poller.as_ref().map(Poller::key), Some(QueryKey::Overview));
    }

    #[tokio::test]
    async fn hotkeys_and_tabs_swap_the_mounted_page() {
        let mut app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        app.handle_key(key(KeyCode::Char('5')));
        app.tick();
        assert_eq!(app.route(), Route::Economy);
        assert_eq!(app.poller.as_ref().map(Poller::key), Some(QueryKey::EconomicMetrics));

        app.handle_key(key(KeyCode::Char('0')));
        app.tick();
        assert_eq!(app.route(), Route::Settings);
        assert!(app.poller.is_none());

        app.handle_key(key(KeyCode::Tab));
        app.tick();
        assert_eq!(app.route(), Route::Overview);
    }

    #[tokio::test]
    async fn path_prompt_resolves_unknown_paths_to_overview() {
        let mut app = App::new(DashboardConfig::default(), SessionStore::in_memory()).unwrap();
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "admin/cities");
        app.handle_key(key(KeyCode::Enter));
        app.tick();
        assert_eq!(app.route(), Route::Cities);

        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "definitely/not/here");
        app.handle_key(key(KeyCode::Enter));
        app.tick();
        assert_eq!(app.route(), Route::Overview);
    }

    #[tokio::test]
    async fn remote_mode_without_session_lands_on_login() {
        let mut app = App::new(remote_config(), SessionStore::in_memory()).unwrap();
        assert_eq!(app.route(), Route::Login);
        assert!(app.poller.is_none());

        app.navigate(Route::Battles);
        app.tick();
        assert_eq!(app.route(), Route::Login);
    }

    #[tokio::test]
    async fn remote_mode_with_admin_session_mounts_pages() {
        let session = SessionStore::in_memory();
        let admin = UserProfile {
            id: Some(1),
            username: "admin".to_string(),
            email: None,
            full_name: None,
            role: "admin".to_string(),
            is_active: true,
        };
        session.store_login("tok", &admin).unwrap();
        let mut app = App::new(remote_config(), session).unwrap();
        assert_eq!(app.route(), Route::Overview);

        app.handle_key(key(KeyCode::Char('L')));
        app.tick();
        assert_eq!(app.route(), Route::Login);
        assert!(!app.session().is_authenticated());
    }

    #[tokio::test]
    async fn login_form_types_into_focused_field() {
        let mut app = App::new(remote_config(), SessionStore::in_memory()).unwrap();
        type_text(&mut app, "admin");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "q1");
        assert_eq!(app.login.username, "admin");
        assert_eq!(app.login.password, "q1");
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn empty_login_is_refused_locally() {
        let mut app = App::new(remote_config(), SessionStore::in_memory()).unwrap();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.login.pending);
        assert!(app.login.error.is_some());
    }
}
