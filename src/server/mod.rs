//! Stand-in for the metrics backend: the `/api/v1` surface served from the
//! mock generator, with an in-memory user registry and bearer tokens.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::auth::{
    LoginForm, MessageResponse, PasswordChange, RegisterRequest, TokenResponse, UserUpdate,
};
use crate::mock::MockDataService;
use crate::session::UserProfile;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "titan-admin";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[derive(Debug, Clone)]
struct Account {
    profile: UserProfile,
    password: String,
}

pub struct MockApi {
    accounts: RwLock<HashMap<String, Account>>,
    tokens: RwLock<HashMap<String, String>>,
    next_id: AtomicU64,
    data: MockDataService,
}

pub type SharedApi = Arc<MockApi>;

impl MockApi {
    /// A registry holding a single admin account.
    pub fn new(admin_password: &str, data: MockDataService) -> Self {
        let api = Self {
            accounts: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            data,
        };
        api.insert_account(
            DEFAULT_ADMIN_USERNAME,
            Some("admin@titan.local".to_string()),
            Some("Titan Administrator".to_string()),
            "admin",
            admin_password,
        );
        api
    }

    fn insert_account(
        &self,
        username: &str,
        email: Option<String>,
        full_name: Option<String>,
        role: &str,
        password: &str,
    ) -> UserProfile {
        let profile = UserProfile {
            id: Some(self.next_id.fetch_add(1, Ordering::Relaxed)),
            username: username.to_string(),
            email,
            full_name,
            role: role.to_string(),
            is_active: true,
        };
        let mut accounts = self.accounts.write().unwrap_or_else(|p| p.into_inner());
        accounts.insert(
            username.to_string(),
            Account {
                profile: profile.clone(),
                password: password.to_string(),
            },
        );
        profile
    }

    fn issue_token(&self, username: &str) -> String {
        let token = format!("{:032x}", rand::random::<u128>());
        let mut tokens = self.tokens.write().unwrap_or_else(|p| p.into_inner());
        tokens.insert(token.clone(), username.to_string());
        token
    }

    fn account_for_token(&self, token: &str) -> Option<Account> {
        let tokens = self.tokens.read().unwrap_or_else(|p| p.into_inner());
        let username = tokens.get(token)?;
        let accounts = self.accounts.read().unwrap_or_else(|p| p.into_inner());
        accounts.get(username).cloned()
    }
}

/// A request carrying a bearer token the registry knows.
struct Authenticated(Account);

#[async_trait]
impl FromRequestParts<SharedApi> for Authenticated {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedApi) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ServerError::Unauthorized("Not authenticated"))?;

        state
            .account_for_token(token)
            .map(Authenticated)
            .ok_or(ServerError::Unauthorized("Could not validate credentials"))
    }
}

pub fn router(state: SharedApi) -> Router {
    let auth = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me))
        .route("/change-password", post(change_password));

    let metrics = Router::new()
        .route("/overview", get(overview))
        .route("/world", get(world))
        .route("/players", get(players))
        .route("/server", get(server))
        .route("/battles", get(battles));

    let game = Router::new()
        .route("/sessions", get(game_sessions))
        .route("/events", get(game_events))
        .route("/battles", get(game_battles));

    let api = Router::new()
        .nest("/auth", auth)
        .nest("/metrics", metrics)
        .nest("/game", game);

    Router::new().nest("/api/v1", api).with_state(state)
}

/// Serves until ctrl-c.
pub async fn run(port: u16, state: SharedApi) -> anyhow::Result<()> {
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    info!(addr = %listener.local_addr()?, "mock api listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    info!("mock api shut down");
    Ok(())
}

async fn register(
    State(api): State<SharedApi>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ServerError> {
    if request.username.trim().is_empty() || request.password.len() < 8 {
        return Err(ServerError::BadRequest(
            "Username required and password must be at least 8 characters".to_string(),
        ));
    }
    let taken = {
        let accounts = api.accounts.read().unwrap_or_else(|p| p.into_inner());
        accounts.contains_key(&request.username)
            || accounts
                .values()
                .any(|a| a.profile.email.as_deref() == Some(request.email.as_str()))
    };
    if taken {
        return Err(ServerError::BadRequest(
            "Username or email already registered".to_string(),
        ));
    }
    let profile = api.insert_account(
        &request.username,
        Some(request.email),
        request.full_name,
        "player",
        &request.password,
    );
    info!(username = %profile.username, "registered user");
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(api): State<SharedApi>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ServerError> {
    let valid = {
        let accounts = api.accounts.read().unwrap_or_else(|p| p.into_inner());
        accounts
            .get(&form.username)
            .is_some_and(|a| a.password == form.password && a.profile.is_active)
    };
    if !valid {
        warn!(username = %form.username, "rejected login");
        return Err(ServerError::Unauthorized("Incorrect username or password"));
    }
    Ok(Json(TokenResponse {
        access_token: api.issue_token(&form.username),
        token_type: "bearer".to_string(),
    }))
}

async fn me(Authenticated(account): Authenticated) -> Json<UserProfile> {
    Json(account.profile)
}

async fn update_me(
    State(api): State<SharedApi>,
    Authenticated(account): Authenticated,
    Json(update): Json<UserUpdate>,
) -> Json<UserProfile> {
    let mut accounts = api.accounts.write().unwrap_or_else(|p| p.into_inner());
    let profile = match accounts.get_mut(&account.profile.username) {
        Some(stored) => {
            if update.email.is_some() {
                stored.profile.email = update.email;
            }
            if update.full_name.is_some() {
                stored.profile.full_name = update.full_name;
            }
            stored.profile.clone()
        }
        None => account.profile,
    };
    Json(profile)
}

async fn change_password(
    State(api): State<SharedApi>,
    Authenticated(account): Authenticated,
    Json(change): Json<PasswordChange>,
) -> Result<Json<MessageResponse>, ServerError> {
    if change.current_password != account.password {
        return Err(ServerError::BadRequest("Incorrect password".to_string()));
    }
    let mut accounts = api.accounts.write().unwrap_or_else(|p| p.into_inner());
    if let Some(stored) = accounts.get_mut(&account.profile.username) {
        stored.password = change.new_password;
    }
    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

type Payload = Result<Json<Value>, ServerError>;

fn payload<T: Serialize>(value: T) -> Payload {
    let value = serde_json::to_value(value).inspect_err(|err| {
        warn!(error = %err, "failed to encode payload");
    })?;
    Ok(Json(value))
}

async fn overview(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.overview())
}

async fn world(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.world_simulation())
}

async fn players(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.player_metrics())
}

async fn server(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.server_metrics())
}

async fn battles(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.battle_metrics())
}

async fn game_sessions(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.player_metrics().recent_sessions)
}

async fn game_events(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.world_simulation().recent_events)
}

async fn game_battles(State(api): State<SharedApi>, _: Authenticated) -> Payload {
    payload(api.data.battle_metrics().recent_battles)
}

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::task::JoinHandle;

    use super::*;

    /// Starts the mock API on an ephemeral port and returns its base URL.
    pub async fn start() -> (String, JoinHandle<()>) {
        let api = Arc::new(MockApi::new(DEFAULT_ADMIN_PASSWORD, MockDataService::with_seed(11)));
        serve(router(api)).await
    }

    /// Serves any router on an ephemeral port.
    pub async fn serve(app: Router) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("test listener binds");
        let addr = listener.local_addr().expect("bound address");
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!(error = %err, "test server stopped");
            }
        });
        (format!("http://{addr}"), handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn metrics_require_a_token() {
        let (base, handle) = test_support::start().await;
        let resp = reqwest::get(format!("{base}/api/v1/metrics/overview")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["detail"], "Not authenticated");
        handle.abort();
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let (base, handle) = test_support::start().await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/api/v1/game/events"))
            .bearer_auth("forged")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        handle.abort();
    }

    #[tokio::test]
    async fn form_login_issues_a_working_token() {
        let (base, handle) = test_support::start().await;
        let http = reqwest::Client::new();
        let token: TokenResponse = http
            .post(format!("{base}/api/v1/auth/login"))
            .form(&[("username", "admin"), ("password", DEFAULT_ADMIN_PASSWORD)])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");

        let resp = http
            .get(format!("{base}/api/v1/metrics/world"))
            .bearer_auth(&token.access_token)
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        handle.abort();
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (base, handle) = test_support::start().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/v1/auth/login"))
            .form(&[("username", "admin"), ("password", "nope")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        handle.abort();
    }

    #[test]
    fn unencodable_payload_is_a_server_error() {
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), "tuple keys cannot be JSON object keys");
        let response = payload(bad).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
