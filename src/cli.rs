//! Command-line surface: config overrides plus the non-interactive
//! subcommands. The interactive dashboard lives in `main`.

use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::api::auth::{RegisterRequest, UserUpdate};
use crate::config::{APP_VERSION, DashboardConfig, DataSourceMode};
use crate::mock::MockDataService;
use crate::query::{MetricsSource, MockSource, RemoteSource};
use crate::router::{Navigator, Route};
use crate::server::DEFAULT_ADMIN_PASSWORD;
use crate::session::SessionStore;

#[derive(Debug, Parser)]
#[command(
    name = "titan-saga-admin",
    version = APP_VERSION,
    about = "Terminal dashboard for Titan Saga simulation metrics"
)]
pub struct Cli {
    /// Where metrics come from; overrides TITAN_DATA_SOURCE.
    #[arg(long, value_enum, global = true)]
    pub source: Option<DataSourceMode>,
    /// API base URL; overrides TITAN_API_BASE_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Poll interval in seconds; overrides TITAN_REFRESH_SECS.
    #[arg(long, global = true)]
    pub refresh_secs: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard (default).
    Dashboard,
    /// Serve the metrics API from the mock generator.
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Fixed RNG seed for reproducible payloads.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD)]
        admin_password: String,
    },
    /// Fetch one page's payload and print it as JSON.
    Snapshot {
        /// Route path such as /admin/cities, or just `cities`.
        route: String,
    },
    /// Sign in as an administrator and store the session.
    Login { username: String, password: String },
    /// Forget the stored session.
    Logout,
    /// Raw game data from the API.
    Game {
        #[arg(value_enum)]
        resource: GameResource,
    },
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameResource {
    Sessions,
    Events,
    Battles,
}

/// Account management against the auth endpoints.
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Show the signed-in profile.
    Whoami,
    Register {
        username: String,
        email: String,
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    ChangePassword { current: String, new: String },
}

impl Cli {
    pub fn resolve_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::from_env().context("reading TITAN_* environment")?;
        if let Some(source) = self.source {
            config.data_source = source;
        }
        if let Some(url) = &self.api_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.refresh_secs {
            if secs == 0 {
                bail!("--refresh-secs must be at least 1");
            }
            config.refresh_interval = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn client_for(config: &DashboardConfig) -> anyhow::Result<ApiClient> {
    let session = SessionStore::open(config.session_file.clone());
    let (navigator, _rx) = Navigator::new(Route::Overview);
    Ok(ApiClient::new(config, session, navigator)?)
}

fn signed_in_client(config: &DashboardConfig) -> anyhow::Result<ApiClient> {
    let client = client_for(config)?;
    if client.session().access_token().is_none() {
        bail!("no stored session; run `titan-saga-admin login <user> <password>` first");
    }
    Ok(client)
}

/// Accepts full paths or bare page names.
pub fn snapshot_route(arg: &str) -> Route {
    if arg.starts_with('/') {
        Route::resolve(arg)
    } else {
        Route::resolve(&format!("/admin/{arg}"))
    }
}

pub async fn run_snapshot(config: DashboardConfig, arg: &str) -> anyhow::Result<()> {
    let route = snapshot_route(arg);
    let Some(key) = route.query_key() else {
        bail!("{} has no metrics payload", route.path());
    };

    let source: Box<dyn MetricsSource> = match config.data_source {
        DataSourceMode::Mock => Box::new(MockSource::new(MockDataService::new())),
        DataSourceMode::Remote => {
            let client = signed_in_client(&config)?;
            if !client.session().is_authenticated() {
                bail!("stored session is not an administrator");
            }
            Box::new(RemoteSource::new(client))
        }
    };

    info!(key = key.as_str(), origin = source.origin(key), "snapshot");
    let payload = source
        .fetch(key)
        .await
        .with_context(|| format!("fetching {}", key.as_str()))?;
    print_json(&payload)
}

pub async fn run_login(config: DashboardConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let client = client_for(&config)?;
    let session = client.sign_in(username, password).await?;
    println!(
        "Signed in as {} ({})",
        session.user.display_name(),
        session.user.role
    );
    Ok(())
}

pub fn run_logout(config: DashboardConfig) -> anyhow::Result<()> {
    client_for(&config)?.sign_out()?;
    println!("Signed out");
    Ok(())
}

pub async fn run_game(config: DashboardConfig, resource: GameResource) -> anyhow::Result<()> {
    let client = signed_in_client(&config)?;
    let value = match resource {
        GameResource::Sessions => client.sessions().await?,
        GameResource::Events => client.events().await?,
        GameResource::Battles => client.battles().await?,
    };
    print_json(&value)
}

pub async fn run_account(config: DashboardConfig, command: AccountCommand) -> anyhow::Result<()> {
    match command {
        AccountCommand::Whoami => {
            let user = signed_in_client(&config)?.current_user().await?;
            print_json(&user)
        }
        AccountCommand::Register {
            username,
            email,
            password,
            full_name,
        } => {
            let user = client_for(&config)?
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                    full_name,
                })
                .await?;
            print_json(&user)
        }
        AccountCommand::Update { email, full_name } => {
            if email.is_none() && full_name.is_none() {
                bail!("nothing to update; pass --email and/or --full-name");
            }
            let client = signed_in_client(&config)?;
            let user = client.update_user(&UserUpdate { email, full_name }).await?;
            print_json(&user)
        }
        AccountCommand::ChangePassword { current, new } => {
            let reply = signed_in_client(&config)?
                .change_password(&current, &new)
                .await?;
            println!("{}", reply.message);
            Ok(())
        }
    }
}
