use std::io::{self, stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tracing::info;

mod api;
mod app;
mod cli;
mod config;
mod logging;
mod metrics;
mod mock;
mod query;
mod router;
mod server;
mod session;
mod ui;

use app::App;
use cli::{Cli, Command};
use config::DashboardConfig;
use mock::MockDataService;
use server::MockApi;
use session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let command = cli.command.unwrap_or(Command::Dashboard);
    if let Command::Serve { .. } = command {
        logging::init_stdout();
    } else {
        logging::init_file(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        config.log_summary();
    }

    match command {
        Command::Serve {
            port,
            seed,
            admin_password,
        } => {
            let data = seed.map(MockDataService::with_seed).unwrap_or_default();
            server::run(port, Arc::new(MockApi::new(&admin_password, data))).await
        }
        Command::Dashboard => run_dashboard(config).await,
        Command::Snapshot { route } => cli::run_snapshot(config, &route).await,
        Command::Login { username, password } => {
            cli::run_login(config, &username, &password).await
        }
        Command::Logout => cli::run_logout(config),
        Command::Game { resource } => cli::run_game(config, resource).await,
        Command::Account(account) => cli::run_account(config, account).await,
    }
}

async fn run_dashboard(config: DashboardConfig) -> anyhow::Result<()> {
    info!(
        source = config.data_source.label(),
        refresh_secs = config.refresh_interval.as_secs(),
        "dashboard starting"
    );

    let session = SessionStore::open(config.session_file.clone());
    let mut app = App::new(config, session)?;

    let ctrl_c_task = tokio::spawn(async {
        let _ = tokio::signal::ctrl_c().await;
    });

    // TUI Setup
    let mut terminal = init_terminal()?;
    let mut term_guard = TerminalGuard::new();
    panic::set_hook(Box::new(|info| {
        let _ = restore_terminal();
        eprintln!("panic: {info}");
    }));

    while !app.should_quit() {
        app.tick();
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if ctrl_c_task.is_finished() {
            break;
        }
    }

    // Shutdown
    drop(app);
    ctrl_c_task.abort();
    restore_terminal()?;
    term_guard.disarm();
    info!("dashboard stopped");

    Ok(())
}

fn init_terminal() -> io::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Ensures terminal is restored on panic/early-return.
struct TerminalGuard {
    armed: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = restore_terminal();
        }
    }
}
