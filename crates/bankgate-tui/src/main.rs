//! bankgate - a terminal host for the bank service's login and index pages.
//!
//! Each navigation is a page load: the page's gate checks the stored session
//! token with the remote authority and either keeps the page or redirects.

mod app;
#[cfg(test)]
mod testing;
mod ui;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context as _, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bankgate_core::{
    Config, Credentials, Page, PageLoad, Routes, SubmitOutcome, LOGIN_FAILED_MESSAGE,
};

use app::{App, Context};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the cache directory
const LOG_FILE_PREFIX: &str = "bankgate.log";

/// Outcome of a one-shot command, turned into the process exit code once
/// `main` has returned and the log writer has flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliStatus {
    Success,
    Failure,
}

impl From<CliStatus> for ExitCode {
    fn from(status: CliStatus) -> Self {
        match status {
            CliStatus::Success => ExitCode::SUCCESS,
            CliStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a daily file in the cache
/// directory. The returned guard flushes it on drop.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config.cache_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = match Config::load_or_init() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let _log_guard = init_tracing(&config);
    info!(base_url = %config.base_url, "bankgate starting");

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--check-session" {
        let context = app::build_context(&config)?;
        return Ok(check_session(&context).await.into());
    }
    if args.len() > 1 && args[1] == "--login" {
        let context = app::build_context(&config)?;
        return Ok(login_prompt(&context).await?.into());
    }

    let start = args
        .get(1)
        .map(|path| Routes::from_config(&config).resolve(path))
        .unwrap_or(Page::Index);

    let mut app = App::new(config, start)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("bankgate shutting down");
    Ok(ExitCode::SUCCESS)
}

/// Run the index gate once and report whether the stored token is accepted
async fn check_session(context: &Context) -> CliStatus {
    match context.index_page().on_ready().await {
        PageLoad::Ready(()) => {
            println!("Session valid.");
            CliStatus::Success
        }
        PageLoad::Redirect(_) => {
            println!("Not logged in.");
            CliStatus::Failure
        }
    }
}

/// Login page without the TUI: prompt for credentials and submit once
async fn login_prompt(context: &Context) -> Result<CliStatus> {
    let mut form = match context.login_page().on_ready().await {
        PageLoad::Redirect(_) => {
            println!("Already logged in.");
            return Ok(CliStatus::Success);
        }
        PageLoad::Ready(form) => form,
    };

    print!("Account: ");
    io::stdout().flush()?;
    let mut account = String::new();
    io::stdin()
        .read_line(&mut account)
        .context("Failed to read account")?;
    let password = rpassword::prompt_password("Password: ")?;

    match form.submit(Credentials::new(account.trim(), password)).await {
        SubmitOutcome::Redirect(_) => {
            println!("Login successful.");
            Ok(CliStatus::Success)
        }
        SubmitOutcome::Failed => {
            warn!("Interactive login failed");
            eprintln!("{}", form.message().unwrap_or(LOGIN_FAILED_MESSAGE));
            Ok(CliStatus::Failure)
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // A pending page load runs its gate before anything else
        if app.pending_load().is_some() {
            app.load_pending().await;
            terminal.draw(|f| render(f, app))?;
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if app.quitting {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        can_bind_localhost, config_for, context_for, mock_authority, unreachable_base_url,
        LIVE_TOKEN,
    };
    use bankgate_core::TokenStore;

    #[tokio::test]
    async fn test_check_session_unreachable_returns_failure() {
        let config = config_for(&unreachable_base_url());
        let context = context_for(&config, "cli-unreachable");
        assert_eq!(check_session(&context).await, CliStatus::Failure);
    }

    #[tokio::test]
    async fn test_check_session_statuses() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let config = config_for(&server.uri());
        let context = context_for(&config, "cli-statuses");

        assert_eq!(check_session(&context).await, CliStatus::Failure);
        context.store().set("token", LIVE_TOKEN);
        assert_eq!(check_session(&context).await, CliStatus::Success);
    }

    #[tokio::test]
    async fn test_login_prompt_with_session_skips_prompt() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let config = config_for(&server.uri());
        let context = context_for(&config, "cli-login-redirect");
        context.store().set("token", LIVE_TOKEN);

        assert_eq!(login_prompt(&context).await.ok(), Some(CliStatus::Success));
    }

    #[test]
    fn test_cli_status_exit_codes() {
        assert_eq!(
            format!("{:?}", ExitCode::from(CliStatus::Success)),
            format!("{:?}", ExitCode::SUCCESS)
        );
        assert_eq!(
            format!("{:?}", ExitCode::from(CliStatus::Failure)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }
}
