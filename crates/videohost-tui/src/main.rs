//! VideoHost Pro - terminal landing page with login and registration.
//!
//! Authentication is delegated to a hosted GoTrue-compatible provider; this
//! binary only renders the page and drives the auth view controller.

mod app;
mod config;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use videohost_core::{AuthConfig, AuthProvider, HostedAuthClient};

use app::{App, AppState};
use config::UiConfig;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name parts; files are named `videohost.<date>.log`
const LOG_FILE_PREFIX: &str = "videohost";
const LOG_FILE_SUFFIX: &str = "log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a daily-rolling file so they never draw over the TUI. The
/// returned guard must live until shutdown to flush buffered lines.
fn init_tracing(log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // An unwritable log directory must not keep the page from starting
    let file_appender = log_dir.and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .build(&dir)
            .map_err(|e| eprintln!("Logging disabled, cannot write to {}: {}", dir.display(), e))
            .ok()
    });

    let Some(file_appender) = file_appender else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::sink))
            .with(filter)
            .init();
        return None;
    };

    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let log_dir = UiConfig::log_dir().ok();
    let _guard = init_tracing(log_dir);
    info!("VideoHost Pro starting");

    // Fail before touching the terminal so the message stays readable
    let auth_config = AuthConfig::from_env().context("Auth provider is not configured")?;
    let provider = Arc::new(
        HostedAuthClient::new(auth_config).context("Failed to create auth client")?,
    );

    let ui_config = match UiConfig::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            UiConfig::default()
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(provider, ui_config);
    app.auth.init();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("VideoHost Pro shutting down");
    Ok(())
}

fn run_app<P>(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App<P>) -> Result<()>
where
    P: AuthProvider + 'static,
{
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Apply finished auth calls
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
