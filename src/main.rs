mod app;
mod config;
mod logging;
mod store;
mod ui;

use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::logging::AuditLogger;
use crate::store::{StoreState, UserStore};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    init_tracing(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Diagnostics go to a file so the alternate screen stays clean.
fn init_tracing(cfg: &config::model::LoggingConfig) -> Result<()> {
    let dir = logging::expand_home(&cfg.log_dir);
    std::fs::create_dir_all(&dir)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("userdeck.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // The store lives exactly as long as this function. Handles held by the
    // UI state fail with NotInitialized if they somehow outlive it.
    let store = UserStore::provision(StoreState::seed());
    let mut state = AppState::new(cfg.clone(), store.handle());
    let mut audit = AuditLogger::new(&cfg.logging);

    // Narrow subscriptions: rendering is driven by the slices the UI
    // actually shows, not by every snapshot.
    let handle = store.handle();
    let mut users_sub = handle.subscribe_slice(|s| s.users.clone())?;
    let mut current_sub = handle.subscribe_slice(|s| s.current_user.clone())?;
    let mut loading_sub = handle.subscribe_slice(|s| s.loading)?;
    let mut error_sub = handle.subscribe_slice(|s| s.error.clone())?;

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    let tick_rate = std::time::Duration::from_millis(cfg.ui.tick_rate_ms.max(10));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    info!(users = store.snapshot().users.len(), "userdeck started");

    // Initial render
    terminal.draw(|f| ui::render(f, &state, &store.snapshot()))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);
        for action in actions {
            audit.log_action(&action);
            if let Err(e) = state.store.dispatch(action) {
                state.status_message = Some(format!("store error: {}", e));
                state.dirty = true;
            }
        }

        if let Some(users) = users_sub.poll() {
            // Keep the roster selection inside the new list.
            state.selected = state.selected.min(users.len().saturating_sub(1));
            state.dirty = true;
        }
        if current_sub.poll().is_some()
            || loading_sub.poll().is_some()
            || error_sub.poll().is_some()
        {
            state.dirty = true;
        }

        if state.should_quit {
            info!("shutting down");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            let snap = store.snapshot();
            terminal.draw(|f| ui::render(f, &state, &snap))?;
            state.dirty = false;
        }
    }

    Ok(())
}
