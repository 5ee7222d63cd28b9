mod alarm;
mod calculator;
mod config;
mod console;
mod dashboard;
mod display;
mod model;
mod normalizer;
mod provider;
mod utils;

use calculator::CalculatorState;
use config::{load_config, AppConfig};
use console::{apply_command, parse_command, spawn_listener, CommandOutcome};
use dashboard::Dashboard;
use display::{ConsoleDisplay, DisplaySurface};
use model::LoadError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How a command session ended.
enum SessionEnd {
    Reload,
    Quit,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    // Load configuration from file
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let provider = match provider::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to initialize rate provider: {}", e);
            return;
        }
    };
    let timeout = config.fetch_timeout_seconds.map(Duration::from_secs);

    // Ctrl-C abandons any in-flight load and ends the session
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested.");
                shutdown.notify_one();
            }
        });
    }

    let (tx, mut rx) = mpsc::channel::<String>(16);
    spawn_listener(tx);

    let display = ConsoleDisplay::new();
    let mut dashboard = Dashboard::new(CalculatorState::with_period(config.default_period_years));
    info!("🚀 Rate dashboard started ({:?} provider)", config.provider);
    display.render(&dashboard.view());

    loop {
        match dashboard
            .load_with(&*provider, timeout, Some(&*shutdown))
            .await
        {
            Err(LoadError::Cancelled) => break,
            Err(e) => warn!("Load finished with error: {}", e),
            Ok(()) => {}
        }
        display.render(&dashboard.view());

        match run_session(&mut dashboard, &display, &mut rx, &shutdown).await {
            SessionEnd::Reload => info!("Manual reload triggered."),
            SessionEnd::Quit => break,
        }
    }
    // The stdin thread is detached and does not hold the runtime open.
    info!("Bye.");
}

/// Handles commands until a reload is requested or the session ends.
async fn run_session(
    dashboard: &mut Dashboard,
    display: &ConsoleDisplay,
    rx: &mut mpsc::Receiver<String>,
    shutdown: &Notify,
) -> SessionEnd {
    loop {
        let line = tokio::select! {
            line = rx.recv() => line,
            _ = shutdown.notified() => return SessionEnd::Quit,
        };
        let Some(line) = line else {
            info!("Input closed.");
            return SessionEnd::Quit;
        };

        match apply_command(dashboard, parse_command(&line)) {
            CommandOutcome::Render => display.render(&dashboard.view()),
            CommandOutcome::Message(text) => println!("{}", text),
            CommandOutcome::Reload => return SessionEnd::Reload,
            CommandOutcome::Quit => return SessionEnd::Quit,
        }
    }
}
