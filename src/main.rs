// hackterm - Hacker terminal client for the AI-adversary hacking game
//
// A full-screen terminal client that boots with a typewriter animation,
// accepts free-text commands, and relays them to a remote mission
// server, rendering its narrative responses as colorized log lines.
//
// Architecture:
// - TUI (ratatui): boot animation, scrollback transcript, prompt
// - Dispatcher: parses commands and formats server responses
// - Client (reqwest): the three mission server calls
// - Logging: tracing captured to an in-memory buffer for display

mod boot;
mod classify;
mod cli;
mod client;
mod command;
mod config;
mod dispatch;
mod logging;
mod scrollback;
mod tui;

use anyhow::Result;
use client::{GameClient, HttpGameClient};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show, --reset, --path)
    // If one was handled, exit early
    let Some(args) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(server) = args.server {
        config.server_url = server;
    }

    // Logs go to an in-memory buffer - the TUI owns stdout - plus an
    // optional rotating JSON log file.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("hackterm={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program so
    // file logs flush
    let mut _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                _file_guard = Some(guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .boxed(),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    let client = Arc::new(HttpGameClient::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    )?);

    tracing::info!("Session starting against {}", client.base_url());

    // Kick the server into mission 0, fire-and-forget: the boot
    // animation runs regardless, and a dead server only surfaces once
    // the player issues a command
    {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            match client.start(0).await {
                Ok(res) => tracing::debug!("Initial mission armed: {}", res.message),
                Err(e) => tracing::warn!("Initial mission start failed: {e:#}"),
            }
        });
    }

    // Run the TUI in the main task; blocks until the user quits
    if let Err(e) = tui::run_tui(client, config, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Session closed");
    Ok(())
}
