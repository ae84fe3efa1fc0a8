// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, boot animation ticks, finished dispatches)
// - Rendering the UI
//
// All session state lives on this single task. Command dispatches run
// in spawned tasks and report back over an mpsc channel, so each
// command's lines append as one batch in completion order and a slow
// server call never blocks the draw loop.

pub mod app;
pub mod scroll;
pub mod ui;

use crate::client::HttpGameClient;
use crate::command::Command;
use crate::config::Config;
use crate::dispatch::{dispatch, Dispatch};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans
/// up when done. Blocks until the user quits (Ctrl+C).
pub async fn run_tui(
    client: Arc<HttpGameClient>,
    config: Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config.server_url.clone(), log_buffer);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, client, &config).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Three event sources feed the loop via tokio::select!:
/// 1. Keyboard and mouse input
/// 2. The boot animation tick (one revealed character per tick)
/// 3. Finished dispatch batches from spawned command tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: Arc<HttpGameClient>,
    config: &Config,
) -> Result<()> {
    // Completed commands report back here; 64 in-flight batches is far
    // beyond anything a human can type
    let (batch_tx, mut batch_rx) = mpsc::channel::<Dispatch>(64);

    // One revealed character per tick
    let mut boot_tick =
        tokio::time::interval(Duration::from_millis(config.typing_delay_ms.max(1)));

    // Redraw cadence while idle (uptime clock, log strip)
    let mut redraw_tick = tokio::time::interval(Duration::from_millis(200));

    app.boot.start(&mut app.scrollback);

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => {
                            handle_key_event(app, key_event, &client, &batch_tx);
                        }
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Boot animation: reveal the next character (no-op once done)
            _ = boot_tick.tick() => {
                app.boot.tick(&mut app.scrollback);
            }

            // A command finished - append its lines as one batch
            Some(batch) = batch_rx.recv() => {
                app.apply_batch(batch);
            }

            // Periodic redraw
            _ = redraw_tick.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(
    app: &mut App,
    key_event: KeyEvent,
    client: &Arc<HttpGameClient>,
    batch_tx: &mpsc::Sender<Dispatch>,
) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits; 'q' and friends are gameplay text here
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key_event.code {
            app.should_quit = true;
        }
        return;
    }

    match key_event.code {
        KeyCode::F(2) => app.toggle_logs(),
        KeyCode::PageUp => app.scroll.page_up(),
        KeyCode::PageDown => app.scroll.page_down(),
        KeyCode::Home => app.scroll.scroll_to_top(),
        KeyCode::End => app.scroll.scroll_to_bottom(),
        KeyCode::Up => app.scroll.scroll_up(),
        KeyCode::Down => app.scroll.scroll_down(),
        KeyCode::Esc => app.scroll.scroll_to_bottom(),
        KeyCode::Enter => submit(app, client, batch_tx),
        KeyCode::Backspace => {
            if app.input_active() {
                app.input.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.input_active() {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

/// Submit the pending input: spawn the dispatch and clear the field.
///
/// Whitespace-only input is a strict no-op - nothing is spawned and
/// the field keeps its (blank) content, matching the dispatcher's own
/// contract. In-flight commands are never canceled; batches land in
/// completion order.
fn submit(app: &mut App, client: &Arc<HttpGameClient>, batch_tx: &mpsc::Sender<Dispatch>) {
    if !app.input_active() || Command::parse(&app.input).is_none() {
        return;
    }
    let Some(raw) = app.take_input() else {
        return;
    };

    app.in_flight += 1;
    let client = Arc::clone(client);
    let tx = batch_tx.clone();
    tokio::spawn(async move {
        if let Some(batch) = dispatch(&raw, client.as_ref()).await {
            // Receiver only drops on shutdown; nothing left to render then
            let _ = tx.send(batch).await;
        }
    });
}

/// Handle mouse input - wheel scrolls the transcript
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll.scroll_down(),
        _ => {}
    }
}
