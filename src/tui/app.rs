// TUI application state
//
// One terminal session: the scrollback transcript, the boot sequencer,
// the pending prompt input and the advisory mission bookkeeping. All
// mutation happens on the event-loop task; spawned dispatches only
// talk back through the batch channel.

use super::scroll::ScrollState;
use crate::boot::BootSequencer;
use crate::dispatch::Dispatch;
use crate::logging::LogBuffer;
use crate::scrollback::Scrollback;
use std::time::Instant;

/// Main application state for the terminal session
pub struct App {
    /// The session transcript
    pub scrollback: Scrollback,

    /// Boot animation state machine
    pub boot: BootSequencer,

    /// Viewport scroll state for the transcript
    pub scroll: ScrollState,

    /// Pending prompt input (cleared on submit)
    pub input: String,

    /// Advisory mirror of the last successfully loaded mission.
    /// The server is the source of truth.
    pub current_level: usize,

    /// Number of dispatched commands still awaiting a server response
    pub in_flight: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether the system-logs strip is visible
    pub show_logs: bool,

    /// Log buffer for the system-logs strip
    pub log_buffer: LogBuffer,

    /// Mission server URL, shown in the status bar
    pub server_url: String,

    /// When the session started (for uptime display)
    pub start_time: Instant,
}

impl App {
    pub fn new(server_url: String, log_buffer: LogBuffer) -> Self {
        Self {
            scrollback: Scrollback::new(),
            boot: BootSequencer::new(),
            scroll: ScrollState::new(),
            input: String::new(),
            current_level: 0,
            in_flight: 0,
            should_quit: false,
            show_logs: false,
            log_buffer,
            server_url,
            start_time: Instant::now(),
        }
    }

    /// Whether the prompt accepts input (boot finished)
    pub fn input_active(&self) -> bool {
        self.boot.is_done()
    }

    /// Take the pending input for dispatch, clearing the field.
    /// Returns `None` while booting - keystrokes before readiness are
    /// already rejected, this is the belt to that suspender.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.input_active() {
            return None;
        }
        Some(std::mem::take(&mut self.input))
    }

    /// Append one finished command's output. The whole batch lands
    /// atomically, then the scroll policy runs as the post-append hook.
    pub fn apply_batch(&mut self, batch: Dispatch) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(level) = batch.new_level {
            self.current_level = level;
        }
        self.scroll.follow_if_near_bottom();
        self.scrollback.append_batch(batch.lines);
    }

    /// Toggle the system-logs strip
    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new("http://127.0.0.1:8000".to_string(), LogBuffer::new())
    }

    fn finish_boot(app: &mut App) {
        app.boot.start(&mut app.scrollback);
        while !app.boot.is_done() {
            app.boot.tick(&mut app.scrollback);
        }
    }

    #[test]
    fn input_is_gated_until_boot_completes() {
        let mut app = app();
        app.input.push_str("hack firewall");
        assert!(app.take_input().is_none());

        finish_boot(&mut app);
        assert_eq!(app.take_input().as_deref(), Some("hack firewall"));
        assert!(app.input.is_empty());
    }

    #[test]
    fn apply_batch_updates_level_and_transcript() {
        let mut app = app();
        app.in_flight = 1;
        app.apply_batch(Dispatch {
            lines: vec!["> load 2".into(), "🧠 ok".into()],
            new_level: Some(2),
        });
        assert_eq!(app.current_level, 2);
        assert_eq!(app.in_flight, 0);
        assert_eq!(app.scrollback.lines(), ["> load 2", "🧠 ok"]);
    }

    #[test]
    fn rejected_load_leaves_level_alone() {
        let mut app = app();
        app.apply_batch(Dispatch {
            lines: vec!["> load 5".into(), "⚠️ locked".into()],
            new_level: None,
        });
        assert_eq!(app.current_level, 0);
    }
}
