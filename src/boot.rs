// Boot sequencer - the typewriter intro animation
//
// An explicit state machine instead of interval callbacks: the TUI
// event loop owns a timer and calls `tick()` once per cadence, so the
// character-by-character ordering never depends on which scheduler
// primitive drives it. Runs exactly once per session.

use crate::scrollback::Scrollback;

/// The fixed boot transcript, typed out one character at a time
pub const BOOT_SEQUENCE: [&str; 5] = [
    "Booting Hacker Terminal v3.2...",
    "Establishing secure link...",
    "Initializing AI adversary...",
    "🧠 AI defense system active.",
    "Type your first command below to begin.",
];

/// Cursor marker shown at the end of the line being typed
const CURSOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Typing message `line`; `chars` characters already revealed
    Typing { line: usize, chars: usize },
    Done,
}

/// Drives the boot transcript through the scrollback
#[derive(Debug)]
pub struct BootSequencer {
    phase: Phase,
    started: bool,
}

impl BootSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            started: false,
        }
    }

    /// Begin the animation. Opens an empty line for the first message.
    /// Idempotent - a second call (e.g. a re-entered setup path) is a
    /// no-op, even after the sequence finished.
    pub fn start(&mut self, log: &mut Scrollback) {
        if self.started {
            return;
        }
        self.started = true;
        log.push(String::new());
        self.phase = Phase::Typing { line: 0, chars: 0 };
    }

    /// Reveal one more character. Call once per tick cadence.
    pub fn tick(&mut self, log: &mut Scrollback) {
        let Phase::Typing { line, chars } = self.phase else {
            return;
        };

        let message = BOOT_SEQUENCE[line];
        let total = message.chars().count();
        let revealed = chars + 1;
        // char-wise, not byte-wise - the transcript contains emoji
        let typed: String = message.chars().take(revealed).collect();

        if revealed < total {
            log.replace_last(format!("{typed}{CURSOR}"));
            self.phase = Phase::Typing {
                line,
                chars: revealed,
            };
        } else {
            // Line finished: strip the cursor and advance
            log.replace_last(message.to_string());
            if line + 1 < BOOT_SEQUENCE.len() {
                log.push(String::new());
                self.phase = Phase::Typing {
                    line: line + 1,
                    chars: 0,
                };
            } else {
                self.phase = Phase::Done;
            }
        }
    }

    /// True once the whole transcript has been typed. Gates the input
    /// surface.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Typing { .. })
    }
}

impl Default for BootSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(boot: &mut BootSequencer, log: &mut Scrollback) {
        // Generous upper bound; the machine must reach Done well within it
        for _ in 0..10_000 {
            if boot.is_done() {
                return;
            }
            boot.tick(log);
        }
        panic!("boot sequencer never finished");
    }

    #[test]
    fn full_run_matches_the_transcript() {
        let mut log = Scrollback::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut log);
        run_to_completion(&mut boot, &mut log);

        assert!(boot.is_done());
        assert_eq!(log.lines(), BOOT_SEQUENCE);
        assert!(log.lines().iter().all(|l| !l.ends_with('|')));
    }

    #[test]
    fn cursor_visible_while_typing() {
        let mut log = Scrollback::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut log);

        boot.tick(&mut log);
        assert_eq!(log.lines(), ["B|"]);
        boot.tick(&mut log);
        assert_eq!(log.lines(), ["Bo|"]);
    }

    #[test]
    fn start_is_idempotent() {
        let mut log = Scrollback::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut log);
        boot.start(&mut log);
        assert_eq!(log.len(), 1, "second start must not open another line");

        run_to_completion(&mut boot, &mut log);
        let after_first = log.lines().to_vec();

        // Restarting after completion changes nothing either
        boot.start(&mut log);
        boot.tick(&mut log);
        assert_eq!(log.lines(), after_first);
    }

    #[test]
    fn ticks_before_start_are_noops() {
        let mut log = Scrollback::new();
        let mut boot = BootSequencer::new();
        boot.tick(&mut log);
        assert!(log.is_empty());
        assert!(!boot.is_done());
    }

    #[test]
    fn emoji_line_is_typed_by_chars_not_bytes() {
        let mut log = Scrollback::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut log);
        run_to_completion(&mut boot, &mut log);
        assert_eq!(log.lines()[3], "🧠 AI defense system active.");
    }
}
