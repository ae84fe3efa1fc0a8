// Line classification - maps scrollback lines to display colors
//
// The mission server embeds status markers (emoji) in its narrative
// lines. Classification is a pure function over the line text and is
// re-evaluated on every render frame, never cached, so replayed or
// reformatted lines always pick up the right color.

use ratatui::style::Color;

/// Default foreground for unmarked lines (Dracula-ish off-white)
pub const DEFAULT_FG: Color = Color::Rgb(0xf8, 0xf8, 0xf2);

/// Prompt/input green, the classic phosphor look
pub const PROMPT_FG: Color = Color::Rgb(0x00, 0xff, 0x00);

/// Classify a rendered line by its status marker.
///
/// First match wins; matching is case-sensitive substring containment.
/// Total over all strings - anything without a known marker (including
/// the empty string) gets the default foreground.
pub fn classify(line: &str) -> Color {
    if line.contains("✅") {
        Color::Rgb(0x00, 0xff, 0x00) // success
    } else if line.contains("❌") {
        Color::Rgb(0xff, 0x55, 0x55) // error
    } else if line.contains("⚠️") {
        Color::Rgb(0xff, 0xff, 0x66) // warning
    } else if line.contains("💀") {
        Color::Rgb(0xff, 0x44, 0x44) // fatal
    } else if line.contains("🎉") || line.contains("🎯") {
        Color::Rgb(0x66, 0xd9, 0xef) // celebration / objective
    } else if line.contains("🔒") {
        Color::Rgb(0xff, 0xaa, 0x00) // locked
    } else if line.contains("🔁") {
        Color::Rgb(0xff, 0x00, 0xff) // AI mutation flicker
    } else {
        DEFAULT_FG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_colors() {
        assert_eq!(classify("✅ Exploit successful"), Color::Rgb(0x00, 0xff, 0x00));
        assert_eq!(classify("❌ Access Denied"), Color::Rgb(0xff, 0x55, 0x55));
        assert_eq!(classify("⚠️ Honeypot triggered!"), Color::Rgb(0xff, 0xff, 0x66));
        assert_eq!(classify("💀 You've been detected."), Color::Rgb(0xff, 0x44, 0x44));
        assert_eq!(classify("🎉 You captured the flag!"), Color::Rgb(0x66, 0xd9, 0xef));
        assert_eq!(classify("🎯 Final Score: 70"), Color::Rgb(0x66, 0xd9, 0xef));
        assert_eq!(classify("🔒 2 - Mainframe"), Color::Rgb(0xff, 0xaa, 0x00));
        assert_eq!(classify("🔁 AI deployed evolved honeypot"), Color::Rgb(0xff, 0x00, 0xff));
    }

    #[test]
    fn first_match_wins() {
        // Success marker appears before the warning marker in the policy table
        assert_eq!(classify("✅ done ⚠️ but noisy"), Color::Rgb(0x00, 0xff, 0x00));
    }

    #[test]
    fn unmarked_lines_get_default() {
        assert_eq!(classify("> hack firewall"), DEFAULT_FG);
        assert_eq!(classify(""), DEFAULT_FG);
        assert_eq!(classify("Booting Hacker Terminal v3.2..."), DEFAULT_FG);
    }

    #[test]
    fn pure_and_repeatable() {
        let line = "🧠 AI recognized and patched 'SQL Injection'";
        assert_eq!(classify(line), classify(line));
    }
}
