// Command parsing - raw prompt input to a tagged command
//
// The dispatcher works off an explicit enum rather than ad-hoc prefix
// checks so the dispatch table is exhaustive and the parser can be
// tested without any I/O.

/// One parsed prompt submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "list" - fetch and print the mission roster
    List,
    /// "load <n>" - start mission n
    Load(usize),
    /// Anything else - sent verbatim to the server as a tool action
    Action(String),
}

impl Command {
    /// Parse raw input. Returns `None` for empty or whitespace-only
    /// input (submission is a no-op).
    ///
    /// Keywords are matched case-insensitively on the trimmed text. A
    /// "load" whose argument is not an integer deliberately falls
    /// through to `Action` - the server gets to reject it in-fiction.
    pub fn parse(raw: &str) -> Option<Command> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lower = trimmed.to_lowercase();
        if lower == "list" {
            return Some(Command::List);
        }

        if lower.starts_with("load ") {
            if let Some(index) = trimmed
                .split_whitespace()
                .nth(1)
                .and_then(|tok| tok.parse::<usize>().ok())
            {
                return Some(Command::Load(index));
            }
        }

        // Sent verbatim, as typed
        Some(Command::Action(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_none() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("\t \n"), None);
    }

    #[test]
    fn list_is_case_insensitive() {
        assert_eq!(Command::parse("list"), Some(Command::List));
        assert_eq!(Command::parse("LIST"), Some(Command::List));
        assert_eq!(Command::parse("  List  "), Some(Command::List));
    }

    #[test]
    fn load_with_integer_argument() {
        assert_eq!(Command::parse("load 2"), Some(Command::Load(2)));
        assert_eq!(Command::parse("LOAD 0"), Some(Command::Load(0)));
        assert_eq!(Command::parse("load   7"), Some(Command::Load(7)));
    }

    #[test]
    fn malformed_load_falls_through_to_action() {
        assert_eq!(
            Command::parse("load two"),
            Some(Command::Action("load two".to_string()))
        );
        assert_eq!(
            Command::parse("load"),
            Some(Command::Action("load".to_string()))
        );
        assert_eq!(
            Command::parse("load -1"),
            Some(Command::Action("load -1".to_string()))
        );
    }

    #[test]
    fn everything_else_is_a_verbatim_action() {
        assert_eq!(
            Command::parse("hack firewall"),
            Some(Command::Action("hack firewall".to_string()))
        );
        // Original spacing preserved - the server sees exactly what was typed
        assert_eq!(
            Command::parse("SQL Injection "),
            Some(Command::Action("SQL Injection ".to_string()))
        );
        // "listen" is not "list"
        assert_eq!(
            Command::parse("listen"),
            Some(Command::Action("listen".to_string()))
        );
    }
}
