// Scrollback log - the append-only transcript of the session
//
// Lines are only ever added, never edited, with one exception: the boot
// sequencer retypes its own last line character by character while the
// animation runs. Every batch from a dispatched command lands as a
// single append so intra-command ordering can't interleave.

/// Ordered transcript of display lines, oldest first
#[derive(Debug, Default)]
pub struct Scrollback {
    lines: Vec<String>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Append a whole command's output atomically
    pub fn append_batch(&mut self, batch: Vec<String>) {
        self.lines.extend(batch);
    }

    /// Replace the last line in place. Boot animation only - everything
    /// else treats the log as append-only.
    pub fn replace_last(&mut self, line: String) {
        if let Some(last) = self.lines.last_mut() {
            *last = line;
        } else {
            self.lines.push(line);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_append_in_order() {
        let mut log = Scrollback::new();
        log.append_batch(vec!["> list".into(), "📋 Available Missions:".into()]);
        log.append_batch(vec!["> hack".into()]);
        assert_eq!(log.lines(), ["> list", "📋 Available Missions:", "> hack"]);
    }

    #[test]
    fn replace_last_touches_only_the_tail() {
        let mut log = Scrollback::new();
        log.push("done".into());
        log.push("Boo|".into());
        log.replace_last("Boot|".into());
        assert_eq!(log.lines(), ["done", "Boot|"]);
    }

    #[test]
    fn replace_last_on_empty_log_pushes() {
        let mut log = Scrollback::new();
        log.replace_last("B|".into());
        assert_eq!(log.lines(), ["B|"]);
    }
}
