//! Line-run accumulator shared by the generic chunker and the entry parsers.

/// An ordered run of trimmed, non-empty lines awaiting a flush decision.
///
/// The joined length (lines separated by `\n`) is tracked incrementally in chars so
/// size checks never re-join the buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRun {
    lines: Vec<String>,
    joined_chars: usize,
}

impl LineRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line, trimming it. Blank lines are ignored; runs never hold them.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.joined_chars = self.projected_chars(line);
        self.lines.push(line.to_string());
    }

    /// Length of the joined text if `line` were appended next.
    pub fn projected_chars(&self, line: &str) -> usize {
        let added = line.trim().chars().count();
        if self.lines.is_empty() {
            added
        } else {
            self.joined_chars + 1 + added
        }
    }

    pub fn joined_chars(&self) -> usize {
        self.joined_chars
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Canonical textual form: the lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the joined text is long enough to be emitted.
    pub fn meets_minimum(&self, min_chars: usize) -> bool {
        !self.is_empty() && self.joined_chars >= min_chars
    }

    /// Closes the run, handing back its contents and leaving `self` empty.
    /// Returns `None` if nothing was accumulated.
    pub fn take(&mut self) -> Option<LineRun> {
        if self.is_empty() {
            return None;
        }
        Some(std::mem::take(self))
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.joined_chars = 0;
    }
}
