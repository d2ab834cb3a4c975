//! Append-only styled line buffer backing the terminal pane.

/// How a scrollback line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// An echoed command, prompt included.
    Command,
    /// Normal program or status output.
    Output,
    /// Diagnostics and failures.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

/// The terminal's scrollback. Chunks are split on newlines at append
/// time so every stored entry is a single display line.
#[derive(Default)]
pub struct Scrollback {
    lines: Vec<Line>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of text, splitting it into lines. Chunks that are
    /// empty or whitespace-only are dropped so process output that ends
    /// in a newline does not leave a blank trailing line.
    pub fn append(&mut self, chunk: &str, style: LineStyle) {
        if chunk.trim().is_empty() {
            return;
        }
        let mut parts: Vec<&str> = chunk.split('\n').collect();
        if parts.last() == Some(&"") {
            parts.pop();
        }
        for part in parts {
            self.lines.push(Line {
                text: part.to_string(),
                style,
            });
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
