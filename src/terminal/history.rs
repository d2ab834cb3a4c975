//! Command history with most-recent-first ordering and a browse cursor.

/// Submitted-command history. Duplicates are collapsed so a re-entered
/// command moves to the front instead of appearing twice.
#[derive(Default)]
pub struct CommandHistory {
    // Index 0 is the most recent command.
    entries: Vec<String>,
    // None when not browsing; Some(i) points at entries[i].
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and reset the browse cursor.
    pub fn record(&mut self, command: &str) {
        self.entries.retain(|e| e != command);
        self.entries.insert(0, command.to_string());
        self.cursor = None;
    }

    /// Step toward older entries. Stays on the oldest entry once
    /// reached rather than wrapping.
    pub fn older(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(i) => (i + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        Some(self.entries[next].clone())
    }

    /// Step back toward newer entries. Stepping past the newest entry
    /// leaves browsing mode and returns None.
    pub fn newer(&mut self) -> Option<String> {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                None
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                Some(self.entries[i - 1].clone())
            }
        }
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }
}
