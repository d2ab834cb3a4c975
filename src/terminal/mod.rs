//! Interactive terminal: scrollback, line editing with history, and
//! raw forwarding while a process holds the foreground.

pub mod command;
pub mod history;
pub mod scrollback;

pub use command::{classify, CommandAction, DELEGATED_PREFIX};
pub use history::CommandHistory;
pub use scrollback::{Line, LineStyle, Scrollback};

/// Who currently owns keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The terminal edits a pending command line.
    LineEditing,
    /// A foreground process consumes input directly.
    ProcessAttached,
}

/// A keystroke as delivered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
}

/// What the terminal decided to do with a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled internally; nothing for the caller to do.
    Consumed,
    /// A complete command line was submitted.
    Submitted(String),
    /// Raw bytes for the attached process's stdin.
    Forward(String),
}

pub struct Terminal {
    pub scrollback: Scrollback,
    history: CommandHistory,
    input: String,
    mode: InputMode,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            scrollback: Scrollback::new(),
            history: CommandHistory::new(),
            input: String::new(),
            mode: InputMode::LineEditing,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// The pending command line as the user sees it.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match self.mode {
            InputMode::ProcessAttached => self.forward_key(key),
            InputMode::LineEditing => self.edit_key(key),
        }
    }

    fn forward_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => KeyOutcome::Forward(c.to_string()),
            Key::Enter => KeyOutcome::Forward("\n".into()),
            Key::Backspace => KeyOutcome::Forward("\u{7f}".into()),
            // History navigation is meaningless while attached.
            Key::Up | Key::Down => KeyOutcome::Consumed,
        }
    }

    fn edit_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => {
                self.input.push(c);
                KeyOutcome::Consumed
            }
            Key::Backspace => {
                self.input.pop();
                KeyOutcome::Consumed
            }
            Key::Up => {
                if let Some(entry) = self.history.older() {
                    self.input = entry;
                }
                KeyOutcome::Consumed
            }
            Key::Down => {
                if self.history.is_browsing() {
                    match self.history.newer() {
                        Some(entry) => self.input = entry,
                        None => self.input.clear(),
                    }
                }
                KeyOutcome::Consumed
            }
            Key::Enter => {
                let line = self.input.trim().to_string();
                self.input.clear();
                if line.is_empty() {
                    return KeyOutcome::Consumed;
                }
                self.history.record(&line);
                KeyOutcome::Submitted(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_line(terminal: &mut Terminal, line: &str) -> KeyOutcome {
        for c in line.chars() {
            terminal.handle_key(Key::Char(c));
        }
        terminal.handle_key(Key::Enter)
    }

    #[test]
    fn typing_then_enter_submits_the_line() {
        let mut terminal = Terminal::new();
        let outcome = type_line(&mut terminal, "ls -la");
        assert_eq!(outcome, KeyOutcome::Submitted("ls -la".into()));
        assert!(terminal.input().is_empty());
    }

    #[test]
    fn backspace_edits_the_pending_line() {
        let mut terminal = Terminal::new();
        terminal.handle_key(Key::Char('l'));
        terminal.handle_key(Key::Char('z'));
        terminal.handle_key(Key::Backspace);
        terminal.handle_key(Key::Char('s'));
        assert_eq!(terminal.input(), "ls");
    }

    #[test]
    fn empty_submission_is_consumed_and_not_recorded() {
        let mut terminal = Terminal::new();
        assert_eq!(terminal.handle_key(Key::Enter), KeyOutcome::Consumed);
        assert_eq!(type_line(&mut terminal, "   "), KeyOutcome::Consumed);
        // Nothing to recall.
        terminal.handle_key(Key::Up);
        assert!(terminal.input().is_empty());
    }

    #[test]
    fn up_recalls_most_recent_first() {
        let mut terminal = Terminal::new();
        type_line(&mut terminal, "first");
        type_line(&mut terminal, "second");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "second");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "first");
        // Bounded at the oldest.
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "first");
    }

    #[test]
    fn down_returns_toward_newest_then_clears() {
        let mut terminal = Terminal::new();
        type_line(&mut terminal, "first");
        type_line(&mut terminal, "second");
        terminal.handle_key(Key::Up);
        terminal.handle_key(Key::Up);
        terminal.handle_key(Key::Down);
        assert_eq!(terminal.input(), "second");
        terminal.handle_key(Key::Down);
        assert!(terminal.input().is_empty());
    }

    #[test]
    fn down_without_browsing_does_not_touch_the_input() {
        let mut terminal = Terminal::new();
        type_line(&mut terminal, "recorded");
        terminal.handle_key(Key::Char('x'));
        terminal.handle_key(Key::Down);
        assert_eq!(terminal.input(), "x");
    }

    #[test]
    fn repeated_command_is_deduplicated_in_recall() {
        let mut terminal = Terminal::new();
        type_line(&mut terminal, "alpha");
        type_line(&mut terminal, "beta");
        type_line(&mut terminal, "alpha");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "alpha");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "beta");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input(), "beta");
    }

    #[test]
    fn attached_mode_forwards_raw_keys() {
        let mut terminal = Terminal::new();
        terminal.set_mode(InputMode::ProcessAttached);
        assert_eq!(
            terminal.handle_key(Key::Char('y')),
            KeyOutcome::Forward("y".into())
        );
        assert_eq!(
            terminal.handle_key(Key::Enter),
            KeyOutcome::Forward("\n".into())
        );
        assert_eq!(
            terminal.handle_key(Key::Backspace),
            KeyOutcome::Forward("\u{7f}".into())
        );
        assert_eq!(terminal.handle_key(Key::Up), KeyOutcome::Consumed);
    }

    #[test]
    fn attached_mode_leaves_the_pending_line_alone() {
        let mut terminal = Terminal::new();
        terminal.handle_key(Key::Char('d'));
        terminal.set_mode(InputMode::ProcessAttached);
        terminal.handle_key(Key::Char('y'));
        terminal.set_mode(InputMode::LineEditing);
        assert_eq!(terminal.input(), "d");
    }
}
