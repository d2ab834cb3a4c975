//! Classification of submitted terminal lines.
//!
//! The sandbox has no Rust toolchain, so `cargo` invocations never
//! reach the process table. `cargo` and `cargo run` are rewritten into
//! a delegated run of the current file; any other `cargo` subcommand is
//! reported as unsupported. Everything else is spawned as-is.

/// First token that marks a command as belonging to the delegated
/// toolchain rather than the sandbox.
pub const DELEGATED_PREFIX: &str = "cargo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Blank input: nothing to do.
    Empty,
    /// `cargo` or `cargo run`: execute the current file remotely.
    DelegatedRun,
    /// Any other `cargo` subcommand: unsupported, explain why.
    DelegatedOther { line: String },
    /// An ordinary program invocation for the sandbox.
    Spawn { program: String, args: Vec<String> },
}

/// Classify a raw input line. Matching is by whole first token, so a
/// program that merely starts with the letters "cargo" is still spawned
/// normally.
pub fn classify(line: &str) -> CommandAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return CommandAction::Empty;
    }

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    let rest: Vec<String> = tokens.map(str::to_string).collect();

    if first == DELEGATED_PREFIX {
        if rest.is_empty() || rest == ["run"] {
            return CommandAction::DelegatedRun;
        }
        return CommandAction::DelegatedOther {
            line: trimmed.to_string(),
        };
    }

    CommandAction::Spawn {
        program: first.to_string(),
        args: rest,
    }
}
