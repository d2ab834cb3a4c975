pub mod dispatcher;
pub mod templates;

pub use dispatcher::{DispatchError, InstallOutcome, RunOutcome, RuntimeDispatcher};

/// The closed set of languages a session can be in. Exactly one is
/// active at a time; switching tears down the open-file set and mounts
/// a fresh template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Runs natively inside the sandbox via `node`.
    JavaScript,
    /// No local toolchain; runs through the remote execution fallback.
    Rust,
}

/// How a language's code gets executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// An interpreter exists inside the sandbox: spawn it on the entry
    /// file and stream its output.
    Native {
        interpreter: &'static str,
        install_command: &'static [&'static str],
    },
    /// Delegate the source text to the remote compile-and-run service.
    Delegated,
}

impl Language {
    pub fn strategy(self) -> ExecutionStrategy {
        match self {
            Language::JavaScript => ExecutionStrategy::Native {
                interpreter: "node",
                install_command: &["npm", "install", "--no-progress", "--loglevel=silent"],
            },
            Language::Rust => ExecutionStrategy::Delegated,
        }
    }

    /// The file a template designates as the default run target.
    pub fn entry_file(self) -> &'static str {
        match self {
            Language::JavaScript => "index.js",
            Language::Rust => "main.rs",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::JavaScript => write!(f, "javascript"),
            Language::Rust => write!(f, "rust"),
        }
    }
}
