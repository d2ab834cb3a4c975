use std::io;

/// Errors from sandbox operations.
///
/// The backing implementation maps its internal failures into these
/// variants; callers at the IDE layer render them as terminal error
/// lines rather than propagating them further.
#[derive(thiserror::Error, Debug)]
pub enum SandboxError {
    #[error("mount failed: {0}")]
    Mount(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("cannot spawn {command}: {reason}")]
    Spawn { command: String, reason: String },

    #[error("process i/o: {0}")]
    ProcessIo(String),

    #[error("path escapes workspace: {0}")]
    PathEscape(String),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}
