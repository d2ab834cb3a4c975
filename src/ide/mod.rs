pub mod files;
pub mod shell;

pub use files::{editor_language, FileNode, NodeKind, OpenFile, WorkspaceFiles};
pub use shell::IdeShell;
