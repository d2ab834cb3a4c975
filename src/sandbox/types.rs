use std::collections::BTreeMap;
use std::path::PathBuf;

// ── File templates ──────────────────────────────────────────────────

/// Declarative file/content template: name → entry, for one directory
/// level. Mounting materializes the whole tree under the workspace root.
///
/// The tree is acyclic and rooted by construction; full paths are always
/// derived by joining ancestor names, never stored.
pub type FileTree = BTreeMap<String, TreeNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File { contents: String },
    Directory(FileTree),
}

impl TreeNode {
    pub fn file(contents: impl Into<String>) -> Self {
        TreeNode::File {
            contents: contents.into(),
        }
    }

    pub fn directory(entries: FileTree) -> Self {
        TreeNode::Directory(entries)
    }
}

// ── Process events ──────────────────────────────────────────────────

/// One chunk delivered by a spawned process, in stream order.
/// No reordering or batching: interleaved stdout/stderr ordering is
/// part of what the user is debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    Exit { code: i32 },
}

// ── Backing configuration ───────────────────────────────────────────

/// Configuration for the local workspace-directory backing.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Directory the workspace filesystem is rooted at.
    pub root_dir: PathBuf,
    /// Environment variables spawned processes inherit from the host.
    pub inherit_env_allowlist: Vec<String>,
}

impl SandboxConfig {
    pub fn new(root_dir: PathBuf) -> Self {
        Self {
            root_dir,
            inherit_env_allowlist: vec![
                "PATH".into(),
                "HOME".into(),
                "LANG".into(),
                "TERM".into(),
            ],
        }
    }
}
