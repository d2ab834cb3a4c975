use async_trait::async_trait;

use super::error::SandboxError;
use super::types::{FileTree, ProcessEvent};

/// Capability boundary of an execution sandbox: a virtual filesystem
/// plus process spawning. The IDE core is written against this trait
/// and treats the backing implementation as a black box.
///
/// Paths are workspace-relative; a leading `/` is equivalent to none.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Materialize a file template: write every file, create every
    /// directory. Existing files are overwritten, other files are left
    /// in place; a fresh session is the caller's responsibility.
    async fn mount(&self, template: &FileTree) -> Result<(), SandboxError>;

    /// Spawn a foreground process in the workspace and return its
    /// stream handle. Fails with `SandboxError::Spawn` when the program
    /// does not exist.
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<Box<dyn SpawnedProcess>, SandboxError>;

    // ── Files ───────────────────────────────────────────────────

    /// Fails with `SandboxError::NotFound` if the path does not exist.
    async fn read_file(&self, path: &str) -> Result<String, SandboxError>;

    /// Creates the file if absent, overwrites otherwise.
    async fn write_file(&self, path: &str, contents: &str) -> Result<(), SandboxError>;

    async fn mkdir(&self, path: &str) -> Result<(), SandboxError>;

    /// Removes a file or an empty directory. Removing a non-empty
    /// directory is not supported.
    async fn rm(&self, path: &str) -> Result<(), SandboxError>;
}

/// Handle to a live spawned process: pull output events, push input.
#[async_trait]
pub trait SpawnedProcess: Send {
    /// Next output chunk or the exit notification, in delivery order.
    /// Returns `None` once the stream is exhausted.
    async fn next_event(&mut self) -> Option<ProcessEvent>;

    /// Forward raw input to the process's stdin.
    async fn write_input(&mut self, data: &str) -> Result<(), SandboxError>;
}
