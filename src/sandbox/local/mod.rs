pub mod supervisor;
pub mod workspace;

use async_trait::async_trait;

use super::error::SandboxError;
use super::handle::{Sandbox, SpawnedProcess};
use super::types::{FileTree, SandboxConfig};
use supervisor::ProcessSupervisor;
use workspace::WorkspaceFs;

/// Workspace-directory backing for the `Sandbox` capability: files live
/// under one root directory, processes run as the current user with a
/// filtered environment. Not a security boundary.
pub struct LocalSandbox {
    workspace: WorkspaceFs,
    supervisor: ProcessSupervisor,
}

impl LocalSandbox {
    /// Boot the sandbox: create the workspace root and the supervisor.
    /// A boot failure is fatal to the session; there is nothing useful
    /// the IDE can do without a filesystem.
    pub fn boot(config: SandboxConfig) -> Result<Self, SandboxError> {
        tracing::info!(root = %config.root_dir.display(), "booting local sandbox");
        let workspace = WorkspaceFs::create(config.root_dir)?;
        let supervisor = ProcessSupervisor::new(config.inherit_env_allowlist);
        Ok(Self {
            workspace,
            supervisor,
        })
    }
}

#[async_trait]
impl Sandbox for LocalSandbox {
    async fn mount(&self, template: &FileTree) -> Result<(), SandboxError> {
        self.workspace.mount(template)
    }

    async fn spawn(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<Box<dyn SpawnedProcess>, SandboxError> {
        let process = self.supervisor.spawn(program, args, self.workspace.root())?;
        Ok(Box::new(process))
    }

    async fn read_file(&self, path: &str) -> Result<String, SandboxError> {
        self.workspace.read_file(path)
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<(), SandboxError> {
        self.workspace.write_file(path, contents)
    }

    async fn mkdir(&self, path: &str) -> Result<(), SandboxError> {
        self.workspace.mkdir(path)
    }

    async fn rm(&self, path: &str) -> Result<(), SandboxError> {
        self.workspace.rm(path)
    }
}
