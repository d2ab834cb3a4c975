//! Routes a run request to the right execution strategy: spawn an
//! interpreter inside the sandbox, or delegate the source text to the
//! remote execution service.

use std::sync::Arc;

use thiserror::Error;

use crate::playground::{RemoteOutcome, RemoteRunner};
use crate::runtime::templates;
use crate::runtime::{ExecutionStrategy, Language};
use crate::sandbox::{Sandbox, SandboxError, SpawnedProcess};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),
    /// The remote execution service could not be reached or returned
    /// garbage. Distinct from a compile failure, which is a successful
    /// dispatch with `success == false`.
    #[error("remote execution failed: {0}")]
    Remote(#[source] anyhow::Error),
}

/// What a dispatched run produced.
pub enum RunOutcome {
    /// A live local process; the caller owns its event stream.
    Process(Box<dyn SpawnedProcess>),
    /// The batch result of a delegated run.
    Remote(RemoteOutcome),
}

/// What a dependency-install request produced.
pub enum InstallOutcome {
    Process(Box<dyn SpawnedProcess>),
    /// The language has no local package manager to run.
    NotApplicable,
}

pub struct RuntimeDispatcher {
    sandbox: Arc<dyn Sandbox>,
    remote: Arc<dyn RemoteRunner>,
}

impl RuntimeDispatcher {
    pub fn new(sandbox: Arc<dyn Sandbox>, remote: Arc<dyn RemoteRunner>) -> Self {
        Self { sandbox, remote }
    }

    /// Mount the language's starter tree into the sandbox.
    pub async fn mount_template(&self, language: Language) -> Result<(), SandboxError> {
        tracing::info!(%language, "mounting starter template");
        self.sandbox.mount(&templates::template(language)).await
    }

    /// Run `entry_path` under the language's strategy.
    pub async fn execute(
        &self,
        language: Language,
        entry_path: &str,
    ) -> Result<RunOutcome, DispatchError> {
        match language.strategy() {
            ExecutionStrategy::Native { interpreter, .. } => {
                tracing::info!(%language, entry = entry_path, "spawning native run");
                let process = self
                    .sandbox
                    .spawn(interpreter, &[entry_path.to_string()])
                    .await?;
                Ok(RunOutcome::Process(process))
            }
            ExecutionStrategy::Delegated => {
                let source = self.sandbox.read_file(entry_path).await?;
                tracing::info!(%language, entry = entry_path, "delegating run");
                let outcome = self
                    .remote
                    .run(&source)
                    .await
                    .map_err(DispatchError::Remote)?;
                Ok(RunOutcome::Remote(outcome))
            }
        }
    }

    /// Run the language's package-manager install, if it has one.
    pub async fn install_dependencies(
        &self,
        language: Language,
    ) -> Result<InstallOutcome, DispatchError> {
        match language.strategy() {
            ExecutionStrategy::Native {
                install_command, ..
            } => {
                let (program, args) = install_command
                    .split_first()
                    .ok_or_else(|| SandboxError::Spawn {
                        command: String::new(),
                        reason: "empty install command".into(),
                    })?;
                let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
                tracing::info!(%language, program, "installing dependencies");
                let process = self.sandbox.spawn(program, &args).await?;
                Ok(InstallOutcome::Process(process))
            }
            ExecutionStrategy::Delegated => Ok(InstallOutcome::NotApplicable),
        }
    }
}
