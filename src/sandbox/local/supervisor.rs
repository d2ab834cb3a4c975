use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::sandbox::error::SandboxError;
use crate::sandbox::handle::SpawnedProcess;
use crate::sandbox::types::ProcessEvent;

/// Spawns foreground processes with a filtered environment and
/// multiplexes their stdout/stderr into a single ordered event stream.
pub struct ProcessSupervisor {
    /// Host environment variables processes may inherit (allowlist).
    env_allowlist: Vec<String>,
}

impl ProcessSupervisor {
    pub fn new(env_allowlist: Vec<String>) -> Self {
        Self { env_allowlist }
    }

    /// Spawn `program` with `args` in `working_dir` and wire its streams.
    /// Spawn failure (typically a missing binary) is reported immediately.
    pub fn spawn(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<LocalProcess, SandboxError> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.current_dir(working_dir);
        cmd.env_clear();
        for key in &self.env_allowlist {
            if let Ok(val) = std::env::var(key) {
                cmd.env(key, val);
            }
        }
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| SandboxError::Spawn {
            command: program.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(program, ?args, "spawned workspace process");

        let stdin = child.stdin.take().ok_or_else(|| {
            SandboxError::ProcessIo("child stdin not captured".into())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            SandboxError::ProcessIo("child stdout not captured".into())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            SandboxError::ProcessIo("child stderr not captured".into())
        })?;

        // Multiplex stdout and stderr into one channel, line by line.
        let (tx, rx) = mpsc::unbounded_channel();

        let tx_out = tx.clone();
        let stdout_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let _ = tx_out.send(ProcessEvent::Stdout(format!("{line}\n")));
            }
        });

        let tx_err = tx.clone();
        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let _ = tx_err.send(ProcessEvent::Stderr(format!("{line}\n")));
            }
        });

        // Drain both streams fully before the exit event goes out.
        let tx_exit = tx;
        tokio::spawn(async move {
            let status = child.wait().await;
            let _ = stdout_task.await;
            let _ = stderr_task.await;
            let code = match status {
                Ok(s) => s.code().unwrap_or(-1),
                Err(_) => -1,
            };
            let _ = tx_exit.send(ProcessEvent::Exit { code });
        });

        Ok(LocalProcess { rx, stdin })
    }
}

/// A spawned child process: event receiver plus stdin writer.
pub struct LocalProcess {
    rx: mpsc::UnboundedReceiver<ProcessEvent>,
    stdin: tokio::process::ChildStdin,
}

#[async_trait]
impl SpawnedProcess for LocalProcess {
    async fn next_event(&mut self) -> Option<ProcessEvent> {
        self.rx.recv().await
    }

    async fn write_input(&mut self, data: &str) -> Result<(), SandboxError> {
        self.stdin
            .write_all(data.as_bytes())
            .await
            .map_err(|e| SandboxError::ProcessIo(format!("write stdin: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| SandboxError::ProcessIo(format!("flush stdin: {e}")))?;
        Ok(())
    }
}
