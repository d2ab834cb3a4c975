//! Foreground process sessions. At most one process owns the terminal
//! at a time; its stdout and stderr are merged into one output stream.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::sandbox::{ProcessEvent, SandboxError, SpawnedProcess};

#[derive(Debug, Error)]
#[error("a process is already running")]
pub struct AlreadyRunning;

/// What a session surfaces to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A chunk of process output, stdout and stderr merged.
    Output(String),
    /// The process finished; the session is detached.
    Exited { code: i32 },
}

struct ProcessSession {
    id: String,
    started_at: DateTime<Utc>,
    process: Box<dyn SpawnedProcess>,
}

/// Tracks the single foreground process, if any.
#[derive(Default)]
pub struct ProcessSessionManager {
    active: Option<ProcessSession>,
}

impl ProcessSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    /// Take ownership of a freshly spawned process. Fails if one is
    /// already attached; the caller decides how to report that.
    pub fn attach(&mut self, process: Box<dyn SpawnedProcess>) -> Result<(), AlreadyRunning> {
        if self.active.is_some() {
            return Err(AlreadyRunning);
        }
        let session = ProcessSession {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            process,
        };
        tracing::info!(session_id = %session.id, started_at = %session.started_at, "process attached");
        self.active = Some(session);
        Ok(())
    }

    /// Forward raw input to the attached process's stdin. A no-op when
    /// nothing is attached, so late keystrokes are harmless.
    pub async fn write_input(&mut self, data: &str) -> Result<(), SandboxError> {
        match self.active.as_mut() {
            Some(session) => session.process.write_input(data).await,
            None => Ok(()),
        }
    }

    /// Pull the next event from the attached process. Returns None when
    /// nothing is attached or the stream has ended; an `Exited` event
    /// detaches the session.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let session = self.active.as_mut()?;
        match session.process.next_event().await {
            Some(ProcessEvent::Stdout(chunk)) | Some(ProcessEvent::Stderr(chunk)) => {
                Some(SessionEvent::Output(chunk))
            }
            Some(ProcessEvent::Exit { code }) => {
                let id = session.id.clone();
                self.active = None;
                tracing::info!(session_id = %id, code, "process exited");
                Some(SessionEvent::Exited { code })
            }
            None => {
                // Stream ended without an exit event; treat as detached.
                let id = session.id.clone();
                self.active = None;
                tracing::warn!(session_id = %id, "process stream ended without exit");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedProcess {
        events: VecDeque<ProcessEvent>,
        stdin: Arc<Mutex<String>>,
    }

    impl ScriptedProcess {
        fn new(events: Vec<ProcessEvent>) -> (Self, Arc<Mutex<String>>) {
            let stdin = Arc::new(Mutex::new(String::new()));
            (
                Self {
                    events: events.into(),
                    stdin: stdin.clone(),
                },
                stdin,
            )
        }
    }

    #[async_trait]
    impl SpawnedProcess for ScriptedProcess {
        async fn next_event(&mut self) -> Option<ProcessEvent> {
            self.events.pop_front()
        }

        async fn write_input(&mut self, data: &str) -> Result<(), SandboxError> {
            self.stdin.lock().unwrap().push_str(data);
            Ok(())
        }
    }

    #[tokio::test]
    async fn second_attach_while_running_is_rejected() {
        let mut manager = ProcessSessionManager::new();
        let (first, _) = ScriptedProcess::new(vec![]);
        let (second, _) = ScriptedProcess::new(vec![]);
        manager.attach(Box::new(first)).unwrap();
        assert!(manager.attach(Box::new(second)).is_err());
        assert!(manager.is_attached());
    }

    #[tokio::test]
    async fn stdout_and_stderr_both_surface_as_output() {
        let mut manager = ProcessSessionManager::new();
        let (process, _) = ScriptedProcess::new(vec![
            ProcessEvent::Stdout("out\n".into()),
            ProcessEvent::Stderr("warn\n".into()),
            ProcessEvent::Exit { code: 0 },
        ]);
        manager.attach(Box::new(process)).unwrap();

        assert_eq!(
            manager.next_event().await,
            Some(SessionEvent::Output("out\n".into()))
        );
        assert_eq!(
            manager.next_event().await,
            Some(SessionEvent::Output("warn\n".into()))
        );
        assert_eq!(
            manager.next_event().await,
            Some(SessionEvent::Exited { code: 0 })
        );
    }

    #[tokio::test]
    async fn exit_detaches_and_allows_a_new_attach() {
        let mut manager = ProcessSessionManager::new();
        let (process, _) = ScriptedProcess::new(vec![ProcessEvent::Exit { code: 3 }]);
        manager.attach(Box::new(process)).unwrap();

        assert_eq!(
            manager.next_event().await,
            Some(SessionEvent::Exited { code: 3 })
        );
        assert!(!manager.is_attached());

        let (next, _) = ScriptedProcess::new(vec![]);
        assert!(manager.attach(Box::new(next)).is_ok());
    }

    #[tokio::test]
    async fn ended_stream_without_exit_detaches() {
        let mut manager = ProcessSessionManager::new();
        let (process, _) = ScriptedProcess::new(vec![]);
        manager.attach(Box::new(process)).unwrap();

        assert_eq!(manager.next_event().await, None);
        assert!(!manager.is_attached());
    }

    #[tokio::test]
    async fn input_reaches_the_attached_process() {
        let mut manager = ProcessSessionManager::new();
        let (process, stdin) = ScriptedProcess::new(vec![]);
        manager.attach(Box::new(process)).unwrap();

        manager.write_input("y\n").await.unwrap();
        assert_eq!(stdin.lock().unwrap().as_str(), "y\n");
    }

    #[tokio::test]
    async fn input_while_detached_is_a_silent_no_op() {
        let mut manager = ProcessSessionManager::new();
        assert!(manager.write_input("late keystroke").await.is_ok());
        assert_eq!(manager.next_event().await, None);
    }
}
