//! The IDE shell: wires the sandbox, dispatcher, terminal, session
//! manager and file models together and owns every user-visible
//! workflow.

use std::sync::Arc;

use crate::config::IdeConfig;
use crate::ide::files::{editor_language, FileNode, NodeKind, WorkspaceFiles};
use crate::playground::{PlaygroundClient, RemoteOutcome, RemoteRunner};
use crate::runtime::{DispatchError, InstallOutcome, Language, RunOutcome, RuntimeDispatcher};
use crate::sandbox::{LocalSandbox, Sandbox, SandboxConfig, SandboxError};
use crate::session::{ProcessSessionManager, SessionEvent};
use crate::terminal::{
    classify, CommandAction, InputMode, Key, KeyOutcome, LineStyle, Terminal,
};

pub struct IdeShell {
    sandbox: Arc<dyn Sandbox>,
    dispatcher: RuntimeDispatcher,
    pub terminal: Terminal,
    session: ProcessSessionManager,
    pub files: WorkspaceFiles,
    language: Language,
    is_loading: bool,
}

impl IdeShell {
    /// Build a shell over an already-booted sandbox and remote runner.
    pub fn new(sandbox: Arc<dyn Sandbox>, remote: Arc<dyn RemoteRunner>) -> Self {
        let dispatcher = RuntimeDispatcher::new(sandbox.clone(), remote);
        let mut terminal = Terminal::new();
        terminal
            .scrollback
            .append("Welcome to the sandbox terminal.", LineStyle::Output);
        terminal.scrollback.append(
            "Select a language to mount a starter project, then press Run.",
            LineStyle::Output,
        );
        Self {
            sandbox,
            dispatcher,
            terminal,
            session: ProcessSessionManager::new(),
            files: WorkspaceFiles::new(),
            language: Language::JavaScript,
            is_loading: false,
        }
    }

    /// Boot a shell from configuration: local sandbox plus the real
    /// remote execution client.
    pub fn boot(config: IdeConfig) -> Result<Self, SandboxError> {
        let sandbox = LocalSandbox::boot(SandboxConfig::new(config.workspace_root))?;
        let remote = PlaygroundClient::new(reqwest::Client::new(), config.playground);
        Ok(Self::new(Arc::new(sandbox), Arc::new(remote)))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_process_running(&self) -> bool {
        self.session.is_attached()
    }

    // ── Language switching ───────────────────────────────────────────

    /// Switch the active language: reset the editor models, mount the
    /// new starter template and open its entry file.
    pub async fn select_language(&mut self, language: Language) {
        if self.is_loading || self.session.is_attached() {
            self.terminal.scrollback.append(
                "Cannot switch languages while busy.",
                LineStyle::Error,
            );
            return;
        }
        self.is_loading = true;
        self.language = language;
        self.files.reset();

        if let Err(err) = self.dispatcher.mount_template(language).await {
            tracing::error!(%language, error = %err, "template mount failed");
            self.terminal
                .scrollback
                .append(&format!("Failed to load {language} template: {err}"), LineStyle::Error);
            self.is_loading = false;
            return;
        }

        let template = crate::runtime::templates::template(language);
        self.files.set_tree(FileNode::from_template(&template));

        let entry = language.entry_file();
        match self.sandbox.read_file(entry).await {
            Ok(contents) => self.files.insert_open(entry, contents),
            Err(err) => {
                tracing::error!(%language, entry, error = %err, "entry file missing after mount");
                self.terminal
                    .scrollback
                    .append(&format!("Failed to open {entry}: {err}"), LineStyle::Error);
            }
        }

        self.terminal
            .scrollback
            .append(&format!("Switched to {language}."), LineStyle::Output);
        self.is_loading = false;
    }

    // ── File operations ──────────────────────────────────────────────

    /// Open a file in the editor, reading it from the sandbox if it is
    /// not already open.
    pub async fn open_file(&mut self, path: &str) {
        if self.files.focus(path) {
            return;
        }
        match self.sandbox.read_file(path).await {
            Ok(contents) => self.files.insert_open(path, contents),
            Err(err) => {
                self.terminal
                    .scrollback
                    .append(&format!("Failed to open {path}: {err}"), LineStyle::Error);
            }
        }
    }

    /// Apply an edit to the focused buffer and write it through to the
    /// sandbox. The buffer keeps the edit even if the write fails, so
    /// nothing the user typed is lost.
    pub async fn edit_current_file(&mut self, content: &str) {
        let Some(path) = self.files.update_current_content(content) else {
            return;
        };
        if let Err(err) = self.sandbox.write_file(&path, content).await {
            tracing::error!(path, error = %err, "write-through failed");
            self.terminal
                .scrollback
                .append(&format!("Failed to save {path}: {err}"), LineStyle::Error);
        }
    }

    /// Create an empty file from the explorer and open it. Names must
    /// be unique in the tree; creating over an existing entry would
    /// silently truncate it.
    pub async fn create_file(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.tree_has(name) {
            self.terminal
                .scrollback
                .append(&format!("{name} already exists."), LineStyle::Error);
            return;
        }
        match self.sandbox.write_file(name, "").await {
            Ok(()) => {
                self.files.add_tree_node(FileNode::file(name));
                self.files.insert_open(name, String::new());
            }
            Err(err) => {
                self.terminal
                    .scrollback
                    .append(&format!("Failed to create {name}: {err}"), LineStyle::Error);
            }
        }
    }

    /// Create a directory from the explorer.
    pub async fn create_directory(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.tree_has(name) {
            self.terminal
                .scrollback
                .append(&format!("{name} already exists."), LineStyle::Error);
            return;
        }
        match self.sandbox.mkdir(name).await {
            Ok(()) => {
                self.files
                    .add_tree_node(FileNode::directory(name, Vec::new()));
            }
            Err(err) => {
                self.terminal
                    .scrollback
                    .append(&format!("Failed to create {name}: {err}"), LineStyle::Error);
            }
        }
    }

    fn tree_has(&self, name: &str) -> bool {
        self.files.tree.iter().any(|n| n.name == name)
    }

    /// Delete a file: sandbox first, then the editor models.
    pub async fn delete_file(&mut self, path: &str) {
        if let Err(err) = self.sandbox.rm(path).await {
            self.terminal
                .scrollback
                .append(&format!("Failed to delete {path}: {err}"), LineStyle::Error);
            return;
        }
        self.files.remove(path);
    }

    // ── Running code ─────────────────────────────────────────────────

    /// Run the current file under the active language's strategy.
    pub async fn run(&mut self) {
        if self.is_loading {
            self.terminal
                .scrollback
                .append("Still loading the project template.", LineStyle::Error);
            return;
        }
        if self.session.is_attached() {
            self.terminal
                .scrollback
                .append("A process is already running.", LineStyle::Error);
            return;
        }
        let Some(entry) = self
            .files
            .current_path()
            .map(str::to_string)
            .or_else(|| self.files.open_files().first().map(|f| f.path.clone()))
        else {
            self.terminal
                .scrollback
                .append("No file is open to run.", LineStyle::Error);
            return;
        };

        match self.language {
            Language::JavaScript => {
                self.terminal
                    .scrollback
                    .append(&format!("$ node {entry}"), LineStyle::Command);
                self.dispatch_run(&entry).await;
            }
            Language::Rust => {
                self.terminal
                    .scrollback
                    .append("$ cargo run", LineStyle::Command);
                self.run_delegated(&entry).await;
            }
        }
    }

    async fn dispatch_run(&mut self, entry: &str) {
        match self.dispatcher.execute(self.language, entry).await {
            Ok(RunOutcome::Process(process)) => {
                // attach cannot fail: is_attached was checked above.
                if self.session.attach(process).is_ok() {
                    self.terminal.set_mode(InputMode::ProcessAttached);
                }
            }
            Ok(RunOutcome::Remote(outcome)) => self.report_remote(&outcome),
            Err(err) => self.report_dispatch_error(err),
        }
    }

    async fn run_delegated(&mut self, entry: &str) {
        self.terminal.scrollback.append(
            "Compiling and running remotely...",
            LineStyle::Output,
        );
        match self.dispatcher.execute(Language::Rust, entry).await {
            Ok(RunOutcome::Remote(outcome)) => self.report_remote(&outcome),
            // Delegated languages never spawn locally today; if one ever
            // does, hand the process to the session like any native run.
            Ok(RunOutcome::Process(process)) => {
                if self.session.attach(process).is_ok() {
                    self.terminal.set_mode(InputMode::ProcessAttached);
                }
            }
            Err(err) => self.report_dispatch_error(err),
        }
    }

    fn report_remote(&mut self, outcome: &RemoteOutcome) {
        if outcome.success {
            if !outcome.stderr.trim().is_empty() {
                self.terminal
                    .scrollback
                    .append(&outcome.stderr, LineStyle::Output);
            }
            self.terminal
                .scrollback
                .append(&outcome.stdout, LineStyle::Output);
            self.terminal
                .scrollback
                .append("Remote execution completed.", LineStyle::Output);
        } else {
            self.terminal
                .scrollback
                .append(&outcome.stderr, LineStyle::Error);
        }
    }

    fn report_dispatch_error(&mut self, err: DispatchError) {
        match err {
            DispatchError::Remote(err) => {
                tracing::error!(error = %err, "remote execution unreachable");
                self.terminal.scrollback.append(
                    "Remote execution failed. Check your network connection and try again.",
                    LineStyle::Error,
                );
            }
            DispatchError::Sandbox(err) => {
                self.terminal
                    .scrollback
                    .append(&format!("Run failed: {err}"), LineStyle::Error);
            }
        }
    }

    /// Install the active language's dependencies, streaming installer
    /// output through the terminal like any other process.
    pub async fn install_dependencies(&mut self) {
        if self.is_loading || self.session.is_attached() {
            return;
        }
        match self.dispatcher.install_dependencies(self.language).await {
            Ok(InstallOutcome::Process(process)) => {
                self.terminal
                    .scrollback
                    .append("$ npm install", LineStyle::Command);
                if self.session.attach(process).is_ok() {
                    self.terminal.set_mode(InputMode::ProcessAttached);
                }
            }
            Ok(InstallOutcome::NotApplicable) => {
                self.terminal.scrollback.append(
                    &format!(
                        "{} has no local package manager; dependencies are resolved remotely.",
                        self.language
                    ),
                    LineStyle::Error,
                );
            }
            Err(err) => self.report_dispatch_error(err),
        }
    }

    // ── Terminal input ───────────────────────────────────────────────

    /// Feed a keystroke through the terminal and act on the outcome.
    pub async fn handle_key(&mut self, key: Key) {
        match self.terminal.handle_key(key) {
            KeyOutcome::Consumed => {}
            KeyOutcome::Forward(data) => {
                if let Err(err) = self.session.write_input(&data).await {
                    tracing::warn!(error = %err, "stdin forward failed");
                }
            }
            KeyOutcome::Submitted(line) => self.submit_line(&line).await,
        }
    }

    /// Execute a submitted command line. Blank input leaves no trace.
    pub async fn submit_line(&mut self, line: &str) {
        let action = classify(line);
        if action == CommandAction::Empty {
            return;
        }
        self.terminal
            .scrollback
            .append(&format!("$ {line}"), LineStyle::Command);

        match action {
            CommandAction::Empty => {}
            CommandAction::DelegatedRun => {
                if self.language != Language::Rust {
                    self.terminal.scrollback.append(
                        "cargo commands are only supported in Rust projects.",
                        LineStyle::Error,
                    );
                    return;
                }
                if self.session.is_attached() {
                    self.terminal
                        .scrollback
                        .append("A process is already running.", LineStyle::Error);
                    return;
                }
                let entry = self
                    .files
                    .current_path()
                    .unwrap_or(Language::Rust.entry_file())
                    .to_string();
                self.run_delegated(&entry).await;
            }
            CommandAction::DelegatedOther { line } => {
                self.terminal.scrollback.append(
                    &format!("'{line}' is not supported in this sandbox."),
                    LineStyle::Error,
                );
                self.terminal.scrollback.append(
                    "Only 'cargo' and 'cargo run' are available; both run the current file remotely.",
                    LineStyle::Output,
                );
            }
            CommandAction::Spawn { program, args } => {
                if self.session.is_attached() {
                    self.terminal
                        .scrollback
                        .append("A process is already running.", LineStyle::Error);
                    return;
                }
                match self.sandbox.spawn(&program, &args).await {
                    Ok(process) => {
                        if self.session.attach(process).is_ok() {
                            self.terminal.set_mode(InputMode::ProcessAttached);
                        }
                    }
                    Err(err) => {
                        tracing::debug!(program, error = %err, "spawn rejected");
                        self.terminal.scrollback.append(
                            &format!("unknown command: {line}"),
                            LineStyle::Error,
                        );
                    }
                }
            }
        }
    }

    // ── Session pumping ──────────────────────────────────────────────

    /// Drain the attached process until it exits, appending its output
    /// to the scrollback. Returns immediately when nothing is attached.
    pub async fn pump_session(&mut self) {
        loop {
            match self.session.next_event().await {
                Some(SessionEvent::Output(chunk)) => {
                    self.terminal.scrollback.append(&chunk, LineStyle::Output);
                }
                Some(SessionEvent::Exited { code }) => {
                    let style = if code == 0 {
                        LineStyle::Output
                    } else {
                        LineStyle::Error
                    };
                    self.terminal
                        .scrollback
                        .append(&format!("Process exited with code: {code}"), style);
                    self.terminal.set_mode(InputMode::LineEditing);
                    break;
                }
                None => {
                    self.terminal.set_mode(InputMode::LineEditing);
                    break;
                }
            }
        }
    }

    /// Editor language of the focused buffer, for the host UI.
    pub fn current_editor_language(&self) -> &'static str {
        self.files
            .current_path()
            .map(editor_language)
            .unwrap_or("plaintext")
    }

    /// Explorer entries flattened to (name, kind) for the host UI.
    pub fn explorer_entries(&self) -> Vec<(&str, NodeKind)> {
        self.files
            .tree
            .iter()
            .map(|n| (n.name.as_str(), n.kind))
            .collect()
    }
}
