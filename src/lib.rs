//! In-browser-style IDE sandbox core: a workspace filesystem, a
//! process supervisor, an interactive terminal, and per-language
//! execution strategies (native interpreter or remote compile-and-run).
//!
//! [`IdeShell`] is the entry point; it owns the terminal, the editor
//! file models, and the single foreground process session.

pub mod config;
pub mod ide;
pub mod playground;
pub mod runtime;
pub mod sandbox;
pub mod session;
pub mod terminal;

pub use config::IdeConfig;
pub use ide::IdeShell;
pub use runtime::Language;
