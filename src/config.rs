use std::path::PathBuf;

/// IDE configuration loaded from environment variables.
pub struct IdeConfig {
    /// Directory the local sandbox mounts its workspace under.
    pub workspace_root: PathBuf,
    pub playground: PlaygroundConfig,
}

/// Remote compile-and-run service settings. Channel, mode, edition and
/// crate type are fixed compilation parameters, never user-controlled.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    pub endpoint: String,
    pub channel: String,
    pub mode: String,
    pub edition: String,
    pub crate_type: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://play.rust-lang.org/execute".into(),
            channel: "stable".into(),
            mode: "debug".into(),
            edition: "2021".into(),
            crate_type: "bin".into(),
        }
    }
}

impl IdeConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_raw_values(
            std::env::var("ATELIER_WORKSPACE_DIR").ok().as_deref(),
            std::env::var("ATELIER_PLAYGROUND_URL").ok().as_deref(),
            std::env::var("ATELIER_PLAYGROUND_CHANNEL").ok().as_deref(),
            std::env::var("ATELIER_PLAYGROUND_MODE").ok().as_deref(),
            std::env::var("ATELIER_PLAYGROUND_EDITION").ok().as_deref(),
        )
    }

    /// Build a config from raw string values (as they would come from
    /// env vars). Used directly in tests to avoid mutating the
    /// process-global environment.
    pub fn from_raw_values(
        workspace_root: Option<&str>,
        endpoint: Option<&str>,
        channel: Option<&str>,
        mode: Option<&str>,
        edition: Option<&str>,
    ) -> Self {
        let workspace_root = workspace_root
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("atelier-workspace"));

        let mut playground = PlaygroundConfig::default();
        if let Some(endpoint) = endpoint.filter(|s| !s.is_empty()) {
            playground.endpoint = endpoint.to_string();
        }
        if let Some(channel) = channel.filter(|s| !s.is_empty()) {
            playground.channel = channel.to_string();
        }
        if let Some(mode) = mode.filter(|s| !s.is_empty()) {
            playground.mode = mode.to_string();
        }
        if let Some(edition) = edition.filter(|s| !s.is_empty()) {
            playground.edition = edition.to_string();
        }

        IdeConfig {
            workspace_root,
            playground,
        }
    }
}
