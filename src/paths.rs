//! Filesystem locations used by a configure run.

use std::path::PathBuf;

use crate::config::{
    DEFAULT_CADDY_DIR, DEFAULT_CUSTOM_CONFIG, DEFAULT_STATE_DIR, DEFAULT_WORKSPACE_DIR,
    CONFIG_FILE_NAME,
};
use crate::env::EnvSnapshot;

/// Resolved locations for state, workspace, documents and proxy snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub state_dir: PathBuf,
    pub workspace_dir: PathBuf,
    /// Persisted document, read on load and rewritten at the end of the run.
    pub config_file: PathBuf,
    /// Bundled override document.
    pub custom_config: PathBuf,
    /// Directory receiving `auth.caddyfile` and `hooks.caddyfile`.
    pub caddy_dir: PathBuf,
}

impl Paths {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let state_dir = trim_trailing_slash(env.get_or("OPENCLAW_STATE_DIR", DEFAULT_STATE_DIR));
        let workspace_dir =
            trim_trailing_slash(env.get_or("OPENCLAW_WORKSPACE_DIR", DEFAULT_WORKSPACE_DIR));

        let config_file = env
            .non_empty("OPENCLAW_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&state_dir).join(CONFIG_FILE_NAME));

        Self {
            state_dir: PathBuf::from(state_dir),
            workspace_dir: PathBuf::from(workspace_dir),
            config_file,
            custom_config: PathBuf::from(env.get_or("OPENCLAW_CUSTOM_CONFIG", DEFAULT_CUSTOM_CONFIG)),
            caddy_dir: PathBuf::from(env.get_or("OPENCLAW_CADDY_DIR", DEFAULT_CADDY_DIR)),
        }
    }

    pub fn with_caddy_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.caddy_dir = dir.into();
        self
    }
}

/// Strip trailing `/`, keeping a bare root intact.
fn trim_trailing_slash(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
