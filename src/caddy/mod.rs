//! Caddy snippets imported by the front proxy: basic auth and hooks forwarding.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

use crate::config::{write_text_file, DEFAULT_AUTH_USERNAME, DEFAULT_HOOKS_PATH};
use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::schema::{get_at_path, is_truthy_at};

pub const AUTH_SNIPPET_FILE: &str = "auth.caddyfile";
pub const HOOKS_SNIPPET_FILE: &str = "hooks.caddyfile";

const EMPTY_AUTH_BLOCK: &str = "(auth_block) {}\n";

// ============================================================================
// Password Hashing
// ============================================================================

/// Produces a bcrypt hash Caddy's `basicauth` directive accepts.
pub trait PasswordHasher {
    fn hash_password(&self, plaintext: &str) -> Result<String>;
}

/// Shells out to `caddy hash-password`.
#[derive(Debug, Clone)]
pub struct CaddyHasher {
    pub program: String,
}

impl Default for CaddyHasher {
    fn default() -> Self {
        Self {
            program: "caddy".to_string(),
        }
    }
}

impl PasswordHasher for CaddyHasher {
    fn hash_password(&self, plaintext: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["hash-password", "--plaintext", plaintext])
            .output()
            .with_context(|| format!("failed to run '{}'", self.program))?;

        if !output.status.success() {
            bail!(
                "{} hash-password failed: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let hash = String::from_utf8(output.stdout)
            .context("hash-password printed non-UTF-8 output")?
            .trim()
            .to_string();
        if hash.is_empty() {
            bail!("{} hash-password printed nothing", self.program);
        }
        Ok(hash)
    }
}

/// In-process bcrypt, for images that do not ship the caddy binary.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    pub cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        // Same work factor `caddy hash-password` uses.
        Self { cost: 14 }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost).context("bcrypt hashing failed")
    }
}

// ============================================================================
// Snippets
// ============================================================================

/// `auth.caddyfile`: a basicauth block when `AUTH_PASSWORD` is set, else a no-op block.
///
/// Hashing failures degrade to the no-op block.
pub fn render_auth_snippet(env: &EnvSnapshot, hasher: &dyn PasswordHasher) -> String {
    let Some(password) = env.non_empty("AUTH_PASSWORD") else {
        info!("Caddy auth snippet: no AUTH_PASSWORD set (no auth)");
        return EMPTY_AUTH_BLOCK.to_string();
    };
    let username = env.get_or("AUTH_USERNAME", DEFAULT_AUTH_USERNAME);

    match hasher.hash_password(password) {
        Ok(hash) => {
            info!("Caddy auth snippet generated (basicauth enabled)");
            format!("(auth_block) {{\n    basicauth {{\n        {username} {hash}\n    }}\n}}\n")
        }
        Err(e) => {
            warn!("password hashing failed, auth disabled: {e:#}");
            EMPTY_AUTH_BLOCK.to_string()
        }
    }
}

/// `hooks.caddyfile`: forwards `<hooks.path>*` to the gateway when hooks are enabled.
pub fn render_hooks_snippet(doc: &Value, env: &EnvSnapshot) -> String {
    if !is_truthy_at(doc, "hooks.enabled") {
        return String::new();
    }

    let path = match get_at_path(doc, "hooks.path") {
        Some(Value::String(path)) => path.clone(),
        Some(Value::Null) | None => DEFAULT_HOOKS_PATH.to_string(),
        Some(other) => other.to_string(),
    };
    let port = env.get_or("OPENCLAW_GATEWAY_PORT", "18789");
    let token = env.get("OPENCLAW_GATEWAY_TOKEN").unwrap_or_default();

    info!("Caddy hooks snippet generated (path: {path})");
    format!(
        "handle {path}* {{\n    reverse_proxy localhost:{port} {{\n        header_up Authorization \"Bearer {token}\"\n    }}\n}}\n"
    )
}

/// Render and write both snippets into `dir`, creating it if needed.
pub fn write_snippets(
    dir: &Path,
    doc: &Value,
    env: &EnvSnapshot,
    hasher: &dyn PasswordHasher,
) -> Result<(), ConfigureError> {
    write_text_file(&dir.join(AUTH_SNIPPET_FILE), &render_auth_snippet(env, hasher))?;
    write_text_file(&dir.join(HOOKS_SNIPPET_FILE), &render_hooks_snippet(doc, env))?;
    Ok(())
}
