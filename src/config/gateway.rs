//! Gateway and agent defaults applied right after loading.

use serde_json::Value;
use tracing::info;

use super::defaults::{DEFAULT_GATEWAY_MODE, DEFAULT_GATEWAY_PORT};
use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::paths::Paths;
use crate::schema::{ensure_path, is_truthy};

/// Fill in `gateway.*` and `agents.defaults.*`.
///
/// Values already present in the document are kept unless an environment
/// variable explicitly overrides them.
pub fn apply_gateway_defaults(
    doc: &mut Value,
    env: &EnvSnapshot,
    paths: &Paths,
) -> Result<(), ConfigureError> {
    let gateway = ensure_path(doc, "gateway");

    if let Some(raw) = env.non_empty("OPENCLAW_GATEWAY_PORT") {
        let port: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigureError::InvalidEnvInteger {
                var: "OPENCLAW_GATEWAY_PORT".to_string(),
                raw: raw.to_string(),
            })?;
        gateway.insert("port".into(), port.into());
    } else if !gateway.get("port").is_some_and(is_truthy) {
        gateway.insert("port".into(), DEFAULT_GATEWAY_PORT.into());
    }

    if !gateway.get("mode").is_some_and(is_truthy) {
        gateway.insert("mode".into(), DEFAULT_GATEWAY_MODE.into());
    }

    let token = env.get("OPENCLAW_GATEWAY_TOKEN").unwrap_or("").trim();
    if !token.is_empty() {
        let auth = ensure_path(doc, "gateway.auth");
        auth.insert("mode".into(), "token".into());
        auth.insert("token".into(), token.into());
        info!("gateway token auth configured");
    }

    let control_ui = ensure_path(doc, "gateway.controlUi");
    for key in ["allowInsecureAuth", "enabled"] {
        if control_ui.get(key).map_or(true, Value::is_null) {
            control_ui.insert(key.into(), Value::Bool(true));
        }
    }

    let defaults = ensure_path(doc, "agents.defaults");
    if !defaults.get("workspace").is_some_and(is_truthy) {
        defaults.insert(
            "workspace".into(),
            paths.workspace_dir.to_string_lossy().into_owned().into(),
        );
    }
    ensure_path(doc, "agents.defaults.model");

    Ok(())
}
