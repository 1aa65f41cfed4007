//! Single-entry feature configurators: transcription, remote browser, hooks.
//!
//! Each feature sets `enabled = true` when its gate opens. For the browser this
//! marker is the only field not taken from a `BROWSER_*` variable.

use serde_json::{json, Value};
use tracing::info;

use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::schema::FieldMapping as F;
use crate::schema::FieldType::{BoolFalse, Int, Str};
use crate::schema::{apply_field_mappings, ensure_path, get_at_path, is_truthy, FieldMapping, Gate};

/// One optional subtree of the document, enabled by a gate.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSchema {
    pub name: &'static str,
    /// Dot path of the subtree.
    pub path: &'static str,
    pub gate: Gate,
    /// Fixed fields set whenever the gate is open.
    pub markers: fn() -> Vec<(&'static str, Value)>,
    pub fields: &'static [FieldMapping],
}

fn enabled_marker() -> Vec<(&'static str, Value)> {
    vec![("enabled", Value::Bool(true))]
}

fn deepgram_markers() -> Vec<(&'static str, Value)> {
    vec![
        ("enabled", Value::Bool(true)),
        ("models", json!([{"provider": "deepgram", "model": "nova-3"}])),
    ]
}

pub const TRANSCRIPTION: FeatureSchema = FeatureSchema {
    name: "Deepgram transcription",
    path: "tools.media.audio",
    gate: Gate::Present("DEEPGRAM_API_KEY"),
    markers: deepgram_markers,
    fields: &[],
};

pub const BROWSER: FeatureSchema = FeatureSchema {
    name: "browser tool (remote CDP)",
    path: "browser",
    gate: Gate::Present("BROWSER_CDP_URL"),
    markers: enabled_marker,
    fields: &[
        F::new("BROWSER_CDP_URL", "cdpUrl", Str),
        F::new("BROWSER_EVALUATE_ENABLED", "evaluateEnabled", BoolFalse),
        F::new("BROWSER_SNAPSHOT_MODE", "snapshotDefaults.mode", Str),
        F::new("BROWSER_REMOTE_TIMEOUT_MS", "remoteCdpTimeoutMs", Int),
        F::new("BROWSER_REMOTE_HANDSHAKE_TIMEOUT_MS", "remoteCdpHandshakeTimeoutMs", Int),
        F::new("BROWSER_DEFAULT_PROFILE", "defaultProfile", Str),
    ],
};

pub const HOOKS: FeatureSchema = FeatureSchema {
    name: "hooks",
    path: "hooks",
    gate: Gate::Flag("HOOKS_ENABLED"),
    markers: enabled_marker,
    fields: &[
        F::new("HOOKS_TOKEN", "token", Str),
        F::new("HOOKS_PATH", "path", Str),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOutcome {
    Configured,
    /// Gate closed, subtree already present in a loaded document.
    Untouched,
    Absent,
}

/// Gate and apply one feature.
pub fn configure_feature(
    doc: &mut Value,
    env: &EnvSnapshot,
    feature: &FeatureSchema,
) -> Result<FeatureOutcome, ConfigureError> {
    if !feature.gate.is_open(env) {
        if get_at_path(doc, feature.path).is_some_and(is_truthy) {
            info!("{} configured (from custom JSON)", feature.name);
            return Ok(FeatureOutcome::Untouched);
        }
        return Ok(FeatureOutcome::Absent);
    }

    info!("configuring {} (from env)", feature.name);
    let node = ensure_path(doc, feature.path);
    for (key, value) in (feature.markers)() {
        node.insert(key.to_string(), value);
    }

    // `ensure_path` hands back the map; field mappings need the enclosing value.
    let mut subtree = Value::Object(std::mem::take(node));
    apply_field_mappings(&mut subtree, feature.fields, env)?;
    if let Value::Object(map) = subtree {
        *node = map;
    }
    Ok(FeatureOutcome::Configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
        vars.iter().copied().collect()
    }

    #[test]
    fn transcription_sets_deepgram_model() {
        let mut doc = json!({"tools": {"media": {"audio": {"language": "en"}}}});
        let outcome =
            configure_feature(&mut doc, &env(&[("DEEPGRAM_API_KEY", "dg")]), &TRANSCRIPTION).unwrap();
        assert_eq!(outcome, FeatureOutcome::Configured);
        assert_eq!(
            doc["tools"]["media"]["audio"],
            json!({
                "language": "en",
                "enabled": true,
                "models": [{"provider": "deepgram", "model": "nova-3"}]
            })
        );
    }

    #[test]
    fn browser_fields_are_typed() {
        let mut doc = json!({});
        configure_feature(
            &mut doc,
            &env(&[
                ("BROWSER_CDP_URL", "ws://chrome:9222"),
                ("BROWSER_EVALUATE_ENABLED", "true"),
                ("BROWSER_REMOTE_TIMEOUT_MS", "1500"),
                ("BROWSER_SNAPSHOT_MODE", "efficient"),
            ]),
            &BROWSER,
        )
        .unwrap();
        assert_eq!(
            doc,
            json!({"browser": {
                "enabled": true,
                "cdpUrl": "ws://chrome:9222",
                "evaluateEnabled": true,
                "snapshotDefaults": {"mode": "efficient"},
                "remoteCdpTimeoutMs": 1500
            }})
        );
    }

    #[test]
    fn hooks_flag_and_fields() {
        let mut doc = json!({});
        configure_feature(
            &mut doc,
            &env(&[("HOOKS_ENABLED", "TRUE"), ("HOOKS_TOKEN", "t"), ("HOOKS_PATH", "/wh")]),
            &HOOKS,
        )
        .unwrap();
        assert_eq!(doc, json!({"hooks": {"enabled": true, "token": "t", "path": "/wh"}}));
    }

    #[test]
    fn closed_gate_reports_existing_subtree() {
        let mut doc = json!({"hooks": {"enabled": true}});
        let outcome =
            configure_feature(&mut doc, &env(&[("HOOKS_ENABLED", "no")]), &HOOKS).unwrap();
        assert_eq!(outcome, FeatureOutcome::Untouched);
        assert_eq!(doc, json!({"hooks": {"enabled": true}}));

        let mut empty = json!({});
        let outcome = configure_feature(&mut empty, &EnvSnapshot::default(), &BROWSER).unwrap();
        assert_eq!(outcome, FeatureOutcome::Absent);
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn malformed_browser_timeout_is_fatal() {
        let mut doc = json!({});
        let err = configure_feature(
            &mut doc,
            &env(&[("BROWSER_CDP_URL", "ws://x"), ("BROWSER_REMOTE_TIMEOUT_MS", "soon")]),
            &BROWSER,
        )
        .unwrap_err();
        assert!(err.to_string().contains("BROWSER_REMOTE_TIMEOUT_MS"));
    }
}
