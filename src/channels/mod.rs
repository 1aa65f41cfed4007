//! Messaging channel configuration.
//!
//! Each channel is a [`ChannelSchema`] in [`registry`]; one routine gates and
//! applies all of them.

pub mod registry;

pub use crate::schema::Gate;
pub use registry::CHANNELS;

use serde_json::{Map, Value};
use tracing::info;

use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::schema::{apply_field_mappings, as_object_mut, ensure_path, is_truthy, FieldMapping};

/// Declarative description of one messaging integration.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSchema {
    /// Key under `channels`.
    pub key: &'static str,
    pub gate: Gate,
    /// Fields receiving the gate variables' values verbatim, parallel to
    /// `gate.vars()`.
    pub token_fields: &'static [&'static str],
    /// Merge into an existing entry instead of replacing it.
    pub merge: bool,
    pub fields: &'static [FieldMapping],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// Gate open: entry written from the environment.
    Configured,
    /// Gate closed but an entry was already present; left as is.
    Untouched,
    /// Gate closed and nothing configured.
    Absent,
}

/// Apply every registered channel, in declaration order.
pub fn configure_channels(
    doc: &mut Value,
    env: &EnvSnapshot,
) -> Result<Vec<(&'static str, ChannelOutcome)>, ConfigureError> {
    configure_channel_schemas(doc, env, CHANNELS)
}

pub fn configure_channel_schemas(
    doc: &mut Value,
    env: &EnvSnapshot,
    schemas: &[ChannelSchema],
) -> Result<Vec<(&'static str, ChannelOutcome)>, ConfigureError> {
    let mut outcomes = Vec::with_capacity(schemas.len());
    for schema in schemas {
        outcomes.push((schema.key, apply_channel(doc, env, schema)?));
    }

    let channels_empty = doc
        .get("channels")
        .and_then(Value::as_object)
        .is_some_and(Map::is_empty);
    if channels_empty {
        if let Some(root) = doc.as_object_mut() {
            root.shift_remove("channels");
        }
    }

    Ok(outcomes)
}

fn apply_channel(
    doc: &mut Value,
    env: &EnvSnapshot,
    schema: &ChannelSchema,
) -> Result<ChannelOutcome, ConfigureError> {
    let key = schema.key;

    if !schema.gate.is_open(env) {
        let existing = doc
            .get("channels")
            .and_then(|channels| channels.get(key))
            .is_some_and(is_truthy);
        if existing {
            info!("{key} channel configured (from custom JSON)");
            return Ok(ChannelOutcome::Untouched);
        }
        return Ok(ChannelOutcome::Absent);
    }

    info!("configuring {key} channel (from env)");
    let channels = ensure_path(doc, "channels");
    if !schema.merge {
        channels.insert(key.to_string(), Value::Object(Map::new()));
    }
    let node = channels.entry(key.to_string()).or_insert(Value::Null);

    let entry = as_object_mut(node);
    entry.insert("enabled".into(), Value::Bool(true));
    for (var, field) in schema.gate.vars().iter().zip(schema.token_fields) {
        if let Some(token) = env.get(var) {
            entry.insert((*field).to_string(), token.into());
        }
    }

    apply_field_mappings(node, schema.fields, env)?;
    Ok(ChannelOutcome::Configured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
        vars.iter().copied().collect()
    }

    #[test]
    fn telegram_fields_are_typed() {
        let mut doc = json!({});
        let outcomes = configure_channels(
            &mut doc,
            &env(&[
                ("TELEGRAM_BOT_TOKEN", "123:abc"),
                ("TELEGRAM_DM_POLICY", "pairing"),
                ("TELEGRAM_ACTIONS_STICKER", "true"),
                ("TELEGRAM_LINK_PREVIEW", "false"),
                ("TELEGRAM_TEXT_CHUNK_LIMIT", "3500"),
                ("TELEGRAM_ALLOW_FROM", "12345, @bob"),
            ]),
        )
        .unwrap();
        assert_eq!(outcomes[0], ("telegram", ChannelOutcome::Configured));
        assert_eq!(
            doc,
            json!({"channels": {"telegram": {
                "enabled": true,
                "botToken": "123:abc",
                "dmPolicy": "pairing",
                "linkPreview": false,
                "actions": {"sticker": true},
                "textChunkLimit": 3500,
                "allowFrom": [12345, "@bob"]
            }}})
        );
    }

    #[test]
    fn slack_needs_both_tokens() {
        let mut doc = json!({"channels": {"slack": {"enabled": true, "botToken": "old"}}});
        let before = doc.clone();
        let outcomes = configure_channels(&mut doc, &env(&[("SLACK_BOT_TOKEN", "xoxb")])).unwrap();
        assert!(outcomes.contains(&("slack", ChannelOutcome::Untouched)));
        assert_eq!(doc, before);

        let mut fresh = json!({});
        configure_channels(&mut fresh, &env(&[("SLACK_BOT_TOKEN", "xoxb")])).unwrap();
        assert!(fresh.get("channels").is_none());
    }

    #[test]
    fn slack_copies_parallel_tokens() {
        let mut doc = json!({});
        configure_channels(
            &mut doc,
            &env(&[("SLACK_BOT_TOKEN", "xoxb-1"), ("SLACK_APP_TOKEN", "xapp-1")]),
        )
        .unwrap();
        assert_eq!(doc["channels"]["slack"]["botToken"], "xoxb-1");
        assert_eq!(doc["channels"]["slack"]["appToken"], "xapp-1");
    }

    #[test]
    fn merge_keeps_persisted_fields() {
        let mut doc = json!({"channels": {"discord": {"guilds": {"1": {}}, "token": "old"}}});
        configure_channels(&mut doc, &env(&[("DISCORD_BOT_TOKEN", "new")])).unwrap();
        assert_eq!(
            doc["channels"]["discord"],
            json!({"guilds": {"1": {}}, "token": "new", "enabled": true})
        );
    }

    #[test]
    fn whatsapp_replaces_persisted_entry() {
        let mut doc = json!({"channels": {"whatsapp": {"stale": 1}}});
        configure_channels(
            &mut doc,
            &env(&[("WHATSAPP_ENABLED", "1"), ("WHATSAPP_ALLOW_FROM", "+1555,+1666")]),
        )
        .unwrap();
        assert_eq!(
            doc["channels"]["whatsapp"],
            json!({"enabled": true, "allowFrom": ["+1555", "+1666"]})
        );
    }

    #[test]
    fn whatsapp_flag_must_be_true_or_one() {
        let mut doc = json!({});
        configure_channels(&mut doc, &env(&[("WHATSAPP_ENABLED", "yes")])).unwrap();
        assert!(doc.get("channels").is_none());
    }

    #[test]
    fn empty_channels_object_is_removed() {
        let mut doc = json!({"channels": {}, "gateway": {}});
        configure_channels(&mut doc, &EnvSnapshot::default()).unwrap();
        assert_eq!(doc, json!({"gateway": {}}));
    }

    #[test]
    fn bad_integer_field_is_fatal() {
        let mut doc = json!({});
        let err = configure_channels(
            &mut doc,
            &env(&[("DISCORD_BOT_TOKEN", "t"), ("DISCORD_HISTORY_LIMIT", "many")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigureError::InvalidField { .. }));
    }
}
