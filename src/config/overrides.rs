//! `OPENCLAW_JSON__a__b__c=value` convention overrides.
//!
//! Applied after every schema stage, so they win over anything written from
//! the typed registries.

use serde_json::Value;
use tracing::{info, warn};

use super::defaults::CONVENTION_PREFIX;
use crate::env::EnvSnapshot;
use crate::schema::set_at_path;

/// Apply every convention variable in name order and return the paths written.
pub fn apply_convention_overrides(doc: &mut Value, env: &EnvSnapshot) -> Vec<String> {
    let mut applied = Vec::new();
    for (var, raw) in env.with_prefix(CONVENTION_PREFIX) {
        let path = var[CONVENTION_PREFIX.len()..].replace("__", ".");
        if path.split('.').any(str::is_empty) {
            warn!("ignoring {var}: derived path {path:?} has an empty segment");
            continue;
        }
        set_at_path(doc, &path, auto_type(raw));
        info!("convention override: {path}");
        applied.push(path);
    }
    applied
}

/// Infer a value from untyped override text.
///
/// Numeric-looking strings always become numbers, so a string-typed field
/// cannot be set to `"123"` through this path. Integers outside the
/// `i64`/`u64` range stay strings rather than losing digits as floats.
pub fn auto_type(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return Value::from(n);
    }
    if is_integer_literal(trimmed) {
        return Value::String(raw.to_string());
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }

    if raw.starts_with('[') || raw.starts_with('{') {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
