//! Generic schema primitives: typed env parsing, dot-path access, deep merge.
//!
//! Every integration (channels, browser, hooks, ...) is described as a static
//! list of [`FieldMapping`]s and applied through [`apply_field_mappings`], so
//! adding a field never needs new code.

use serde_json::{Map, Value};
use std::fmt;

use crate::env::EnvSnapshot;
use crate::error::{ConfigureError, SchemaError};

// ============================================================================
// Field Types
// ============================================================================

/// How a raw environment string is coerced into a document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Passthrough string.
    Str,
    /// Integer. Surrounding whitespace is ignored.
    Int,
    /// Boolean that is on unless the value is `false`.
    BoolTrue,
    /// Boolean that is off unless the value is `true`.
    BoolFalse,
    /// Comma-separated list of strings, blanks dropped.
    Csv,
    /// Comma-separated list where numeric items become integers (chat user ids).
    CsvSmart,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Str => "string",
            FieldType::Int => "integer",
            FieldType::BoolTrue | FieldType::BoolFalse => "boolean",
            FieldType::Csv => "list",
            FieldType::CsvSmart => "mixed list",
        };
        f.write_str(name)
    }
}

/// One `(env var, dot path, type)` entry of a field registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub env: &'static str,
    pub path: &'static str,
    pub kind: FieldType,
}

impl FieldMapping {
    pub const fn new(env: &'static str, path: &'static str, kind: FieldType) -> Self {
        Self { env, path, kind }
    }
}

/// Parse an environment string according to `kind`.
pub fn parse_typed_value(raw: &str, kind: FieldType) -> Result<Value, SchemaError> {
    let value = match kind {
        FieldType::Str => Value::String(raw.to_string()),
        FieldType::Int => {
            let n = raw
                .trim()
                .parse::<i64>()
                .map_err(|source| SchemaError::InvalidInteger {
                    kind,
                    raw: raw.to_string(),
                    source,
                })?;
            Value::from(n)
        }
        FieldType::BoolTrue => Value::Bool(!raw.eq_ignore_ascii_case("false")),
        FieldType::BoolFalse => Value::Bool(raw.eq_ignore_ascii_case("true")),
        FieldType::Csv => Value::Array(
            csv_items(raw)
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        FieldType::CsvSmart => Value::Array(
            csv_items(raw)
                .map(|item| match item.parse::<i64>() {
                    Ok(n) => Value::from(n),
                    Err(_) => Value::String(item.to_string()),
                })
                .collect(),
        ),
    };
    Ok(value)
}

fn csv_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Apply every mapping whose variable is set (even to an empty string).
///
/// Later mappings win when two target the same path.
pub fn apply_field_mappings(
    node: &mut Value,
    mappings: &[FieldMapping],
    env: &EnvSnapshot,
) -> Result<(), ConfigureError> {
    for mapping in mappings {
        let Some(raw) = env.get(mapping.env) else {
            continue;
        };
        let value =
            parse_typed_value(raw, mapping.kind).map_err(|source| ConfigureError::InvalidField {
                var: mapping.env.to_string(),
                path: mapping.path.to_string(),
                source,
            })?;
        set_at_path(node, mapping.path, value);
    }
    Ok(())
}

// ============================================================================
// Gates
// ============================================================================

/// Condition over the environment that enables a channel or feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The variable is non-empty.
    Present(&'static str),
    /// Every variable is non-empty.
    AllPresent(&'static [&'static str]),
    /// The variable is `true` or `1` (case-insensitive).
    Flag(&'static str),
}

impl Gate {
    pub fn is_open(&self, env: &EnvSnapshot) -> bool {
        match self {
            Gate::Present(var) => env.is_set(var),
            Gate::AllPresent(vars) => vars.iter().all(|var| env.is_set(var)),
            Gate::Flag(var) => env.is_flag_on(var),
        }
    }

    /// The variables this gate reads, in declaration order.
    pub fn vars(&self) -> &[&'static str] {
        match self {
            Gate::Present(var) | Gate::Flag(var) => std::slice::from_ref(var),
            Gate::AllPresent(vars) => vars,
        }
    }
}

// ============================================================================
// Path Access
// ============================================================================

/// Turn `node` into an object (discarding any non-object value) and return its map.
pub fn as_object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was replaced with an object above"),
    }
}

/// Ensure every segment of `path` is an object and return the innermost map.
///
/// Non-object nodes along the way are overwritten with `{}`.
pub fn ensure_path<'a>(doc: &'a mut Value, path: &str) -> &'a mut Map<String, Value> {
    let mut node = doc;
    for segment in path.split('.') {
        node = as_object_mut(node)
            .entry(segment.to_string())
            .or_insert(Value::Null);
    }
    as_object_mut(node)
}

/// Set `value` at a dot-separated `path`, creating intermediate objects.
pub fn set_at_path(doc: &mut Value, path: &str, value: Value) {
    let parent = match path.rsplit_once('.') {
        Some((parents, leaf)) => (ensure_path(doc, parents), leaf),
        None => (as_object_mut(doc), path),
    };
    let (map, leaf) = parent;
    map.insert(leaf.to_string(), value);
}

/// Value at a dot-separated `path`, or `None` as soon as a segment is missing
/// or a traversed node is not an object.
pub fn get_at_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |node, segment| node.as_object()?.get(segment))
}

/// Remove and return the value at `path`, if present.
pub fn remove_at_path(doc: &mut Value, path: &str) -> Option<Value> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    let mut node = doc;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            node = node.as_object_mut()?.get_mut(segment)?;
        }
    }
    node.as_object_mut()?.shift_remove(leaf)
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Whether the value at `path` exists and is truthy.
pub fn is_truthy_at(doc: &Value, path: &str) -> bool {
    get_at_path(doc, path).map(is_truthy).unwrap_or(false)
}

// ============================================================================
// Deep Merge
// ============================================================================

/// Deep merge `source` into `target`.
///
/// Objects merge key by key; any other value (arrays included) replaces the
/// target value outright.
pub fn merge_into(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                let recurse =
                    value.is_object() && target_map.get(&key).is_some_and(Value::is_object);
                match target_map.get_mut(&key) {
                    Some(existing) if recurse => merge_into(existing, value),
                    _ => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_passthrough_and_int() {
        assert_eq!(parse_typed_value("hello", FieldType::Str).unwrap(), json!("hello"));
        assert_eq!(parse_typed_value(" 42 ", FieldType::Int).unwrap(), json!(42));
        assert_eq!(parse_typed_value("-7", FieldType::Int).unwrap(), json!(-7));
    }

    #[test]
    fn parse_int_rejects_garbage() {
        let err = parse_typed_value("4k", FieldType::Int).unwrap_err();
        assert!(err.to_string().contains("integer"));
        assert!(err.to_string().contains("4k"));
    }

    #[test]
    fn parse_bools() {
        assert_eq!(parse_typed_value("FALSE", FieldType::BoolTrue).unwrap(), json!(false));
        assert_eq!(parse_typed_value("no", FieldType::BoolTrue).unwrap(), json!(true));
        assert_eq!(parse_typed_value("", FieldType::BoolTrue).unwrap(), json!(true));
        assert_eq!(parse_typed_value("True", FieldType::BoolFalse).unwrap(), json!(true));
        assert_eq!(parse_typed_value("1", FieldType::BoolFalse).unwrap(), json!(false));
    }

    #[test]
    fn parse_csv_trims_and_drops_blanks() {
        assert_eq!(
            parse_typed_value(" a, b ,,c ,", FieldType::Csv).unwrap(),
            json!(["a", "b", "c"])
        );
        assert_eq!(parse_typed_value("", FieldType::Csv).unwrap(), json!([]));
    }

    #[test]
    fn parse_csv_smart_mixes_ints_and_strings() {
        assert_eq!(
            parse_typed_value("123, @alice, -100456,", FieldType::CsvSmart).unwrap(),
            json!([123, "@alice", -100456])
        );
    }

    #[test]
    fn set_then_get_roundtrip_at_any_depth() {
        let mut doc = json!({});
        for path in ["a", "a2.b", "x.y.z.w"] {
            set_at_path(&mut doc, path, json!(path));
            assert_eq!(get_at_path(&doc, path), Some(&json!(path)));
        }
    }

    #[test]
    fn set_overwrites_scalar_intermediate() {
        let mut doc = json!({"actions": "legacy"});
        set_at_path(&mut doc, "actions.reactions", json!(true));
        assert_eq!(doc, json!({"actions": {"reactions": true}}));
    }

    #[test]
    fn set_on_non_object_root_resets_it() {
        let mut doc = json!([1, 2]);
        set_at_path(&mut doc, "k", json!(1));
        assert_eq!(doc, json!({"k": 1}));
    }

    #[test]
    fn get_stops_at_missing_or_non_object() {
        let doc = json!({"a": {"b": 1}, "s": "str"});
        assert_eq!(get_at_path(&doc, "a.c"), None);
        assert_eq!(get_at_path(&doc, "s.x"), None);
        assert_eq!(get_at_path(&doc, "a.b.c"), None);
        assert_eq!(get_at_path(&doc, "a").unwrap(), &json!({"b": 1}));
    }

    #[test]
    fn ensure_path_replaces_non_objects() {
        let mut doc = json!({"models": {"providers": null}});
        ensure_path(&mut doc, "models.providers").insert("x".into(), json!(1));
        assert_eq!(doc, json!({"models": {"providers": {"x": 1}}}));
    }

    #[test]
    fn remove_at_path_deletes_leaf_only() {
        let mut doc = json!({"models": {"providers": {"a": 1, "b": 2}}});
        assert_eq!(remove_at_path(&mut doc, "models.providers.a"), Some(json!(1)));
        assert_eq!(remove_at_path(&mut doc, "models.providers.zz"), None);
        assert_eq!(remove_at_path(&mut doc, "nope.x"), None);
        assert_eq!(doc, json!({"models": {"providers": {"b": 2}}}));
    }

    #[test]
    fn merge_disjoint_is_union() {
        let mut a = json!({"gateway": {"port": 1}});
        merge_into(&mut a, json!({"channels": {"x": true}}));
        assert_eq!(a, json!({"gateway": {"port": 1}, "channels": {"x": true}}));
    }

    #[test]
    fn merge_recurses_into_objects_and_replaces_arrays() {
        let mut a = json!({"a": {"x": 1, "list": [1, 2, 3]}, "b": 2});
        merge_into(&mut a, json!({"a": {"y": 3, "list": [9]}, "c": 4}));
        assert_eq!(a, json!({"a": {"x": 1, "list": [9], "y": 3}, "b": 2, "c": 4}));
    }

    #[test]
    fn merge_scalar_replaces_object() {
        let mut a = json!({"a": {"x": 1}});
        merge_into(&mut a, json!({"a": "flat"}));
        assert_eq!(a, json!({"a": "flat"}));
    }

    #[test]
    fn apply_mappings_uses_last_for_same_path() {
        let env: EnvSnapshot = [("A", "first"), ("B", "second")].into_iter().collect();
        let mappings = [
            FieldMapping::new("A", "same", FieldType::Str),
            FieldMapping::new("B", "same", FieldType::Str),
            FieldMapping::new("UNSET", "other", FieldType::Str),
        ];
        let mut node = json!({});
        apply_field_mappings(&mut node, &mappings, &env).unwrap();
        assert_eq!(node, json!({"same": "second"}));
    }

    #[test]
    fn apply_mappings_reports_variable_on_bad_int() {
        let env: EnvSnapshot = [("LIMIT", "lots")].into_iter().collect();
        let mappings = [FieldMapping::new("LIMIT", "textChunkLimit", FieldType::Int)];
        let err = apply_field_mappings(&mut json!({}), &mappings, &env).unwrap_err();
        assert!(err.to_string().contains("LIMIT"));
        assert!(err.to_string().contains("textChunkLimit"));
    }

    #[test]
    fn gates() {
        let env: EnvSnapshot = [("A", "x"), ("B", ""), ("F", "True")].into_iter().collect();
        assert!(Gate::Present("A").is_open(&env));
        assert!(!Gate::Present("B").is_open(&env));
        assert!(!Gate::AllPresent(&["A", "B"]).is_open(&env));
        assert!(Gate::AllPresent(&["A", "F"]).is_open(&env));
        assert!(Gate::Flag("F").is_open(&env));
        assert!(!Gate::Flag("A").is_open(&env));
        assert_eq!(Gate::AllPresent(&["A", "F"]).vars(), &["A", "F"]);
        assert_eq!(Gate::Present("A").vars(), &["A"]);
    }

    #[test]
    fn truthiness() {
        for v in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }
}
