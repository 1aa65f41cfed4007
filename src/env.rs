//! Read-only snapshot of the process environment.
//!
//! The snapshot is captured once at startup and handed to every stage, so a
//! run never observes the environment changing underneath it and iteration
//! over prefixed variables is always in the same (lexicographic) order.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Raw value of `var`, including the empty string when set but blank.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// Value of `var` if it is set to something non-empty.
    pub fn non_empty(&self, var: &str) -> Option<&str> {
        self.get(var).filter(|v| !v.is_empty())
    }

    /// Whether `var` is set to a non-empty value.
    pub fn is_set(&self, var: &str) -> bool {
        self.non_empty(var).is_some()
    }

    /// Whether `var` is `true` or `1` (case-insensitive).
    pub fn is_flag_on(&self, var: &str) -> bool {
        self.get(var)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    /// `var` if non-empty, else `default`.
    pub fn get_or<'a>(&'a self, var: &str, default: &'a str) -> &'a str {
        self.non_empty(var).unwrap_or(default)
    }

    /// All variables starting with `prefix`, ordered by name.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.vars
            .range(prefix.to_string()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
