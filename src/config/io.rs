use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigureError;

/// Maximum size for a config file (10 MB).
pub const MAX_CONFIG_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Parse a JSON document, falling back to JSON5 syntax.
///
/// Strict JSON is tried first: `json5` cannot hold integers above `i64::MAX`.
pub fn parse_config_json(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(_) => Ok(json5::from_str(content)?),
    }
}

/// Read a config file, rejecting anything above `MAX_CONFIG_FILE_BYTES`.
fn read_config_text(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot stat config file '{}'", path.display()))?;

    if metadata.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "Config file '{}' is {} bytes, exceeds limit of {} bytes",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_BYTES,
        );
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))
}

/// Read and parse a hand-written configuration document.
///
/// The format is chosen by extension: `.yaml`/`.yml`, `.toml`, anything else
/// is parsed as JSON (JSON5 accepted).
pub fn read_config_document(path: &Path) -> Result<Value> {
    let content = read_config_text(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let value: Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in '{}'", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in '{}'", path.display()))?,
        _ => parse_config_json(&content)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))?,
    };
    Ok(value)
}

/// Read a document previously written by [`write_config_file`].
///
/// Always JSON, whatever the extension of `path`.
pub fn read_persisted_document(path: &Path) -> Result<Value> {
    let content = read_config_text(path)?;
    parse_config_json(&content).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

/// Render a document the way it is written to disk (2-space indented JSON).
pub fn render_config(config: &Value) -> Result<String, ConfigureError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Compute a hash of a rendered configuration for change detection.
pub fn resolve_config_snapshot_hash(rendered: &str) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(rendered.as_bytes()))
}

/// Write `content` to `path` atomically with owner-only permissions.
///
/// The parent directory is created if needed. Content goes to a temp file in
/// the same directory which is then renamed over `path`.
pub fn write_private_file(path: &Path, content: &str) -> Result<(), ConfigureError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ConfigureError::write(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigureError::write(path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ConfigureError::write(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o600))
            .map_err(|e| ConfigureError::write(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| ConfigureError::write(path, e.error))?;
    debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Write the final document and return the hash of the written bytes.
pub fn write_config_file(path: &Path, config: &Value) -> Result<String, ConfigureError> {
    let rendered = render_config(config)?;
    write_private_file(path, &rendered)?;
    Ok(resolve_config_snapshot_hash(&rendered))
}

/// Write a plain text artifact, creating its directory.
pub fn write_text_file(path: &Path, content: &str) -> Result<(), ConfigureError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigureError::write(dir, e))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigureError::write(path, e))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_json_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, r#"{"gateway": {"port": 18789}}"#).unwrap();

        let config = read_config_document(&file).unwrap();
        assert_eq!(config["gateway"]["port"], 18789);
    }

    #[test]
    fn read_json5_with_comments() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("openclaw.json");
        fs::write(&file, "{\n  // bundled\n  gateway: { port: 1, },\n}").unwrap();

        let config = read_config_document(&file).unwrap();
        assert_eq!(config["gateway"]["port"], 1);
    }

    #[test]
    fn read_yaml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.yaml");
        fs::write(&file, "gateway:\n  port: 18789\n").unwrap();

        let config = read_config_document(&file).unwrap();
        assert_eq!(config["gateway"]["port"], 18789);
    }

    #[test]
    fn read_toml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[gateway]\nmode = \"local\"\n").unwrap();

        let config = read_config_document(&file).unwrap();
        assert_eq!(config["gateway"]["mode"], "local");
    }

    #[test]
    fn reject_oversized_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("huge.json");
        let content = "x".repeat((MAX_CONFIG_FILE_BYTES + 1) as usize);
        fs::write(&file, content).unwrap();

        let result = read_config_document(&file);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds limit"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(&file, "{ not json").unwrap();
        assert!(read_config_document(&file).is_err());
    }

    #[test]
    fn write_creates_parent_and_is_owner_only() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("openclaw.json");
        let hash = write_config_file(&file, &serde_json::json!({"a": {"b": 1}})).unwrap();

        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(written, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
        assert_eq!(hash, resolve_config_snapshot_hash(&written));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&file).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn json_accepts_integers_beyond_i64() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("openclaw.json");
        fs::write(&file, r#"{"meta": {"seq": 18446744073709551615}}"#).unwrap();

        let config = read_config_document(&file).unwrap();
        assert_eq!(config["meta"]["seq"], serde_json::json!(u64::MAX));
    }

    #[test]
    fn persisted_document_is_json_whatever_the_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("openclaw.toml");
        write_config_file(&file, &serde_json::json!({"gateway": {"port": 1}})).unwrap();

        assert!(read_config_document(&file).is_err());
        let config = read_persisted_document(&file).unwrap();
        assert_eq!(config, serde_json::json!({"gateway": {"port": 1}}));
    }

    #[test]
    fn hash_deterministic() {
        let h1 = resolve_config_snapshot_hash("{\"key\": \"value\"}");
        let h2 = resolve_config_snapshot_hash("{\"key\": \"value\"}");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }
}
