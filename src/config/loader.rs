//! Builds the starting document from the bundled and persisted files.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

use super::io::{read_config_document, read_persisted_document};
use crate::paths::Paths;
use crate::schema::merge_into;

/// The document produced by the loader, before any env-driven step.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub document: Value,
    /// A bundled override document was found. Stale entries are then never
    /// removed automatically, since the operator authored them on purpose.
    pub custom_loaded: bool,
}

impl Default for LoadedConfig {
    fn default() -> Self {
        Self {
            document: Value::Object(Map::new()),
            custom_loaded: false,
        }
    }
}

/// Load the bundled override document, then deep-merge the persisted one on top.
pub fn load(paths: &Paths) -> LoadedConfig {
    let mut loaded = LoadedConfig::default();

    if let Some(custom) = read_object(&paths.custom_config, read_config_document) {
        info!("loaded custom config from {}", paths.custom_config.display());
        loaded.document = custom;
        loaded.custom_loaded = true;
    }

    match read_object(&paths.config_file, read_persisted_document) {
        Some(persisted) => {
            merge_into(&mut loaded.document, persisted);
            info!("merged persisted config from {}", paths.config_file.display());
        }
        None => info!("no persisted config found"),
    }

    loaded
}

/// Read a document that must be a JSON object; anything else counts as absent.
fn read_object(path: &Path, read: fn(&Path) -> anyhow::Result<Value>) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    match read(path) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            warn!("ignoring {}: top level is not an object", path.display());
            None
        }
        Err(e) => {
            warn!("ignoring {}: {:#}", path.display(), e);
            None
        }
    }
}
