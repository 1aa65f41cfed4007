//! Error types for the configuration engine.

use std::path::PathBuf;

use crate::schema::FieldType;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, ConfigureError>;

/// A raw environment string that could not be coerced to its declared type.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("expected {kind} but got {raw:?}")]
    InvalidInteger {
        kind: FieldType,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Errors that abort a configure run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigureError {
    /// A schema-driven field carried a value of the wrong type.
    #[error("invalid value for {var} (-> {path}): {source}")]
    InvalidField {
        var: String,
        path: String,
        #[source]
        source: SchemaError,
    },

    /// A standalone environment variable that must be an integer was not.
    #[error("invalid value for environment variable {var}: {raw:?} is not an integer")]
    InvalidEnvInteger { var: String, raw: String },

    /// No credential for any model provider was found.
    #[error(
        "No AI provider API key set. Providers require an env var -- API keys are never read \
         from the JSON config. Set one of: {}",
        .signals.join(", ")
    )]
    NoProvider { signals: Vec<String> },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigureError {
    /// Creates a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
