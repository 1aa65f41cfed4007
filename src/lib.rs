//! Resolves the OpenClaw gateway document (`openclaw.json`) and the Caddy
//! snippets fronting it from a bundled document, a persisted document and the
//! process environment.

pub mod caddy;
pub mod channels;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod features;
pub mod logging;
pub mod paths;
pub mod pipeline;
pub mod providers;
pub mod schema;

pub use env::EnvSnapshot;
pub use error::{ConfigureError, Result};
pub use paths::Paths;
pub use pipeline::{Configurator, Resolution};
