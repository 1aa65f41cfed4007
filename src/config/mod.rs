//! The `openclaw.json` document: loading, defaults, overrides, validation, output.

mod defaults;
mod gateway;
mod io;
pub mod loader;
mod overrides;
mod types;
mod validation;

pub use defaults::*;
pub use gateway::apply_gateway_defaults;
pub use io::*;
pub use loader::{load, LoadedConfig};
pub use overrides::{apply_convention_overrides, auto_type};
pub use types::*;
pub use validation::*;
