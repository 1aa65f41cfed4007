//! One configure run: load, apply every stage in order, validate, write.

use serde_json::Value;
use tracing::info;

use crate::caddy::{self, PasswordHasher};
use crate::channels::{configure_channels, ChannelOutcome};
use crate::config::{
    apply_convention_overrides, apply_gateway_defaults, load, validate_providers, write_config_file,
};
use crate::env::EnvSnapshot;
use crate::error::{ConfigureError, Result};
use crate::features::{configure_feature, FeatureOutcome, BROWSER, HOOKS, TRANSCRIPTION};
use crate::paths::Paths;
use crate::providers::{resolve_providers, DerivedSignals, ProviderReport};

/// Final document plus what each stage decided.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub document: Value,
    pub custom_loaded: bool,
    pub providers: ProviderReport,
    pub channels: Vec<(&'static str, ChannelOutcome)>,
    pub features: Vec<(&'static str, FeatureOutcome)>,
    /// Paths written by `OPENCLAW_JSON__*` variables.
    pub overrides: Vec<String>,
}

/// Drives a configure run against one environment snapshot.
pub struct Configurator<'a> {
    env: &'a EnvSnapshot,
    paths: Paths,
}

impl<'a> Configurator<'a> {
    pub fn new(env: &'a EnvSnapshot, paths: Paths) -> Self {
        Self { env, paths }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Build the final document without touching the filesystem beyond reads.
    ///
    /// Fails when a typed variable is malformed or no provider credential is set.
    pub fn resolve(&self) -> Result<Resolution> {
        let env = self.env;
        info!("state dir: {}", self.paths.state_dir.display());
        info!("workspace dir: {}", self.paths.workspace_dir.display());
        info!("config file: {}", self.paths.config_file.display());

        let loaded = load(&self.paths);
        let mut doc = loaded.document;
        let derived = DerivedSignals::from_env(env);

        apply_gateway_defaults(&mut doc, env, &self.paths)?;
        let providers = resolve_providers(&mut doc, env, &derived, loaded.custom_loaded)?;

        let mut features = Vec::with_capacity(3);
        features.push((TRANSCRIPTION.name, configure_feature(&mut doc, env, &TRANSCRIPTION)?));
        let channels = configure_channels(&mut doc, env)?;
        for feature in [&BROWSER, &HOOKS] {
            features.push((feature.name, configure_feature(&mut doc, env, feature)?));
        }

        let overrides = apply_convention_overrides(&mut doc, env);
        validate_providers(env, &derived)?;

        Ok(Resolution {
            document: doc,
            custom_loaded: loaded.custom_loaded,
            providers,
            channels,
            features,
            overrides,
        })
    }

    /// Resolve, then write the document and both proxy snippets.
    ///
    /// Nothing is written if resolution fails.
    pub fn apply(&self, hasher: &dyn PasswordHasher) -> Result<Resolution> {
        let resolution = self.resolve()?;

        for dir in [&self.paths.state_dir, &self.paths.workspace_dir] {
            std::fs::create_dir_all(dir).map_err(|e| ConfigureError::write(dir, e))?;
        }

        let hash = write_config_file(&self.paths.config_file, &resolution.document)?;
        info!(
            "wrote {} (sha256 {})",
            self.paths.config_file.display(),
            &hash[..12]
        );

        caddy::write_snippets(&self.paths.caddy_dir, &resolution.document, self.env, hasher)?;
        Ok(resolution)
    }
}
