//! Model provider resolution.
//!
//! Decides which entries appear under `models.providers`, keeps built-in
//! providers out of it, and picks `agents.defaults.model.primary`.

pub mod catalog;

pub use catalog::{
    BaseUrl, BuiltinProvider, CatalogProvider, Signal, BUILTIN_PROVIDERS, CATALOG_PROVIDERS,
    PRIMARY_MODEL_PRIORITY,
};

use serde_json::{Map, Value};
use tracing::info;

use crate::config::{
    BedrockDiscoveryConfig, ModelApi, ModelProviderConfig, BEDROCK_REFRESH_INTERVAL_SECS,
    DEFAULT_AWS_REGION, DEFAULT_BEDROCK_PROVIDER_FILTER,
};
use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::schema::{ensure_path, is_truthy};
use catalog::{
    BEDROCK_ENVS, BEDROCK_KEY, BEDROCK_MODELS, OLLAMA_ENV, OLLAMA_KEY, OLLAMA_MODELS,
    OPENCODE_ENVS, OPENCODE_KEY,
};

// ============================================================================
// Derived Signals
// ============================================================================

/// Credentials resolved from more than one variable, computed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedSignals {
    /// `OPENCODE_API_KEY`, else `OPENCODE_ZEN_API_KEY`.
    pub opencode_key: Option<String>,
    /// `OLLAMA_BASE_URL` with trailing `/` removed, if non-empty.
    pub ollama_url: Option<String>,
}

impl DerivedSignals {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let opencode_key = OPENCODE_ENVS
            .iter()
            .find_map(|var| env.non_empty(var))
            .map(String::from);
        let ollama_url = env
            .get(OLLAMA_ENV)
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(String::from);
        Self {
            opencode_key,
            ollama_url,
        }
    }

    /// Both AWS credentials are present.
    pub fn has_aws_pair(env: &EnvSnapshot) -> bool {
        BEDROCK_ENVS.iter().all(|var| env.is_set(var))
    }
}

impl Signal {
    pub fn is_present(&self, env: &EnvSnapshot, derived: &DerivedSignals) -> bool {
        match self {
            Signal::Env(var) => env.is_set(var),
            Signal::OpencodeKey => derived.opencode_key.is_some(),
            Signal::OllamaUrl => derived.ollama_url.is_some(),
        }
    }
}

// ============================================================================
// Explicit Providers
// ============================================================================

/// Every provider that is written into `models.providers` when enabled.
///
/// Bedrock and Ollama carry metadata the generic catalog shape lacks
/// (region discovery, URL normalisation), so they get their own variants.
#[derive(Debug, Clone, Copy)]
pub enum ExplicitProvider {
    Catalog(&'static CatalogProvider),
    Bedrock,
    Ollama,
}

impl ExplicitProvider {
    pub fn all() -> impl Iterator<Item = ExplicitProvider> {
        CATALOG_PROVIDERS
            .iter()
            .map(ExplicitProvider::Catalog)
            .chain([ExplicitProvider::Bedrock, ExplicitProvider::Ollama])
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExplicitProvider::Catalog(p) => p.key,
            ExplicitProvider::Bedrock => BEDROCK_KEY,
            ExplicitProvider::Ollama => OLLAMA_KEY,
        }
    }

    /// Human readable description of what enables this provider.
    fn signal_hint(&self) -> &'static str {
        match self {
            ExplicitProvider::Catalog(p) => p.env,
            ExplicitProvider::Bedrock => "AWS credentials",
            ExplicitProvider::Ollama => OLLAMA_ENV,
        }
    }

    /// Build the provider entry, or `None` when its credentials are absent.
    pub fn resolve(&self, env: &EnvSnapshot, derived: &DerivedSignals) -> Option<ModelProviderConfig> {
        match self {
            ExplicitProvider::Catalog(p) => {
                let api_key = env.non_empty(p.env)?;
                let base_url = match p.base_url {
                    BaseUrl::Static(url) => url.to_string(),
                    BaseUrl::Env { var, default } => {
                        env.get(var).unwrap_or(default).trim_end_matches('/').to_string()
                    }
                };
                Some(ModelProviderConfig::new(p.api, base_url, Some(api_key), p.models))
            }
            ExplicitProvider::Bedrock => {
                if !DerivedSignals::has_aws_pair(env) {
                    return None;
                }
                Some(ModelProviderConfig::new(
                    ModelApi::BedrockConverseStream,
                    format!("https://bedrock-runtime.{}.amazonaws.com", aws_region(env)),
                    None,
                    BEDROCK_MODELS,
                ))
            }
            ExplicitProvider::Ollama => {
                let url = derived.ollama_url.as_deref()?;
                let base = if url.ends_with("/v1") {
                    url.to_string()
                } else {
                    format!("{url}/v1")
                };
                Some(ModelProviderConfig::new(
                    ModelApi::OpenaiCompletions,
                    base,
                    None,
                    OLLAMA_MODELS,
                ))
            }
        }
    }
}

fn aws_region(env: &EnvSnapshot) -> &str {
    env.non_empty("AWS_REGION")
        .or_else(|| env.non_empty("AWS_DEFAULT_REGION"))
        .unwrap_or(DEFAULT_AWS_REGION)
}

fn bedrock_discovery(env: &EnvSnapshot) -> BedrockDiscoveryConfig {
    BedrockDiscoveryConfig {
        enabled: true,
        region: aws_region(env).to_string(),
        provider_filter: env
            .get("BEDROCK_PROVIDER_FILTER")
            .unwrap_or(DEFAULT_BEDROCK_PROVIDER_FILTER)
            .to_string(),
        refresh_interval: BEDROCK_REFRESH_INTERVAL_SECS,
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Where the primary model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimarySource {
    /// `OPENCLAW_PRIMARY_MODEL`.
    Override,
    /// Already present in a loaded document.
    Existing,
    /// First present signal of the priority list.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryModel {
    pub model: String,
    pub source: PrimarySource,
}

/// Summary of what the provider stage did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderReport {
    /// Explicit providers written this run, in processing order.
    pub configured: Vec<&'static str>,
    /// Built-in providers whose credentials are present.
    pub builtins: Vec<&'static str>,
    pub primary: Option<PrimaryModel>,
}

/// Run the full provider stage against `doc`.
pub fn resolve_providers(
    doc: &mut Value,
    env: &EnvSnapshot,
    derived: &DerivedSignals,
    custom_loaded: bool,
) -> Result<ProviderReport, ConfigureError> {
    let mut report = ProviderReport::default();

    for provider in ExplicitProvider::all() {
        let key = provider.key();
        match provider.resolve(env, derived) {
            Some(entry) => {
                info!("configuring {key} provider");
                let entry = serde_json::to_value(entry)?;
                ensure_path(doc, "models.providers").insert(key.to_string(), entry);
                if let ExplicitProvider::Bedrock = provider {
                    let discovery = serde_json::to_value(bedrock_discovery(env))?;
                    ensure_path(doc, "models").insert("bedrockDiscovery".into(), discovery);
                }
                report.configured.push(key);
            }
            None if !custom_loaded => {
                if remove_provider_entry(doc, key) {
                    info!("removing {key} provider ({} not set)", provider.signal_hint());
                }
                if let ExplicitProvider::Bedrock = provider {
                    if let Some(models) = doc.get_mut("models").and_then(Value::as_object_mut) {
                        models.shift_remove("bedrockDiscovery");
                    }
                }
            }
            None => {}
        }
    }

    for builtin in BUILTIN_PROVIDERS {
        if env.is_set(builtin.env) {
            info!("{} provider enabled ({} set)", builtin.label, builtin.env);
            report.builtins.push(builtin.key);
        }
        remove_stale_builtin(doc, builtin.key, custom_loaded);
    }
    if derived.opencode_key.is_some() {
        info!("OpenCode provider enabled (OPENCODE_API_KEY set)");
        report.builtins.push(OPENCODE_KEY);
    }
    remove_stale_builtin(doc, OPENCODE_KEY, custom_loaded);

    report.primary = select_primary_model(doc, env, derived);
    Ok(report)
}

fn providers_mut(doc: &mut Value) -> Option<&mut Map<String, Value>> {
    doc.get_mut("models")?
        .get_mut("providers")?
        .as_object_mut()
}

/// Delete `models.providers.<key>`, returning whether it existed.
fn remove_provider_entry(doc: &mut Value, key: &str) -> bool {
    providers_mut(doc)
        .and_then(|providers| providers.shift_remove(key))
        .is_some()
}

fn remove_stale_builtin(doc: &mut Value, key: &str, custom_loaded: bool) {
    if !custom_loaded && remove_provider_entry(doc, key) {
        info!("removing stale models.providers.{key} (built-in, not needed)");
    }
}

/// Override, else existing value, else the first present priority signal.
fn select_primary_model(
    doc: &mut Value,
    env: &EnvSnapshot,
    derived: &DerivedSignals,
) -> Option<PrimaryModel> {
    let model = ensure_path(doc, "agents.defaults.model");

    if let Some(primary) = env.non_empty("OPENCLAW_PRIMARY_MODEL") {
        model.insert("primary".into(), primary.into());
        info!("primary model (override): {primary}");
        return Some(PrimaryModel {
            model: primary.to_string(),
            source: PrimarySource::Override,
        });
    }

    if let Some(existing) = model.get("primary").filter(|v| is_truthy(v)) {
        let existing = existing
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| existing.to_string());
        info!("primary model (from config): {existing}");
        return Some(PrimaryModel {
            model: existing,
            source: PrimarySource::Existing,
        });
    }

    let (_, chosen) = PRIMARY_MODEL_PRIORITY
        .iter()
        .find(|(signal, _)| signal.is_present(env, derived))?;
    model.insert("primary".into(), (*chosen).into());
    info!("primary model (auto): {chosen}");
    Some(PrimaryModel {
        model: chosen.to_string(),
        source: PrimarySource::Auto,
    })
}
