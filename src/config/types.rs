use serde::Serialize;

// ============================================================================
// Models Configuration
// ============================================================================

/// Wire dialect a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelApi {
    OpenaiCompletions,
    AnthropicMessages,
    BedrockConverseStream,
}

/// Static description of a model offered by an explicit provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub context_window: u64,
}

impl ModelDescriptor {
    pub const fn new(id: &'static str, name: &'static str, context_window: u64) -> Self {
        Self {
            id,
            name,
            context_window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinitionConfig {
    pub id: String,
    pub name: String,
    pub context_window: u64,
}

impl From<&ModelDescriptor> for ModelDefinitionConfig {
    fn from(model: &ModelDescriptor) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.to_string(),
            context_window: model.context_window,
        }
    }
}

/// An entry under `models.providers.<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProviderConfig {
    pub api: ModelApi,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub models: Vec<ModelDefinitionConfig>,
}

impl ModelProviderConfig {
    pub fn new(
        api: ModelApi,
        base_url: impl Into<String>,
        api_key: Option<&str>,
        models: &[ModelDescriptor],
    ) -> Self {
        Self {
            api,
            base_url: base_url.into(),
            api_key: api_key.map(String::from),
            models: models.iter().map(ModelDefinitionConfig::from).collect(),
        }
    }
}

/// `models.bedrockDiscovery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedrockDiscoveryConfig {
    pub enabled: bool,
    pub region: String,
    pub provider_filter: String,
    pub refresh_interval: u64,
}
