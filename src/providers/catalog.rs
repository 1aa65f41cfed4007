//! Static provider tables: built-ins, the explicit catalog, primary-model priority.

use crate::config::{ModelApi, ModelDescriptor};

// ============================================================================
// Built-in Providers
// ============================================================================

/// A provider the gateway detects by itself from a credential variable.
///
/// These must never have a `models.providers` entry.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinProvider {
    pub env: &'static str,
    pub label: &'static str,
    pub key: &'static str,
}

const fn builtin(env: &'static str, label: &'static str, key: &'static str) -> BuiltinProvider {
    BuiltinProvider { env, label, key }
}

pub const BUILTIN_PROVIDERS: &[BuiltinProvider] = &[
    builtin("ANTHROPIC_API_KEY", "Anthropic", "anthropic"),
    builtin("OPENAI_API_KEY", "OpenAI", "openai"),
    builtin("OPENROUTER_API_KEY", "OpenRouter", "openrouter"),
    builtin("GEMINI_API_KEY", "Google Gemini", "google"),
    builtin("XAI_API_KEY", "xAI", "xai"),
    builtin("GROQ_API_KEY", "Groq", "groq"),
    builtin("MISTRAL_API_KEY", "Mistral", "mistral"),
    builtin("CEREBRAS_API_KEY", "Cerebras", "cerebras"),
    builtin("ZAI_API_KEY", "ZAI", "zai"),
    builtin("AI_GATEWAY_API_KEY", "Vercel AI Gateway", "vercel-ai-gateway"),
    builtin("COPILOT_GITHUB_TOKEN", "GitHub Copilot", "github-copilot"),
];

/// OpenCode is built in too, but accepts either of two credential variables.
pub const OPENCODE_KEY: &str = "opencode";
pub const OPENCODE_ENVS: &[&str] = &["OPENCODE_API_KEY", "OPENCODE_ZEN_API_KEY"];

// ============================================================================
// Explicit Catalog
// ============================================================================

/// Where a catalog provider's base URL comes from.
#[derive(Debug, Clone, Copy)]
pub enum BaseUrl {
    Static(&'static str),
    /// Read from `var`, falling back to `default`. Trailing `/` is trimmed.
    Env {
        var: &'static str,
        default: &'static str,
    },
}

/// A provider that needs an explicit `models.providers` entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogProvider {
    pub key: &'static str,
    pub env: &'static str,
    pub api: ModelApi,
    pub base_url: BaseUrl,
    pub models: &'static [ModelDescriptor],
}

pub const CATALOG_PROVIDERS: &[CatalogProvider] = &[
    CatalogProvider {
        key: "venice",
        env: "VENICE_API_KEY",
        api: ModelApi::OpenaiCompletions,
        base_url: BaseUrl::Static("https://api.venice.ai/api/v1"),
        models: &[ModelDescriptor::new("llama-3.3-70b", "Llama 3.3 70B", 128_000)],
    },
    CatalogProvider {
        key: "minimax",
        env: "MINIMAX_API_KEY",
        api: ModelApi::AnthropicMessages,
        base_url: BaseUrl::Static("https://api.minimax.io/anthropic"),
        models: &[ModelDescriptor::new("MiniMax-M2.1", "MiniMax M2.1", 200_000)],
    },
    CatalogProvider {
        key: "moonshot",
        env: "MOONSHOT_API_KEY",
        api: ModelApi::OpenaiCompletions,
        base_url: BaseUrl::Env {
            var: "MOONSHOT_BASE_URL",
            default: "https://api.moonshot.ai/v1",
        },
        models: &[ModelDescriptor::new("kimi-k2.5", "Kimi K2.5", 128_000)],
    },
    CatalogProvider {
        key: "kimi-coding",
        env: "KIMI_API_KEY",
        api: ModelApi::AnthropicMessages,
        base_url: BaseUrl::Env {
            var: "KIMI_BASE_URL",
            default: "https://api.moonshot.ai/anthropic",
        },
        models: &[ModelDescriptor::new("k2p5", "Kimi K2P5", 128_000)],
    },
    CatalogProvider {
        key: "synthetic",
        env: "SYNTHETIC_API_KEY",
        api: ModelApi::AnthropicMessages,
        base_url: BaseUrl::Static("https://api.synthetic.new/anthropic"),
        models: &[ModelDescriptor::new(
            "hf:MiniMaxAI/MiniMax-M2.1",
            "MiniMax M2.1",
            192_000,
        )],
    },
    CatalogProvider {
        key: "xiaomi",
        env: "XIAOMI_API_KEY",
        api: ModelApi::AnthropicMessages,
        base_url: BaseUrl::Static("https://api.xiaomimimo.com/anthropic"),
        models: &[ModelDescriptor::new("mimo-v2-flash", "MiMo v2 Flash", 262_144)],
    },
];

// ============================================================================
// Specially Shaped Providers
// ============================================================================

pub const BEDROCK_KEY: &str = "amazon-bedrock";
pub const BEDROCK_ENVS: [&str; 2] = ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"];
pub const BEDROCK_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new(
        "anthropic.claude-opus-4-5-20251101-v1:0",
        "Claude Opus 4.5 (Bedrock)",
        200_000,
    ),
    ModelDescriptor::new(
        "anthropic.claude-sonnet-4-5-20250929-v1:0",
        "Claude Sonnet 4.5 (Bedrock)",
        200_000,
    ),
];

pub const OLLAMA_KEY: &str = "ollama";
pub const OLLAMA_ENV: &str = "OLLAMA_BASE_URL";
pub const OLLAMA_MODELS: &[ModelDescriptor] =
    &[ModelDescriptor::new("llama3.3", "Llama 3.3", 128_000)];

// ============================================================================
// Primary Model Priority
// ============================================================================

/// What must be present for a priority entry to be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A non-empty environment variable.
    Env(&'static str),
    /// Either OpenCode credential variable.
    OpencodeKey,
    /// A non-empty Ollama URL after trimming.
    OllamaUrl,
}

/// First entry whose signal is present wins.
pub const PRIMARY_MODEL_PRIORITY: &[(Signal, &str)] = &[
    (Signal::Env("ANTHROPIC_API_KEY"), "anthropic/claude-opus-4-5-20251101"),
    (Signal::Env("OPENAI_API_KEY"), "openai/gpt-5.2"),
    (Signal::Env("OPENROUTER_API_KEY"), "openrouter/anthropic/claude-opus-4-5"),
    (Signal::Env("GEMINI_API_KEY"), "google/gemini-2.5-pro"),
    (Signal::OpencodeKey, "opencode/claude-opus-4-5"),
    (Signal::Env("COPILOT_GITHUB_TOKEN"), "github-copilot/claude-opus-4-5"),
    (Signal::Env("XAI_API_KEY"), "xai/grok-3"),
    (Signal::Env("GROQ_API_KEY"), "groq/llama-3.3-70b-versatile"),
    (Signal::Env("MISTRAL_API_KEY"), "mistral/mistral-large-latest"),
    (Signal::Env("CEREBRAS_API_KEY"), "cerebras/llama-3.3-70b"),
    (Signal::Env("VENICE_API_KEY"), "venice/llama-3.3-70b"),
    (Signal::Env("MOONSHOT_API_KEY"), "moonshot/kimi-k2.5"),
    (Signal::Env("KIMI_API_KEY"), "kimi-coding/k2p5"),
    (Signal::Env("MINIMAX_API_KEY"), "minimax/MiniMax-M2.1"),
    (Signal::Env("SYNTHETIC_API_KEY"), "synthetic/hf:MiniMaxAI/MiniMax-M2.1"),
    (Signal::Env("ZAI_API_KEY"), "zai/glm-4.7"),
    (Signal::Env("AI_GATEWAY_API_KEY"), "vercel-ai-gateway/anthropic/claude-opus-4.5"),
    (Signal::Env("XIAOMI_API_KEY"), "xiaomi/mimo-v2-flash"),
    (
        Signal::Env("AWS_ACCESS_KEY_ID"),
        "amazon-bedrock/anthropic.claude-opus-4-5-20251101-v1:0",
    ),
    (Signal::OllamaUrl, "ollama/llama3.3"),
];
