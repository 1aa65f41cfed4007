use tracing::error;

use crate::env::EnvSnapshot;
use crate::error::ConfigureError;
use crate::providers::catalog::{BEDROCK_ENVS, OPENCODE_ENVS};
use crate::providers::{DerivedSignals, BUILTIN_PROVIDERS, CATALOG_PROVIDERS};

/// Whether any signal the gateway can authenticate a model provider with is present.
pub fn has_provider_credentials(env: &EnvSnapshot, derived: &DerivedSignals) -> bool {
    BUILTIN_PROVIDERS.iter().any(|p| env.is_set(p.env))
        || derived.opencode_key.is_some()
        || DerivedSignals::has_aws_pair(env)
        || derived.ollama_url.is_some()
        || CATALOG_PROVIDERS.iter().any(|p| env.is_set(p.env))
}

/// Every accepted credential signal, in the order shown to the operator.
pub fn accepted_signals() -> Vec<String> {
    let mut signals: Vec<String> = BUILTIN_PROVIDERS.iter().map(|p| p.env.to_string()).collect();
    signals.push(OPENCODE_ENVS[0].to_string());
    signals.extend(CATALOG_PROVIDERS.iter().map(|p| p.env.to_string()));
    signals.push(format!("{}+{} (Bedrock)", BEDROCK_ENVS[0], BEDROCK_ENVS[1]));
    signals.push("OLLAMA_BASE_URL (local)".to_string());
    signals
}

/// Fail unless at least one provider credential is present.
pub fn validate_providers(env: &EnvSnapshot, derived: &DerivedSignals) -> Result<(), ConfigureError> {
    if has_provider_credentials(env, derived) {
        return Ok(());
    }
    let err = ConfigureError::NoProvider {
        signals: accepted_signals(),
    };
    error!("{err}");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(vars: &[(&str, &str)]) -> Result<(), ConfigureError> {
        let env: EnvSnapshot = vars.iter().copied().collect();
        let derived = DerivedSignals::from_env(&env);
        validate_providers(&env, &derived)
    }

    #[test]
    fn empty_environment_lists_every_signal() {
        let err = check(&[]).unwrap_err();
        let message = err.to_string();
        for builtin in BUILTIN_PROVIDERS {
            assert!(message.contains(builtin.env), "missing {}", builtin.env);
        }
        for catalog in CATALOG_PROVIDERS {
            assert!(message.contains(catalog.env), "missing {}", catalog.env);
        }
        assert!(message.contains("OPENCODE_API_KEY"));
        assert!(message.contains("AWS_ACCESS_KEY_ID+AWS_SECRET_ACCESS_KEY"));
        assert!(message.contains("OLLAMA_BASE_URL"));
    }

    #[test]
    fn any_single_signal_passes() {
        assert!(check(&[("OLLAMA_BASE_URL", "http://ollama:11434")]).is_ok());
        assert!(check(&[("OPENCODE_ZEN_API_KEY", "z")]).is_ok());
        assert!(check(&[("XIAOMI_API_KEY", "x")]).is_ok());
        assert!(check(&[("COPILOT_GITHUB_TOKEN", "gh")]).is_ok());
        assert!(check(&[("AWS_ACCESS_KEY_ID", "a"), ("AWS_SECRET_ACCESS_KEY", "s")]).is_ok());
    }

    #[test]
    fn partial_or_empty_signals_fail() {
        assert!(check(&[("AWS_ACCESS_KEY_ID", "a")]).is_err());
        assert!(check(&[("ANTHROPIC_API_KEY", "")]).is_err());
        assert!(check(&[("OLLAMA_BASE_URL", "/")]).is_err());
    }
}
