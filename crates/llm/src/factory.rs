//! Provider factory.
//!
//! This module creates text-generation clients from configuration and
//! decides whether a credential is real enough to try the hosted service.

use crate::client::LlmClient;
use crate::providers::{huggingface, ollama, HuggingFaceClient, OllamaClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Values shipped in sample `.env` files that are not real credentials.
const PLACEHOLDER_CREDENTIALS: [&str; 6] = [
    "your_api_key_here",
    "your-api-key",
    "your_huggingface_api_key",
    "changeme",
    "placeholder",
    "xxx",
];

/// Whether a credential looks usable.
///
/// Missing, blank and placeholder values all count as "not configured",
/// which puts the advisor in offline mode without attempting a request.
pub fn is_real_credential(api_key: Option<&str>) -> bool {
    let Some(key) = api_key.map(str::trim) else {
        return false;
    };

    if key.is_empty() {
        return false;
    }

    let lower = key.to_lowercase();
    !PLACEHOLDER_CREDENTIALS.contains(&lower.as_str())
        && !lower.starts_with("your")
        && !lower.starts_with('<')
}

/// Create a client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("huggingface", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Credential for providers that require one
/// * `model` - Model used for health checks
/// * `timeout` - Optional request timeout for the local runtime
///
/// # Errors
/// Returns an error if the provider is unknown or a required credential is
/// missing or a placeholder.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    model: &str,
    timeout: Option<Duration>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;

    if provider_type.requires_credential() && !is_real_credential(api_key) {
        return Err(format!(
            "{} provider requires an API key",
            provider_type.as_str()
        ));
    }

    match provider_type {
        ProviderType::HuggingFace => {
            let base_url = endpoint.unwrap_or(huggingface::DEFAULT_BASE_URL);
            let key = api_key.unwrap_or_default();
            Ok(Arc::new(HuggingFaceClient::with_base_url(base_url, key, model)))
        }
        ProviderType::Ollama => {
            let base_url = endpoint.unwrap_or(ollama::DEFAULT_BASE_URL);
            let mut client = OllamaClient::with_base_url(base_url);
            if let Some(timeout) = timeout {
                client = client.with_timeout(timeout).map_err(|e| e.to_string())?;
            }
            Ok(Arc::new(client))
        }
    }
}
