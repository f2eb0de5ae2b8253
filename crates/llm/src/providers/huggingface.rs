//! Hosted text-generation provider (Hugging Face Inference API).
//!
//! API: https://huggingface.co/docs/api-inference/tasks/text-generation

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use nivesh_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default inference endpoint; the model id is appended as a path segment.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Inference API request format.
#[derive(Debug, Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    do_sample: bool,
    return_full_text: bool,
}

/// Inference API response format.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Generations(Vec<HfGeneration>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

/// Hosted text-generation client authenticated with a bearer token.
pub struct HuggingFaceClient {
    /// Base URL; requests go to `{base_url}/{model}`
    base_url: String,

    /// Bearer credential
    api_key: String,

    /// Model probed by `health_check`
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HuggingFaceClient {
    /// Create a client against the public inference endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// Convert an LlmRequest to the inference API format.
    fn to_hf_request(&self, request: &LlmRequest) -> HfRequest {
        let inputs = match &request.system {
            Some(system) => format!("{}\n\n{}", system, request.prompt),
            None => request.prompt.clone(),
        };

        HfRequest {
            inputs,
            parameters: HfParameters {
                max_new_tokens: request.max_tokens,
                temperature: request.temperature,
                top_p: request.top_p,
                do_sample: request.do_sample,
                return_full_text: false,
            },
        }
    }
}

/// Pull the generated text out of a response body.
fn extract_generation(response: HfResponse) -> AppResult<String> {
    match response {
        HfResponse::Generations(generations) => generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| AppError::Llm("Inference API returned no generations".to_string())),
        HfResponse::Error { error } => {
            Err(AppError::Llm(format!("Inference API error: {}", error)))
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for HuggingFaceClient {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to hosted inference API");
        tracing::debug!("Model: {}, prompt bytes: {}", request.model, request.prompt.len());

        let body = self.to_hf_request(request);

        let response = self
            .client
            .post(self.model_url(&request.model))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to reach inference API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Inference API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: HfResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse inference response: {}", e)))?;

        let content = extract_generation(parsed)?;
        tracing::info!("Received {} bytes from inference API", content.len());

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
        })
    }

    async fn health_check(&self) -> AppResult<()> {
        let response = self
            .client
            .get(self.model_url(&self.model))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Inference API unreachable: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Llm(format!(
                "Inference API health check failed ({})",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HuggingFaceClient::with_base_url("http://localhost:8080/", "hf_test", "m");
        assert_eq!(client.provider_name(), "huggingface");
        assert_eq!(client.model_url("org/model"), "http://localhost:8080/org/model");
    }

    #[test]
    fn test_request_conversion() {
        let client = HuggingFaceClient::new("hf_test", "m");
        let request = LlmRequest::new("What is NAV?", "m")
            .with_system("You are an advisor.")
            .with_max_tokens(300)
            .with_temperature(0.7)
            .with_top_p(0.9)
            .with_sampling(true);

        let body = client.to_hf_request(&request);
        assert_eq!(body.inputs, "You are an advisor.\n\nWhat is NAV?");
        assert_eq!(body.parameters.max_new_tokens, Some(300));
        assert!(body.parameters.do_sample);
        assert!(!body.parameters.return_full_text);
    }

    #[test]
    fn test_extract_generation() {
        let ok: HfResponse =
            serde_json::from_str(r#"[{"generated_text": "PPF has a 15 year lock-in."}]"#).unwrap();
        assert_eq!(extract_generation(ok).unwrap(), "PPF has a 15 year lock-in.");

        let err: HfResponse =
            serde_json::from_str(r#"{"error": "Model is currently loading"}"#).unwrap();
        assert!(extract_generation(err).is_err());

        let empty: HfResponse = serde_json::from_str("[]").unwrap();
        assert!(extract_generation(empty).is_err());
    }
}
