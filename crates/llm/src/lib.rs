//! Remote text-generation crate for Nivesh.
//!
//! The advisor falls back to a language model when no local answer applies.
//! This crate hides the provider behind the [`LlmClient`] trait.
//!
//! # Providers
//! - **Hugging Face Inference API**: hosted, bearer credential (default)
//! - **Ollama**: local runtime
//! - **Mock**: scripted replies for tests
//!
//! # Example
//! ```no_run
//! use nivesh_llm::{LlmClient, LlmRequest, providers::HuggingFaceClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HuggingFaceClient::new("hf_token", "mistralai/Mistral-7B-Instruct-v0.2");
//! let request = LlmRequest::new("What is an index fund?", "mistralai/Mistral-7B-Instruct-v0.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse};
pub use factory::{create_client, is_real_credential};
pub use providers::{HuggingFaceClient, MockClient, MockReply, OllamaClient};
pub use types::ProviderType;
