//! Text-generation provider implementations.

pub mod huggingface;
pub mod mock;
pub mod ollama;

pub use huggingface::HuggingFaceClient;
pub use mock::{MockClient, MockReply};
pub use ollama::OllamaClient;
