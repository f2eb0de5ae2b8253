//! Scripted provider for tests and offline demos.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use nivesh_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Failure(String),
}

/// Client that replays scripted replies in order.
///
/// Once the script is exhausted every call fails, which mirrors a service
/// going away mid-session. Prompts are recorded for inspection.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    healthy: bool,
}

impl MockClient {
    /// Create a healthy client with an empty script.
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// Create a client that answers every request with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        let text = text.into();
        let client = Self::new();
        client.push_many(std::iter::repeat(MockReply::Text(text)).take(64));
        client
    }

    /// Create a client whose health check fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Append a successful reply to the script.
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_many([MockReply::Text(text.into())]);
    }

    /// Append a failure to the script.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.push_many([MockReply::Failure(message.into())]);
    }

    fn push_many(&self, replies: impl IntoIterator<Item = MockReply>) {
        if let Ok(mut queue) = self.replies.lock() {
            queue.extend(replies);
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of completion calls received.
    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| AppError::Llm("Mock script poisoned".to_string()))?
            .pop_front();

        match next {
            Some(MockReply::Text(content)) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
            }),
            Some(MockReply::Failure(message)) => Err(AppError::Llm(message)),
            None => Err(AppError::Llm("Mock script exhausted".to_string())),
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::Llm("Mock provider unreachable".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let client = MockClient::new();
        client.push_text("first");
        client.push_failure("boom");

        let request = LlmRequest::new("q", "m");
        assert_eq!(client.complete(&request).await.unwrap().content, "first");
        assert!(client.complete(&request).await.is_err());
        assert!(client.complete(&request).await.is_err());
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_health() {
        assert!(MockClient::new().health_check().await.is_ok());
        assert!(MockClient::unreachable().health_check().await.is_err());
    }
}
