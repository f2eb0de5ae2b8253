
use crate::responder::{Fallback, Responder};
use nivesh_knowledge::KnowledgeBase;
use nivesh_llm::{LlmClient, MockClient};
use nivesh_prompt::default_prompt;
use std::sync::Arc;

fn knowledge() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::bundled())
}

fn offline_responder() -> Responder {
    Responder::new(knowledge())
}

/// Responder wired to a mock, returned alongside the mock for inspection.
fn remote_responder(mock: MockClient) -> (Responder, Arc<MockClient>) {
    let mock = Arc::new(mock);
    let client: Arc<dyn LlmClient> = mock.clone();
    let fallback = Fallback::new(client, "test-model", default_prompt());
    (Responder::new(knowledge()).with_fallback(fallback), mock)
}
