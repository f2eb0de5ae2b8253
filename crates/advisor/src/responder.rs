//! The question responder.
//!
//! Resolution order: glossary, then the local stages (dataset, rules,
//! timeframe), then the remote fallback, then the offline heuristic. The
//! remote service is skipped when it is not configured or when an earlier
//! call found it unreachable.

use crate::answer::{Answer, AnswerSource};
use crate::offline;
use crate::query::Query;
use crate::relevance::{self, Verdict};
use crate::scope;
use crate::stages::{run_stages, GLOSSARY_STAGE, LOCAL_STAGES};
use nivesh_core::{AppConfig, AppError, AppResult, GoalConfig, LocalPolicy};
use nivesh_knowledge::KnowledgeBase;
use nivesh_llm::{create_client, is_real_credential, LlmClient, LlmRequest, ProviderType};
use nivesh_prompt::{
    build_prompt, load_prompt_or_default, PromptDefinition, PromptKnowledge, DEFAULT_PROMPT_ID,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Shown once when a remote call fails and the session goes offline.
pub const CONNECTIVITY_NOTICE: &str =
    "Could not reach the online assistant. Showing offline answers until the connection is checked again.";

/// Related questions must share at least this many key terms.
const RELATED_MIN_SHARED: usize = 2;

/// Last known state of the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Unknown,
    Available,
    Unavailable,
}

/// The remote text-generation collaborator and its prompt.
pub struct Fallback {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptDefinition,
}

impl Fallback {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        prompt: PromptDefinition,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            prompt,
        }
    }

    /// Build the fallback from configuration.
    ///
    /// Returns `None` when the active provider needs a credential and none
    /// real is configured; the responder then runs offline.
    pub fn from_config(config: &AppConfig) -> AppResult<Option<Self>> {
        let provider = ProviderType::parse(&config.provider)
            .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", config.provider)))?;

        let api_key = config.resolve_api_key(&config.provider);
        if provider.requires_credential() && !is_real_credential(api_key.as_deref()) {
            tracing::info!(
                "No credential for {}, answering offline",
                provider.as_str()
            );
            return Ok(None);
        }

        let client = create_client(
            &config.provider,
            config.endpoint.as_deref(),
            api_key.as_deref(),
            &config.model,
            config.provider_timeout(),
        )
        .map_err(AppError::Llm)?;

        let prompt = load_prompt_or_default(&config.workspace, DEFAULT_PROMPT_ID)?;

        tracing::debug!(
            "Fallback ready: provider={}, model={}, prompt={}",
            client.provider_name(),
            config.model,
            prompt.id
        );

        Ok(Some(Self::new(client, config.model.clone(), prompt)))
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Compose the request for a question: persona, full glossary, related
    /// dataset questions and the question itself.
    pub fn request(&self, query: &Query, knowledge: &KnowledgeBase) -> AppResult<LlmRequest> {
        let related_questions = knowledge
            .dataset
            .related(
                query.raw(),
                RELATED_MIN_SHARED,
                self.prompt.context.max_related_questions,
            )
            .into_iter()
            .map(|entry| entry.question.clone())
            .collect();

        let built = build_prompt(
            &self.prompt,
            query.raw().trim(),
            PromptKnowledge {
                glossary: Some(knowledge.glossary_text()),
                related_questions,
            },
            HashMap::new(),
        )?;

        let generation = &built.generation;
        let mut request = LlmRequest::new(built.user.clone(), &self.model)
            .with_max_tokens(generation.max_tokens)
            .with_temperature(generation.temperature)
            .with_top_p(generation.top_p)
            .with_sampling(generation.do_sample);

        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        Ok(request)
    }
}

impl std::fmt::Debug for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fallback")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .field("prompt", &self.prompt.id)
            .finish()
    }
}

/// Answers free-text financial questions.
#[derive(Debug)]
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    fallback: Option<Fallback>,
    policy: LocalPolicy,
    goal: Option<GoalConfig>,
    connectivity: Connectivity,
}

impl Responder {
    /// A responder without a remote fallback.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            fallback: None,
            policy: LocalPolicy::default(),
            goal: None,
            connectivity: Connectivity::Unknown,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_policy(mut self, policy: LocalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_goal(mut self, goal: Option<GoalConfig>) -> Self {
        self.goal = goal;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether the next question may go to the remote service.
    pub fn remote_enabled(&self) -> bool {
        self.fallback.is_some() && self.connectivity != Connectivity::Unavailable
    }

    /// Answer from the glossary and local stages only; `None` means the
    /// question needs the fallback.
    pub fn respond_locally(&self, question: &str) -> Option<Answer> {
        let query = Query::new(question);
        GLOSSARY_STAGE
            .run(&query, &self.knowledge)
            .or_else(|| run_stages(&LOCAL_STAGES, &query, &self.knowledge))
    }

    /// Answer from the offline heuristic only.
    pub fn respond_offline(&self, question: &str) -> Answer {
        self.offline_answer(&Query::new(question))
    }

    /// Apply the out-of-scope filter, then [`respond`](Self::respond).
    pub async fn respond_screened(&mut self, question: &str) -> Answer {
        if let Some(reason) = scope::check(question) {
            tracing::debug!("Question out of scope: {:?}", reason);
            return Answer::new(reason.reply(), AnswerSource::OutOfScope);
        }
        self.respond(question).await
    }

    /// Answer a question. Always returns displayable text.
    pub async fn respond(&mut self, question: &str) -> Answer {
        let query = Query::new(question);

        if let Some(answer) = GLOSSARY_STAGE.run(&query, &self.knowledge) {
            return answer;
        }

        let remote = self.remote_enabled();

        if remote || self.policy == LocalPolicy::Full {
            if let Some(answer) = run_stages(&LOCAL_STAGES, &query, &self.knowledge) {
                return answer;
            }
        }

        if !remote {
            tracing::debug!("Remote fallback unavailable, answering offline");
            return self.offline_answer(&query);
        }

        self.ask_remote(&query).await
    }

    async fn ask_remote(&mut self, query: &Query) -> Answer {
        let Some(fallback) = self.fallback.as_ref() else {
            return self.offline_answer(query);
        };

        let request = match fallback.request(query, &self.knowledge) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Failed to build fallback prompt: {}", e);
                return self.offline_answer(query);
            }
        };

        let client = Arc::clone(&fallback.client);
        tracing::info!("Asking {} ({} prompt chars)", client.provider_name(), request.prompt.len());

        match client.complete(&request).await {
            Ok(response) => {
                self.connectivity = Connectivity::Available;
                match relevance::assess(query, &response.content) {
                    Verdict::Accepted(text) => Answer::new(text, AnswerSource::Remote),
                    Verdict::Rejected(reason) => {
                        tracing::debug!("Discarding remote answer: {:?}", reason);
                        self.offline_answer(query)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Remote fallback failed: {}", e);
                self.connectivity = Connectivity::Unavailable;
                self.offline_answer(query).with_notice(CONNECTIVITY_NOTICE)
            }
        }
    }

    /// Check the remote service and record the result.
    pub async fn probe_connectivity(&mut self) -> Connectivity {
        let Some(fallback) = self.fallback.as_ref() else {
            self.connectivity = Connectivity::Unavailable;
            return self.connectivity;
        };

        let client = Arc::clone(&fallback.client);
        self.connectivity = match client.health_check().await {
            Ok(()) => Connectivity::Available,
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                Connectivity::Unavailable
            }
        };

        tracing::info!("Connectivity: {:?}", self.connectivity);
        self.connectivity
    }

    fn offline_answer(&self, query: &Query) -> Answer {
        Answer::new(
            offline::answer(query, &self.knowledge.glossary, self.goal.as_ref()),
            AnswerSource::Offline,
        )
    }
}
