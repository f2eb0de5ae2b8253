//! Responder construction shared by `ask` and `chat`.

use nivesh_advisor::{Fallback, Responder};
use nivesh_core::{config::AppConfig, AppResult};
use nivesh_knowledge::{
    bootstrap_dataset, cache::get_store_path, Dataset, DatasetOrigin, KnowledgeBase, KvStore,
};
use std::sync::Arc;

/// Load the knowledge base, using a cached or remote dataset extension when
/// one is available. An unreadable cache is ignored.
pub async fn load_knowledge(config: &AppConfig) -> AppResult<(KnowledgeBase, DatasetOrigin)> {
    let mut store = KvStore::open_or_empty(get_store_path(&config.workspace));
    let outcome =
        bootstrap_dataset(&mut store, config.dataset_url.as_deref(), Dataset::bundled()).await;

    tracing::debug!(
        "Dataset: {} entries ({:?})",
        outcome.dataset.len(),
        outcome.origin
    );

    Ok((
        KnowledgeBase::bundled().with_dataset(outcome.dataset),
        outcome.origin,
    ))
}

/// Build a responder from configuration.
///
/// With `offline` set, or without a usable credential, no fallback is wired.
pub async fn build_responder(config: &AppConfig, offline: bool) -> AppResult<Responder> {
    let (knowledge, _) = load_knowledge(config).await?;

    let mut responder = Responder::new(Arc::new(knowledge))
        .with_policy(config.local_policy)
        .with_goal(config.goal.clone());

    if offline {
        tracing::info!("Offline mode requested");
    } else if let Some(fallback) = Fallback::from_config(config)? {
        tracing::info!("Remote fallback: {}", fallback.provider_name());
        responder = responder.with_fallback(fallback);
    }

    Ok(responder)
}
