//! Knowledge command handler.
//!
//! Inspects the bundled knowledge and manages the cached dataset extension.

use crate::commands::session::load_knowledge;
use clap::{Args, Subcommand};
use nivesh_core::{config::AppConfig, AppError, AppResult};
use nivesh_knowledge::{
    bootstrap_dataset, cache::get_store_path, worked_example, Dataset, DatasetOrigin,
    KnowledgeBase, KvStore, DATASET_CACHE_KEY,
};
use nivesh_prompt::{list_prompts, DEFAULT_PROMPT_ID};

/// Inspect the knowledge base
#[derive(Args, Debug)]
pub struct KnowledgeCommand {
    #[command(subcommand)]
    pub action: KnowledgeAction,
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeAction {
    /// List glossary terms
    Glossary(KnowledgeGlossaryCommand),
    /// List rules of thumb with their worked examples
    Rules(KnowledgeRulesCommand),
    /// Fetch the extended dataset and cache it
    Sync(KnowledgeSyncCommand),
    /// Show knowledge base statistics
    Stats(KnowledgeStatsCommand),
    /// List fallback prompt overrides in the workspace
    Prompts(KnowledgePromptsCommand),
}

impl KnowledgeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KnowledgeAction::Glossary(cmd) => cmd.execute(),
            KnowledgeAction::Rules(cmd) => cmd.execute(),
            KnowledgeAction::Sync(cmd) => cmd.execute(config).await,
            KnowledgeAction::Stats(cmd) => cmd.execute(config).await,
            KnowledgeAction::Prompts(cmd) => cmd.execute(config),
        }
    }
}

/// List glossary terms
#[derive(Args, Debug)]
pub struct KnowledgeGlossaryCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeGlossaryCommand {
    pub fn execute(&self) -> AppResult<()> {
        let kb = KnowledgeBase::bundled();

        if self.json {
            println!("{}", serde_json::to_string_pretty(kb.glossary.terms())?);
        } else {
            for term in kb.glossary.terms() {
                println!("{}\n  {}\n", term.key.to_uppercase(), term.definition);
            }
        }

        Ok(())
    }
}

/// List rules of thumb
#[derive(Args, Debug)]
pub struct KnowledgeRulesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeRulesCommand {
    pub fn execute(&self) -> AppResult<()> {
        let kb = KnowledgeBase::bundled();

        if self.json {
            let output: Vec<_> = kb
                .rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "id": rule.id,
                        "name": rule.name,
                        "description": rule.description,
                        "application": rule.application,
                        "example": worked_example(rule.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for rule in &kb.rules {
                println!(
                    "{}\n  {}\n  Example: {}\n",
                    rule.name,
                    rule.description,
                    worked_example(rule.id)
                );
            }
        }

        Ok(())
    }
}

/// Fetch the extended dataset
#[derive(Args, Debug)]
pub struct KnowledgeSyncCommand {
    /// Dataset URL (defaults to the configured one)
    #[arg(long)]
    pub url: Option<String>,

    /// Drop the cached copy before fetching
    #[arg(long)]
    pub reset: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeSyncCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let url = self
            .url
            .clone()
            .or_else(|| config.dataset_url.clone())
            .ok_or_else(|| {
                AppError::Config(
                    "No dataset URL. Pass --url or set NIVESH_DATASET_URL".to_string(),
                )
            })?;

        tracing::info!("Syncing dataset from {}", url);

        let mut store = KvStore::open_or_empty(get_store_path(&config.workspace));
        if self.reset && store.remove(DATASET_CACHE_KEY)? {
            tracing::info!("Removed cached dataset");
        }

        let outcome = bootstrap_dataset(&mut store, Some(&url), Dataset::bundled()).await;

        if self.json {
            let output = serde_json::json!({
                "url": url,
                "entries": outcome.dataset.len(),
                "origin": origin_label(outcome.origin),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            match outcome.origin {
                DatasetOrigin::Remote => println!(
                    "Cached {} dataset entries from {}",
                    outcome.dataset.len(),
                    url
                ),
                other => println!(
                    "Remote dataset not adopted; using {} set ({} entries)",
                    origin_label(other),
                    outcome.dataset.len()
                ),
            }
        }

        Ok(())
    }
}

/// Show knowledge base statistics
#[derive(Args, Debug)]
pub struct KnowledgeStatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeStatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        // Cache only: stats never touch the network.
        let offline_config = AppConfig {
            dataset_url: None,
            ..config.clone()
        };
        let (kb, origin) = load_knowledge(&offline_config).await?;
        let store_path = get_store_path(&config.workspace);

        if self.json {
            let output = serde_json::json!({
                "glossaryTerms": kb.glossary.len(),
                "datasetEntries": kb.dataset.len(),
                "bundledEntries": Dataset::bundled().len(),
                "datasetOrigin": origin_label(origin),
                "rules": kb.rules.len(),
                "cachePath": store_path,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Glossary terms:  {}", kb.glossary.len());
            println!(
                "Dataset entries: {} ({})",
                kb.dataset.len(),
                origin_label(origin)
            );
            println!("Rules of thumb:  {}", kb.rules.len());
            println!("Cache:           {}", store_path.display());
        }

        Ok(())
    }
}

/// List fallback prompt overrides
#[derive(Args, Debug)]
pub struct KnowledgePromptsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgePromptsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let ids = list_prompts(&config.workspace)?;
        let overridden = ids.iter().any(|id| id == DEFAULT_PROMPT_ID);

        if self.json {
            let output = serde_json::json!({
                "prompts": ids,
                "active": DEFAULT_PROMPT_ID,
                "activeOverridden": overridden,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if ids.is_empty() {
            println!("No prompt files under .nivesh/prompts/");
        }
        for id in &ids {
            let marker = if id == DEFAULT_PROMPT_ID { " (active)" } else { "" };
            println!("{}{}", id, marker);
        }
        if !overridden {
            println!("{} (built-in, active)", DEFAULT_PROMPT_ID);
        }

        Ok(())
    }
}

fn origin_label(origin: DatasetOrigin) -> &'static str {
    match origin {
        DatasetOrigin::Bundled => "bundled",
        DatasetOrigin::Cache => "cached",
        DatasetOrigin::Remote => "remote",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prompts_in_empty_workspace() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        let cmd = KnowledgePromptsCommand { json: true };
        assert!(cmd.execute(&config).is_ok());
    }
}
