//! Static investment knowledge for Nivesh.
//!
//! Provides the glossary, the Q&A dataset with token-set similarity search,
//! the rules of thumb with their worked examples, and the bootstrap of an
//! extended dataset cached on disk. All tables are immutable once built.

pub mod bootstrap;
pub mod cache;
pub mod dataset;
pub mod glossary;
pub mod money;
pub mod rules;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use bootstrap::{bootstrap_dataset, BootstrapOutcome, DatasetOrigin, DATASET_CACHE_KEY};
pub use cache::KvStore;
pub use dataset::{Dataset, DatasetMatch, MATCH_THRESHOLD};
pub use glossary::Glossary;
pub use money::format_inr;
pub use rules::{bundled_rules, worked_example, GENERIC_EXAMPLE};
pub use types::{GlossaryTerm, QAEntry, Rule, RuleId};

/// The three read-only tables the advisor answers from.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub glossary: Glossary,
    pub dataset: Dataset,
    pub rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// Tables bundled with the application.
    pub fn bundled() -> Self {
        Self {
            glossary: Glossary::bundled(),
            dataset: Dataset::bundled(),
            rules: bundled_rules(),
        }
    }

    /// Replace the dataset, e.g. with a bootstrapped extension.
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The glossary as `KEY: definition` lines, as embedded in fallback prompts.
    pub fn glossary_text(&self) -> String {
        self.glossary
            .terms()
            .iter()
            .map(|t| format!("{}: {}", t.key.to_uppercase(), t.definition))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
