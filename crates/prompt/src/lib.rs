//! Prompt system for the Nivesh fallback.
//!
//! This crate provides:
//! - YAML-based prompt definitions with a built-in default
//! - Handlebars template rendering
//! - Glossary and related-question injection

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, PromptKnowledge};
pub use loader::{
    default_prompt, list_prompts, load_prompt, load_prompt_or_default, DEFAULT_PROMPT_ID,
};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, GenerationSettings, PromptContextConfig, PromptDefinition,
    PromptOutputSpec,
};
