//! Prompt types for the Nivesh fallback.
//!
//! A [`PromptDefinition`] describes how a question is turned into a request
//! for the remote text-generation service: the persona, which knowledge is
//! injected, the generation parameters and the Handlebars template.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt definition loaded from YAML or built in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Fixed system persona, sent as the system text
    pub persona: String,

    /// Knowledge injection settings
    #[serde(default)]
    pub context: PromptContextConfig,

    /// Sampling parameters for the remote call
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Template string with Handlebars syntax
    pub template: String,

    /// Output specification
    pub output: PromptOutputSpec,
}

/// Which parts of the knowledge base are injected into the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptContextConfig {
    /// Include the full glossary
    #[serde(rename = "includeGlossary", default = "default_true")]
    pub include_glossary: bool,

    /// Upper bound on related dataset questions
    #[serde(rename = "maxRelatedQuestions", default = "default_max_related")]
    pub max_related_questions: usize,
}

impl Default for PromptContextConfig {
    fn default() -> Self {
        Self {
            include_glossary: true,
            max_related_questions: default_max_related(),
        }
    }
}

/// Generation parameters passed through to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(rename = "topP")]
    pub top_p: f32,
    #[serde(rename = "doSample")]
    pub do_sample: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
        }
    }
}

/// Output specification for the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOutputSpec {
    /// Output format (e.g., "text", "markdown")
    pub format: String,
}

fn default_true() -> bool {
    true
}

fn default_max_related() -> usize {
    3
}

/// A fully built prompt ready for the remote call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (the persona)
    pub system: Option<String>,

    /// User message (rendered template)
    pub user: String,

    /// Generation parameters copied from the definition
    pub generation: GenerationSettings,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Whether the glossary was injected
    #[serde(rename = "glossaryIncluded")]
    pub glossary_included: bool,

    /// Number of related questions injected
    #[serde(rename = "relatedQuestions")]
    pub related_questions: usize,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: test.prompt
title: Test Prompt
apiVersion: "1.0"
createdBy: test
persona: You are a careful advisor.
context:
  includeGlossary: false
  maxRelatedQuestions: 1
generation:
  maxTokens: 120
  temperature: 0.2
  topP: 0.5
  doSample: false
template: "{{question}}"
output:
  format: markdown
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "test.prompt");
        assert!(!def.context.include_glossary);
        assert_eq!(def.context.max_related_questions, 1);
        assert_eq!(def.generation.max_tokens, 120);
        assert!(!def.generation.do_sample);
    }

    #[test]
    fn test_context_and_generation_default_when_omitted() {
        let yaml = r#"
id: minimal
title: Minimal
apiVersion: "1.0"
persona: Advisor
template: "{{question}}"
output:
  format: text
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(def.context.include_glossary);
        assert_eq!(def.context.max_related_questions, 3);
        assert_eq!(def.generation, GenerationSettings::default());
        assert_eq!(def.created_by, "");
    }
}
