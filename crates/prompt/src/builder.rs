//! Prompt builder for rendering templates and injecting knowledge.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
use handlebars::Handlebars;
use nivesh_core::{AppError, AppResult};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Knowledge made available to the template.
#[derive(Debug, Clone, Default)]
pub struct PromptKnowledge {
    /// Glossary rendered as `KEY: definition` lines
    pub glossary: Option<String>,

    /// Dataset questions related to the user's question
    pub related_questions: Vec<String>,
}

/// Build a prompt from a definition, the user question and injected knowledge.
///
/// The template sees `persona`, `question`, `glossary` (empty when disabled)
/// and `relatedQuestions` (a list, truncated to `maxRelatedQuestions`).
/// Extra `variables` are passed through unchanged.
///
/// # Example
/// ```no_run
/// use nivesh_prompt::{build_prompt, default_prompt, PromptKnowledge};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let built = build_prompt(
///     &default_prompt(),
///     "Should I invest in index funds?",
///     PromptKnowledge::default(),
///     HashMap::new(),
/// )?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    question: &str,
    knowledge: PromptKnowledge,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let glossary = if definition.context.include_glossary {
        knowledge.glossary.unwrap_or_default()
    } else {
        String::new()
    };
    let glossary_included = !glossary.is_empty();

    let related: Vec<String> = knowledge
        .related_questions
        .into_iter()
        .take(definition.context.max_related_questions)
        .collect();

    let mut resolved = variables;
    resolved.insert("persona".to_string(), definition.persona.clone());
    resolved.insert("question".to_string(), question.to_string());
    resolved.insert("glossary".to_string(), glossary);

    let mut data: Map<String, Value> = resolved
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    data.insert("relatedQuestions".to_string(), json!(related));

    let user = render_template(&definition.template, &Value::Object(data))?;

    tracing::debug!(
        "Rendered prompt {} ({} chars, {} related questions)",
        definition.id,
        user.len(),
        related.len()
    );

    let system = if definition.persona.trim().is_empty() {
        None
    } else {
        Some(definition.persona.clone())
    };

    Ok(BuiltPrompt {
        system,
        user,
        generation: definition.generation.clone(),
        metadata: BuiltPromptMetadata {
            source_prompt_id: definition.id.clone(),
            glossary_included,
            related_questions: related.len(),
            resolved_variables: resolved,
        },
    })
}

/// Render a Handlebars template with a JSON context.
fn render_template(template: &str, data: &Value) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", data)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
