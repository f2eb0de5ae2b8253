//! Prompt loader for YAML prompt definitions.
//!
//! Definitions live in `.nivesh/prompts/<id>.yml`. The fallback prompt has a
//! built-in default that a workspace file with the same id overrides.

use crate::types::{
    GenerationSettings, PromptContextConfig, PromptDefinition, PromptOutputSpec,
};
use nivesh_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Identifier of the built-in fallback prompt.
pub const DEFAULT_PROMPT_ID: &str = "advisor.fallback.default";

const DEFAULT_PERSONA: &str = "You are Nivesh, a friendly investment education assistant for Indian retail investors. Answer in plain language in three to five sentences, using Indian instruments such as SIP, PPF, ELSS, NPS and fixed deposits, with rupee amounts where they help. Never recommend a specific stock or promise returns.";

const DEFAULT_TEMPLATE: &str = "{{#if glossary}}Glossary of Indian investment terms:\n{{glossary}}\n\n{{/if}}{{#if relatedQuestions}}Related questions from our knowledge base:\n{{#each relatedQuestions}}- {{this}}\n{{/each}}\n{{/if}}Question: {{question}}\nAnswer:";

/// The built-in fallback prompt.
pub fn default_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Investment assistant fallback".to_string(),
        api_version: "1.0".to_string(),
        created_by: "nivesh".to_string(),
        persona: DEFAULT_PERSONA.to_string(),
        context: PromptContextConfig::default(),
        generation: GenerationSettings::default(),
        template: DEFAULT_TEMPLATE.to_string(),
        output: PromptOutputSpec {
            format: "text".to_string(),
        },
    }
}

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".nivesh").join("prompts")
}

/// Load a prompt definition by ID from the workspace.
///
/// # Example
/// ```no_run
/// use nivesh_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "advisor.fallback.default")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load the workspace override of a prompt, or the built-in default.
///
/// A missing file is not an error. A present but invalid file is.
pub fn load_prompt_or_default(
    workspace_path: &Path,
    prompt_id: &str,
) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));
    if prompt_file.exists() {
        load_prompt(workspace_path, prompt_id)
    } else {
        tracing::debug!("No override for {}, using built-in prompt", prompt_id);
        Ok(default_prompt())
    }
}

/// List all available prompt IDs in the workspace.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids = Vec::new();

    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                prompt_ids.push(stem.to_string());
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    let g = &def.generation;
    if g.max_tokens == 0 {
        return Err(AppError::Prompt("maxTokens must be positive".to_string()));
    }
    if !(0.0..=1.0).contains(&g.top_p) {
        return Err(AppError::Prompt(format!(
            "topP must be between 0 and 1, got {}",
            g.top_p
        )));
    }
    if g.temperature < 0.0 {
        return Err(AppError::Prompt(format!(
            "temperature cannot be negative, got {}",
            g.temperature
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, id: &str, body: &str) -> PathBuf {
        let dir = prompts_dir(dir);
        fs::create_dir_all(&dir).unwrap();
        let file_path = dir.join(format!("{}.yml", id));
        fs::write(&file_path, body).unwrap();
        file_path
    }

    fn valid_body(id: &str) -> String {
        format!(
            r#"
id: {}
title: "Test Prompt"
apiVersion: "1.0"
persona: "Short answers only."
template: "Q: {{{{question}}}}"
output:
  format: text
"#,
            id
        )
    }

    #[test]
    fn test_default_prompt_is_valid() {
        assert!(validate_prompt(&default_prompt()).is_ok());
    }

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "test.prompt", &valid_body("test.prompt"));

        let prompt = load_prompt(temp_dir.path(), "test.prompt").unwrap();
        assert_eq!(prompt.id, "test.prompt");
        assert_eq!(prompt.template, "Q: {{question}}");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "invalid", "invalid: yaml: content:");
        assert!(load_prompt(temp_dir.path(), "invalid").is_err());
    }

    #[test]
    fn test_bad_version_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let body = valid_body("v").replace("\"1.0\"", "\"1\"");
        write_prompt(temp_dir.path(), "v", &body);
        assert!(load_prompt(temp_dir.path(), "v").is_err());
    }

    #[test]
    fn test_override_or_default() {
        let temp_dir = TempDir::new().unwrap();
        let builtin = load_prompt_or_default(temp_dir.path(), DEFAULT_PROMPT_ID).unwrap();
        assert_eq!(builtin.id, DEFAULT_PROMPT_ID);
        assert!(builtin.template.contains("{{question}}"));

        write_prompt(temp_dir.path(), DEFAULT_PROMPT_ID, &valid_body(DEFAULT_PROMPT_ID));
        let overridden = load_prompt_or_default(temp_dir.path(), DEFAULT_PROMPT_ID).unwrap();
        assert_eq!(overridden.persona, "Short answers only.");
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "prompt2", &valid_body("prompt2"));
        write_prompt(temp_dir.path(), "prompt1", &valid_body("prompt1"));

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["prompt1".to_string(), "prompt2".to_string()]);
    }
}
