//! Configuration management for Nivesh.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.nivesh/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The configuration is workspace-centric, with the
//! dataset cache and prompt overrides stored under `.nivesh/`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Default hosted text-generation model.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Environment variable holding the hosted provider credential by default.
pub const DEFAULT_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

const KNOWN_PROVIDERS: [&str; 2] = ["huggingface", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .nivesh/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Fallback provider ("huggingface" or "ollama")
    pub provider: String,

    /// Fallback model identifier
    pub model: String,

    /// Custom provider endpoint
    pub endpoint: Option<String>,

    /// Explicit credential for the fallback provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Whether offline mode still runs dataset and rule matching
    pub local_policy: LocalPolicy,

    /// Location of the extended Q&A dataset
    pub dataset_url: Option<String>,

    /// The user's savings goal, used to personalise goal answers
    pub goal: Option<GoalConfig>,

    /// Provider configurations from config.yaml
    pub providers: HashMap<String, ProviderConfig>,
}

/// Which local stages run when the remote fallback is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalPolicy {
    /// Glossary, dataset, rules and timeframe stages all run
    #[default]
    Full,

    /// Only the glossary runs before the offline heuristic
    HeuristicsOnly,
}

impl LocalPolicy {
    /// Parse a policy name as used in flags and environment variables.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(Self::Full),
            "heuristics-only" | "heuristics" => Some(Self::HeuristicsOnly),
            _ => None,
        }
    }
}

/// A savings goal as stored by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub name: String,
    pub amount: f64,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    HuggingFace {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    /// Model configured for this provider.
    pub fn model(&self) -> &str {
        match self {
            Self::HuggingFace { model, .. } | Self::Ollama { model, .. } => model,
        }
    }

    /// Request timeout configured for this provider, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::HuggingFace { .. } => None,
            Self::Ollama { timeout, .. } => timeout.map(Duration::from_secs),
        }
    }

    /// Endpoint configured for this provider, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::HuggingFace { endpoint, .. } => endpoint.as_deref(),
            Self::Ollama { endpoint, .. } => Some(endpoint),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    advisor: Option<AdvisorSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    #[serde(rename = "activeProvider")]
    active_provider: String,
    #[serde(default)]
    providers: HashMap<String, ProviderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AdvisorSection {
    #[serde(rename = "localPolicy")]
    local_policy: Option<LocalPolicy>,
    #[serde(rename = "datasetUrl")]
    dataset_url: Option<String>,
    goal: Option<GoalConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "huggingface".to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            local_policy: LocalPolicy::Full,
            dataset_url: None,
            goal: None,
            providers: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `NIVESH_WORKSPACE`: Override workspace path
    /// - `NIVESH_CONFIG`: Path to config file
    /// - `NIVESH_PROVIDER`: Fallback provider
    /// - `NIVESH_MODEL`: Model identifier
    /// - `NIVESH_ENDPOINT`: Provider endpoint
    /// - `NIVESH_API_KEY`: Provider credential
    /// - `NIVESH_DATASET_URL`: Extended dataset location
    /// - `NIVESH_LOCAL_POLICY`: `full` or `heuristics-only`
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use nivesh_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Provider: {}", config.provider);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("NIVESH_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("NIVESH_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.nivesh_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("NIVESH_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("NIVESH_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("NIVESH_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(url) = std::env::var("NIVESH_DATASET_URL") {
            config.dataset_url = Some(url);
        }

        if let Ok(policy) = std::env::var("NIVESH_LOCAL_POLICY") {
            config.local_policy = LocalPolicy::parse(&policy).ok_or_else(|| {
                AppError::Config(format!("Unknown local policy: {}", policy))
            })?;
        }

        config.api_key = std::env::var("NIVESH_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.merge_file(config_file))
    }

    fn merge_file(&self, config_file: ConfigFile) -> Self {
        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(advisor) = config_file.advisor {
            if let Some(policy) = advisor.local_policy {
                result.local_policy = policy;
            }
            if advisor.dataset_url.is_some() {
                result.dataset_url = advisor.dataset_url;
            }
            if advisor.goal.is_some() {
                result.goal = advisor.goal;
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = provider_config.model().to_string();
                result.endpoint = provider_config.endpoint().map(str::to_string);
            }

            result.providers = llm.providers;
        }

        result
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Replace the stored goal with one given on the command line.
    pub fn with_goal(mut self, name: Option<String>, amount: Option<f64>) -> Self {
        match (name, amount) {
            (Some(name), Some(amount)) => self.goal = Some(GoalConfig { name, amount }),
            (Some(name), None) => {
                let amount = self.goal.as_ref().map(|g| g.amount).unwrap_or(0.0);
                self.goal = Some(GoalConfig { name, amount });
            }
            (None, Some(amount)) => {
                if let Some(goal) = self.goal.as_mut() {
                    goal.amount = amount;
                }
            }
            (None, None) => {}
        }
        self
    }

    /// Get the path to the .nivesh directory.
    pub fn nivesh_dir(&self) -> PathBuf {
        self.workspace.join(".nivesh")
    }

    /// Ensure the .nivesh directory exists.
    pub fn ensure_nivesh_dir(&self) -> AppResult<()> {
        let dir = self.nivesh_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .nivesh directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get the configuration of a named provider.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider)
    }

    /// Request timeout of the active provider, if configured.
    pub fn provider_timeout(&self) -> Option<Duration> {
        self.get_provider_config(&self.provider)
            .and_then(ProviderConfig::timeout)
    }

    /// Resolve the credential for a provider.
    ///
    /// An explicit `NIVESH_API_KEY` wins; otherwise the provider's `apiKeyEnv`
    /// (or `HUGGINGFACE_API_KEY` for the hosted default) is read.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        let env_var = match self.get_provider_config(provider) {
            Some(ProviderConfig::HuggingFace { api_key_env, .. }) => api_key_env.as_str(),
            Some(ProviderConfig::Ollama { .. }) => return None,
            None if provider == "huggingface" => DEFAULT_API_KEY_ENV,
            None => return None,
        };

        std::env::var(env_var).ok()
    }

    /// Validate configuration for the active provider.
    ///
    /// A missing credential is not a validation error: it selects offline mode.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if let Some(goal) = &self.goal {
            if goal.amount < 0.0 || !goal.amount.is_finite() {
                return Err(AppError::Config(format!(
                    "Goal amount must be a non-negative number, got {}",
                    goal.amount
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "huggingface");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.local_policy, LocalPolicy::Full);
        assert!(config.goal.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_nivesh_dir() {
        let config = AppConfig::default();
        assert!(config.nivesh_dir().ends_with(".nivesh"));
    }

    #[test]
    fn test_with_overrides() {
        let overridden = AppConfig::default().with_overrides(
            None,
            None,
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_with_goal_keeps_existing_amount() {
        let mut config = AppConfig::default();
        config.goal = Some(GoalConfig {
            name: "Car".to_string(),
            amount: 800000.0,
        });

        let config = config.with_goal(Some("Bike".to_string()), None);
        let goal = config.goal.unwrap();
        assert_eq!(goal.name, "Bike");
        assert_eq!(goal.amount, 800000.0);
    }

    #[test]
    fn test_merge_yaml_sections() {
        let yaml = r#"
llm:
  activeProvider: ollama
  providers:
    ollama:
      endpoint: http://localhost:11434
      model: llama3.2
      timeout: 30
advisor:
  localPolicy: heuristics-only
  datasetUrl: https://example.org/dataset.json
  goal:
    name: House
    amount: 2500000
logging:
  level: info
  color: false
"#;
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.provider, "ollama");
        assert_eq!(merged.model, "llama3.2");
        assert_eq!(merged.endpoint.as_deref(), Some("http://localhost:11434"));
        assert_eq!(merged.provider_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(merged.local_policy, LocalPolicy::HeuristicsOnly);
        assert_eq!(
            merged.dataset_url.as_deref(),
            Some("https://example.org/dataset.json")
        );
        assert_eq!(merged.goal.unwrap().name, "House");
        assert_eq!(merged.log_level.as_deref(), Some("info"));
        assert!(merged.no_color);
    }

    #[test]
    fn test_untagged_provider_config() {
        let yaml = "apiKeyEnv: HF_TOKEN\nmodel: google/flan-t5-large\n";
        let parsed: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(parsed, ProviderConfig::HuggingFace { .. }));
        assert_eq!(parsed.model(), "google/flan-t5-large");
        assert_eq!(parsed.endpoint(), None);
        assert_eq!(parsed.timeout(), None);
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit() {
        let mut config = AppConfig::default();
        config.api_key = Some("hf_explicit".to_string());
        assert_eq!(
            config.resolve_api_key("huggingface"),
            Some("hf_explicit".to_string())
        );
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let mut config = AppConfig::default();
        config.providers.insert(
            "ollama".to_string(),
            ProviderConfig::Ollama {
                endpoint: "http://localhost:11434".to_string(),
                model: "llama3.2".to_string(),
                timeout: None,
            },
        );
        assert_eq!(config.resolve_api_key("ollama"), None);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_goal() {
        let mut config = AppConfig::default();
        config.goal = Some(GoalConfig {
            name: "Trip".to_string(),
            amount: -1.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_local_policy_parse() {
        assert_eq!(LocalPolicy::parse("FULL"), Some(LocalPolicy::Full));
        assert_eq!(
            LocalPolicy::parse("heuristics-only"),
            Some(LocalPolicy::HeuristicsOnly)
        );
        assert_eq!(LocalPolicy::parse("sometimes"), None);
    }
}
