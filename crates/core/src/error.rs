//! Error types for Nivesh.
//!
//! This module defines a unified error enum that covers the infrastructure
//! failures of the application: configuration, I/O, remote generation,
//! knowledge tables, prompts and the transaction ledger.
//!
//! Answer-level outcomes (out-of-scope questions, irrelevant remote
//! responses, unreachable services) are not errors. They are resolved into
//! displayable answers by the advisor.

use thiserror::Error;

/// Unified error type for Nivesh.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote text-generation errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Glossary, dataset and rule table errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Transaction ledger errors
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: AppError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_error_display_includes_category() {
        let err = AppError::Llm("endpoint unreachable".to_string());
        assert_eq!(err.to_string(), "LLM error: endpoint unreachable");
    }
}
