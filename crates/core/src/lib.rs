//! Nivesh Core Library
//!
//! This crate provides the foundational utilities shared by every Nivesh crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, GoalConfig, LocalPolicy};
pub use error::{AppError, AppResult};
