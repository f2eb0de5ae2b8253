//! Question responder for Nivesh.
//!
//! Given a free-text question and the static knowledge base, produces a
//! best-effort answer from the glossary, the Q&A dataset, the rules of thumb
//! or the timeframe heuristic, and falls back to a remote text-generation
//! service or to canned offline paragraphs when none applies.

pub mod answer;
pub mod chat;
pub mod offline;
pub mod query;
pub mod relevance;
pub mod render;
pub mod responder;
pub mod rules;
pub mod scope;
pub mod stages;
pub mod timeframe;

#[cfg(test)]
mod tests;

// Re-export main types
pub use answer::{Answer, AnswerSource};
pub use chat::{ChatMessage, Conversation, Role, GREETING, SUGGESTED_QUESTIONS};
pub use render::DISCLAIMER;
pub use responder::{Connectivity, Fallback, Responder, CONNECTIVITY_NOTICE};
pub use scope::ScopeReason;
