//! Answer types returned by the responder.

use serde::Serialize;

/// Which step of the resolution produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerSource {
    Glossary,
    Dataset,
    Rules,
    Timeframe,
    Remote,
    Offline,
    OutOfScope,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glossary => "glossary",
            Self::Dataset => "dataset",
            Self::Rules => "rules",
            Self::Timeframe => "timeframe",
            Self::Remote => "remote",
            Self::Offline => "offline",
            Self::OutOfScope => "out-of-scope",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A displayable answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Never empty
    pub text: String,

    pub source: AnswerSource,

    /// Transient warning to show alongside the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn is_from_dataset(&self) -> bool {
        self.source == AnswerSource::Dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_without_empty_notice() {
        let answer = Answer::new("text", AnswerSource::OutOfScope);
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["source"], "out-of-scope");
        assert!(json.get("notice").is_none());
        assert_eq!(AnswerSource::OutOfScope.to_string(), "out-of-scope");
    }
}
