//! Knowledge table type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A glossary entry keyed by a short lowercase code such as `sip` or `ppf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Lowercase lookup key
    pub key: String,

    /// Definition returned verbatim
    pub definition: String,
}

impl GlossaryTerm {
    pub fn new(key: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            definition: definition.into(),
        }
    }
}

/// A canonical question with its answer, used for similarity search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAEntry {
    pub question: String,
    pub answer: String,
}

impl QAEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Stable identifier of a rule of thumb.
///
/// Dispatch (worked examples, topic buckets) keys on this value, never on
/// the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RuleId(pub &'static str);

impl RuleId {
    pub const FIFTY_THIRTY_TWENTY: RuleId = RuleId("fifty-thirty-twenty");
    pub const RULE_OF_72: RuleId = RuleId("rule-of-72");
    pub const RULE_OF_114: RuleId = RuleId("rule-of-114");
    pub const RULE_OF_70: RuleId = RuleId("rule-of-70");
    pub const HUNDRED_MINUS_AGE: RuleId = RuleId("hundred-minus-age");
    pub const FOUR_PERCENT_WITHDRAWAL: RuleId = RuleId("four-percent-withdrawal");
    pub const TWENTY_FIVE_X: RuleId = RuleId("twenty-five-x");
    pub const TWENTY_FOUR_TEN: RuleId = RuleId("twenty-four-ten");
    pub const TEN_FIVE_THREE: RuleId = RuleId("ten-five-three");
    pub const TWENTY_EIGHT_THIRTY_SIX: RuleId = RuleId("twenty-eight-thirty-six");
    pub const FORTY_PERCENT_EMI: RuleId = RuleId("forty-percent-emi");
    pub const EMERGENCY_FUND: RuleId = RuleId("emergency-fund");
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A financial rule of thumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: RuleId,

    /// Display name, e.g. "50-30-20 Rule"
    pub name: String,

    pub description: String,

    /// How to put the rule into practice
    pub application: String,
}

impl Rule {
    pub fn new(
        id: RuleId,
        name: impl Into<String>,
        description: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            application: application.into(),
        }
    }
}
