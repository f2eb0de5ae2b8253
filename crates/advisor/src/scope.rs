//! Out-of-scope filter applied before a question reaches the responder.

use crate::query::Query;
use serde::Serialize;

/// Questions shorter than this are too vague to answer.
pub const MIN_QUESTION_LEN: usize = 10;

const PROHIBITED_TERMS: [&str; 18] = [
    "illegal",
    "black money",
    "money laundering",
    "launder",
    "insider trading",
    "tax evasion",
    "evade tax",
    "hawala",
    "ponzi",
    "gambling",
    "betting",
    "casino",
    "lottery",
    "crypto",
    "bitcoin",
    "ethereum",
    "guaranteed returns",
    "get rich quick",
];

const RECOMMENDATION_PHRASES: [&str; 8] = [
    "which stock should i buy",
    "which stocks should i buy",
    "which share should i buy",
    "is it a good time to",
    "should i buy this stock",
    "tell me a stock",
    "best stock to buy",
    "price target",
];

const CHIT_CHAT_PHRASES: [&str; 9] = [
    "how are you",
    "who are you",
    "what is your name",
    "what's your name",
    "tell me a joke",
    "weather",
    "movie",
    "cricket score",
    "recipe",
];

pub const TOO_SHORT_REPLY: &str = "Could you tell me a bit more? Ask a complete question about investing, saving or personal finance and I will do my best to help.";

pub const PROHIBITED_REPLY: &str = "I can only help with legal, regulated investments in India. I cannot discuss crypto, gambling, schemes that promise guaranteed returns, or anything that breaks the law.";

pub const RECOMMENDATION_REPLY: &str = "I cannot recommend specific stocks or tell you when to buy or sell. I can explain how to evaluate investments, for example through diversified mutual funds, index funds or rules such as the 100 Minus Age Rule.";

pub const CHIT_CHAT_REPLY: &str = "I am Nivesh, your investment education assistant. I can answer questions about mutual funds, SIPs, PPF, FDs, stocks, tax saving and financial rules of thumb.";

/// Why a question was kept away from the responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "matched", rename_all = "kebab-case")]
pub enum ScopeReason {
    TooShort,
    Prohibited(&'static str),
    Recommendation(&'static str),
    ChitChat(&'static str),
}

impl ScopeReason {
    /// Canned reply shown instead of an answer.
    pub fn reply(&self) -> &'static str {
        match self {
            Self::TooShort => TOO_SHORT_REPLY,
            Self::Prohibited(_) => PROHIBITED_REPLY,
            Self::Recommendation(_) => RECOMMENDATION_REPLY,
            Self::ChitChat(_) => CHIT_CHAT_REPLY,
        }
    }
}

/// Classify a question, returning the reason when it is out of scope.
pub fn check(question: &str) -> Option<ScopeReason> {
    let query = Query::new(question);

    if query.lower().chars().count() < MIN_QUESTION_LEN {
        return Some(ScopeReason::TooShort);
    }

    if let Some(term) = find(&query, &PROHIBITED_TERMS) {
        return Some(ScopeReason::Prohibited(term));
    }

    if let Some(phrase) = find(&query, &RECOMMENDATION_PHRASES) {
        return Some(ScopeReason::Recommendation(phrase));
    }

    find(&query, &CHIT_CHAT_PHRASES).map(ScopeReason::ChitChat)
}

pub fn is_in_scope(question: &str) -> bool {
    check(question).is_none()
}

fn find(query: &Query, needles: &[&'static str]) -> Option<&'static str> {
    needles.iter().copied().find(|n| query.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_questions_rejected() {
        assert_eq!(check("sip"), Some(ScopeReason::TooShort));
        assert_eq!(check("   what?    "), Some(ScopeReason::TooShort));
    }

    #[test]
    fn test_prohibited_topics() {
        assert_eq!(check("bitcoin to the moon"), Some(ScopeReason::Prohibited("bitcoin")));
        assert_eq!(
            check("Show me a scheme with guaranteed returns"),
            Some(ScopeReason::Prohibited("guaranteed returns"))
        );
    }

    #[test]
    fn test_recommendation_requests() {
        assert_eq!(
            check("which stock should I buy"),
            Some(ScopeReason::Recommendation("which stock should i buy"))
        );
        assert!(matches!(
            check("Is it a good time to enter the market?"),
            Some(ScopeReason::Recommendation(_))
        ));
    }

    #[test]
    fn test_chit_chat() {
        assert_eq!(check("Hey, how are you today?"), Some(ScopeReason::ChitChat("how are you")));
    }

    #[test]
    fn test_financial_questions_accepted() {
        assert!(is_in_scope("What is an SIP and how does it work in India?"));
        assert!(is_in_scope("What is the 50-30-20 Rule?"));
        assert!(is_in_scope("I want to invest for 2 years"));
    }

    #[test]
    fn test_every_reason_has_a_reply() {
        for reason in [
            ScopeReason::TooShort,
            ScopeReason::Prohibited("ponzi"),
            ScopeReason::Recommendation("price target"),
            ScopeReason::ChitChat("movie"),
        ] {
            assert!(!reason.reply().is_empty());
        }
    }
}
