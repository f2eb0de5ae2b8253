//! Post-processing of remote answers.
//!
//! A remote answer is trimmed and checked against the question before it is
//! shown. Rejected answers are replaced by the offline heuristic without
//! telling the user.

use crate::query::Query;
use crate::render::with_disclaimer;

/// Financial keywords that, when asked about, must appear in the answer.
const FINANCIAL_KEYWORDS: [&str; 20] = [
    "mutual fund",
    "index fund",
    "fixed deposit",
    "sip",
    "ppf",
    "elss",
    "nps",
    "epf",
    "fd",
    "equity",
    "stock",
    "bond",
    "gold",
    "tax",
    "insurance",
    "loan",
    "emi",
    "inflation",
    "retirement",
    "pension",
];

/// Phrases that mark an answer as off-topic or evasive.
const OFF_TOPIC_PHRASES: [&str; 12] = [
    "as an ai",
    "i am an ai",
    "i'm an ai",
    "language model",
    "i don't know",
    "i do not know",
    "i cannot help",
    "pizza",
    "recipe",
    "weather",
    "football",
    "movie",
];

const CURRENCY_MARKERS: [&str; 5] = ["₹", "rs.", "rs ", "inr", "$"];

/// Answers shorter than this need a currency marker to count.
const MIN_LENGTH: usize = 50;

/// Why a remote answer was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    MissingKeyword(&'static str),
    OffTopic(&'static str),
    TooShort,
}

/// Outcome of checking a remote answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Trimmed answer with the disclaimer appended.
    Accepted(String),
    Rejected(Rejection),
}

/// Financial keywords present in the text, as whole words or phrases.
pub fn keywords_in(query: &Query) -> Vec<&'static str> {
    FINANCIAL_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| mentions(query, kw))
        .collect()
}

/// Phrases match as substrings; single words as whole words or plurals.
fn mentions(text: &Query, keyword: &str) -> bool {
    if keyword.contains(' ') {
        text.contains(keyword)
    } else {
        text.has_word(keyword)
            || text.has_word(&format!("{}s", keyword))
            || text.has_word(&format!("{}es", keyword))
    }
}

/// Check a remote answer against the question it answers.
pub fn assess(query: &Query, response: &str) -> Verdict {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Verdict::Rejected(Rejection::Empty);
    }

    let answer = Query::new(trimmed);
    let lower = answer.lower();

    if let Some(missing) = keywords_in(query)
        .into_iter()
        .find(|kw| !mentions(&answer, kw))
    {
        return Verdict::Rejected(Rejection::MissingKeyword(missing));
    }

    if let Some(phrase) = OFF_TOPIC_PHRASES.iter().find(|p| lower.contains(*p)) {
        return Verdict::Rejected(Rejection::OffTopic(phrase));
    }

    if trimmed.chars().count() < MIN_LENGTH && !CURRENCY_MARKERS.iter().any(|m| lower.contains(m))
    {
        return Verdict::Rejected(Rejection::TooShort);
    }

    Verdict::Accepted(with_disclaimer(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DISCLAIMER;

    #[test]
    fn test_keywords_in_question() {
        let q = Query::new("Are mutual funds better than FDs for taxes?");
        assert_eq!(keywords_in(&q), vec!["mutual fund", "fd", "tax"]);
        assert!(keywords_in(&Query::new("Is a premium card worth it?")).is_empty());
    }

    #[test]
    fn test_missing_keyword_rejected() {
        let q = Query::new("Are mutual funds better than keeping money idle?");
        assert_eq!(
            assess(&q, "I like pizza"),
            Verdict::Rejected(Rejection::MissingKeyword("mutual fund"))
        );
    }

    #[test]
    fn test_keyword_inside_longer_word_does_not_count() {
        let q = Query::new("How many EMIs can I afford on my salary?");
        assert_eq!(
            assess(&q, "Your insurance premium should stay below a tenth of your take-home salary."),
            Verdict::Rejected(Rejection::MissingKeyword("emi"))
        );
        assert!(matches!(
            assess(&q, "Keep total EMIs under 40% of your take-home salary to stay comfortable."),
            Verdict::Accepted(_)
        ));
    }

    #[test]
    fn test_off_topic_rejected() {
        let q = Query::new("How should I think about my savings this year?");
        assert_eq!(
            assess(&q, "As an AI, I cannot give personal opinions on savings plans for you."),
            Verdict::Rejected(Rejection::OffTopic("as an ai"))
        );
    }

    #[test]
    fn test_short_answer_needs_currency() {
        let q = Query::new("How much should I save every month?");
        assert_eq!(assess(&q, "Save more."), Verdict::Rejected(Rejection::TooShort));
        assert!(matches!(assess(&q, "Save ₹10,000."), Verdict::Accepted(_)));
    }

    #[test]
    fn test_accepted_is_trimmed_with_disclaimer() {
        let q = Query::new("Is an index fund good for beginners?");
        let answer =
            "  An index fund is a low-cost way to own the whole Nifty 50 and suits most beginners.  ";
        match assess(&q, answer) {
            Verdict::Accepted(text) => {
                assert!(text.starts_with("An index fund"));
                assert!(text.ends_with(&format!("_{}_", DISCLAIMER)));
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[test]
    fn test_blank_rejected() {
        assert_eq!(
            assess(&Query::new("anything at all"), "   "),
            Verdict::Rejected(Rejection::Empty)
        );
    }
}
