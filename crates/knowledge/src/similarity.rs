//! Token-set similarity used to match user questions against the dataset.
//!
//! Tokens are the runs of word characters in the lowercased text; tokens of
//! two characters or fewer are dropped. The score of two texts is the size of
//! the token intersection divided by the size of the larger token set, and an
//! exact case-insensitive match always scores 1.

use std::collections::HashSet;

/// Tokens of this length or shorter carry no signal.
const MIN_TOKEN_LEN: usize = 3;

/// Split text into its significant lowercase word tokens.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Similarity of two texts in `[0, 1]`. Symmetric in its arguments.
pub fn score(a: &str, b: &str) -> f32 {
    if a.trim().to_lowercase() == b.trim().to_lowercase() {
        return 1.0;
    }

    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    let larger = tokens_a.len().max(tokens_b.len());
    if larger == 0 {
        return 0.0;
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    shared as f32 / larger as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokens = tokenize("What is an SIP, and how's it work?");
        assert!(tokens.contains("what"));
        assert!(tokens.contains("sip"));
        assert!(tokens.contains("how"));
        assert!(!tokens.contains("is"));
        assert!(!tokens.contains("an"));
        assert!(!tokens.contains("s"));
    }

    #[test]
    fn test_self_similarity_is_one() {
        let q = "How much emergency fund should I keep?";
        assert_eq!(score(q, q), 1.0);
        assert_eq!(score(q, &q.to_uppercase()), 1.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let pairs = [
            ("How do debt mutual funds work?", "Do mutual funds work for debt?"),
            ("What is asset allocation?", "Explain allocation of assets"),
            ("tax on salary", "How can I reduce my tax on salary income?"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "{} / {}", a, b);
        }
    }

    #[test]
    fn test_score_uses_larger_set() {
        // {how, debt, mutual, funds, work} vs {debt, mutual, funds}
        let s = score("How do debt mutual funds work?", "debt mutual funds");
        assert!((s - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_no_tokens_scores_zero() {
        assert_eq!(score("a b", "c d"), 0.0);
    }
}
