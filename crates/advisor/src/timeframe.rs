//! Investment horizon heuristic.

use crate::query::Query;
use regex::Regex;
use std::sync::OnceLock;

pub const SHORT_TERM: &str = "For a short-term goal (up to 1 year), keep your money safe and liquid: consider Liquid Funds, Ultra Short Duration Funds, Bank FDs or a Recurring Deposit (RD). Avoid equity, which can fall sharply over short periods.";

pub const MEDIUM_TERM: &str = "For a medium-term goal (1 to 3 years), balance safety with returns: consider Corporate Bond Funds, Banking & PSU Debt Funds or Post Office Time Deposits. A small allocation to balanced advantage funds can add growth.";

pub const LONG_TERM: &str = "For a long-term goal (more than 3 years), equity can work in your favour: consider an equity SIP in index or flexi-cap funds, along with PPF and NPS for stable, tax-efficient growth. Stay invested through market ups and downs.";

/// Investment horizon derived from a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    /// Bucket a duration: up to 12 months short, up to 36 medium, beyond that long.
    pub fn from_months(months: u32) -> Self {
        match months {
            0..=12 => Self::Short,
            13..=36 => Self::Medium,
            _ => Self::Long,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Short => SHORT_TERM,
            Self::Medium => MEDIUM_TERM,
            Self::Long => LONG_TERM,
        }
    }
}

fn years_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s*(?:years?|yrs?)\b").expect("years pattern is valid")
    })
}

fn months_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*months?\b").expect("months pattern is valid"))
}

/// Whether the question is about investing over some period.
pub fn applies(query: &Query) -> bool {
    query.contains("invest") && query.contains_any(&["year", "month", "time"])
}

/// Total months named in the text, summing every year and month figure.
pub fn duration_months(text: &str) -> u32 {
    let sum = |pattern: &Regex, factor: u32| -> u32 {
        pattern
            .captures_iter(text)
            .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
            .fold(0u32, |acc, n| acc.saturating_add(n.saturating_mul(factor)))
    };

    sum(years_pattern(), 12).saturating_add(sum(months_pattern(), 1))
}

/// Recommendation for the horizon in the question, if a duration is given.
pub fn recommend(query: &Query) -> Option<&'static str> {
    let months = duration_months(query.lower());
    if months == 0 {
        return None;
    }
    Some(Horizon::from_months(months).recommendation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(Horizon::from_months(12), Horizon::Short);
        assert_eq!(Horizon::from_months(13), Horizon::Medium);
        assert_eq!(Horizon::from_months(36), Horizon::Medium);
        assert_eq!(Horizon::from_months(37), Horizon::Long);
    }

    #[test]
    fn test_durations() {
        assert_eq!(duration_months("invest for 1 year"), 12);
        assert_eq!(duration_months("invest for 24 months"), 24);
        assert_eq!(duration_months("invest for 5 years"), 60);
        assert_eq!(duration_months("invest for 2 years 6 months"), 30);
        assert_eq!(duration_months("invest for 3yrs"), 36);
        assert_eq!(duration_months("invest for some time"), 0);
    }

    #[test]
    fn test_recommendations() {
        let cases = [
            ("I want to invest for 1 year", SHORT_TERM),
            ("invest for 24 months", MEDIUM_TERM),
            ("Where should I invest for 5 years?", LONG_TERM),
            ("invest for 2 years 6 months", MEDIUM_TERM),
        ];
        for (question, expected) in cases {
            let query = Query::new(question);
            assert!(applies(&query), "{}", question);
            assert_eq!(recommend(&query), Some(expected), "{}", question);
        }
    }

    #[test]
    fn test_medium_term_names_debt_options() {
        let answer = recommend(&Query::new("I want to invest for 2 years")).unwrap();
        assert!(answer.contains("Corporate Bond Funds"));
        assert!(answer.contains("Banking & PSU Debt Funds"));
        assert!(answer.contains("Post Office Time Deposits"));
    }

    #[test]
    fn test_no_duration_does_not_fire() {
        let query = Query::new("Is this a good time to invest?");
        assert!(applies(&query));
        assert_eq!(recommend(&query), None);
        assert!(!applies(&Query::new("Saving for 2 years")));
    }
}
