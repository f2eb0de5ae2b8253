//! Glossary of investment terms keyed by short lowercase codes.

use crate::types::GlossaryTerm;
use nivesh_core::{AppError, AppResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Terms that users commonly ask about in the plural.
const PLURALS: [(&str, &str); 1] = [("sips", "sip")];

/// Substring matches against keys need at least this many characters.
const MIN_PARTIAL_LEN: usize = 3;

fn definition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*what\s+(?:is|are)\s+(?:(?:a|an|the)\s+)?(.+?)[\s?.!]*$")
            .expect("definition pattern is valid")
    })
}

/// Immutable glossary with unique lowercase keys.
#[derive(Debug, Clone)]
pub struct Glossary {
    terms: Vec<GlossaryTerm>,
}

impl Glossary {
    /// Build a glossary, rejecting duplicate or non-lowercase keys.
    pub fn new(terms: Vec<GlossaryTerm>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for term in &terms {
            if term.key.is_empty() || term.key != term.key.to_lowercase() {
                return Err(AppError::Knowledge(format!(
                    "Glossary key must be non-empty lowercase: {:?}",
                    term.key
                )));
            }
            if !seen.insert(term.key.as_str()) {
                return Err(AppError::Knowledge(format!(
                    "Duplicate glossary key: {}",
                    term.key
                )));
            }
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Definition stored for an exact key.
    pub fn get(&self, key: &str) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.key == key)
    }

    /// Resolve an extracted term by exact, substring or superstring match.
    pub fn lookup_term(&self, term: &str) -> Option<&GlossaryTerm> {
        let term = term.trim().to_lowercase();
        let term = PLURALS
            .iter()
            .find(|(plural, _)| *plural == term)
            .map(|(_, singular)| singular.to_string())
            .unwrap_or(term);

        if term.is_empty() {
            return None;
        }

        if let Some(exact) = self.get(&term) {
            return Some(exact);
        }

        if term.chars().count() >= MIN_PARTIAL_LEN {
            if let Some(found) = self.terms.iter().find(|t| t.key.contains(term.as_str())) {
                return Some(found);
            }
        }

        self.terms.iter().find(|t| term.contains(t.key.as_str()))
    }

    /// Answer a "what is / what are TERM" question.
    pub fn define(&self, question: &str) -> Option<&GlossaryTerm> {
        let lower = question.to_lowercase();
        let captures = definition_pattern().captures(&lower)?;
        let term = captures.get(1)?.as_str();
        self.lookup_term(term)
    }

    /// First term whose key appears anywhere in the question.
    pub fn spot(&self, question: &str) -> Option<&GlossaryTerm> {
        let lower = question.to_lowercase();
        self.terms.iter().find(|t| lower.contains(t.key.as_str()))
    }

    /// Full glossary step: the definition pattern first, then keyword spotting.
    pub fn lookup(&self, question: &str) -> Option<&GlossaryTerm> {
        self.define(question).or_else(|| self.spot(question))
    }

    /// The glossary bundled with the application.
    pub fn bundled() -> Self {
        let terms = [
            ("sip", "SIP (Systematic Investment Plan) is a way to invest a fixed amount in a mutual fund at regular intervals, usually monthly. It builds investing discipline, averages your purchase cost through rupee cost averaging, and you can start with as little as ₹500 a month."),
            ("swp", "SWP (Systematic Withdrawal Plan) lets you withdraw a fixed amount from a mutual fund at regular intervals. Retirees often use it to draw a monthly income while the remaining units stay invested."),
            ("ppf", "PPF (Public Provident Fund) is a government-backed savings scheme with a 15-year lock-in, currently paying 7.1% a year. Deposits of up to ₹1.5 lakh a year qualify for the Section 80C deduction, and both interest and maturity proceeds are tax-free."),
            ("elss", "ELSS (Equity Linked Savings Scheme) is an equity mutual fund with a 3-year lock-in, the shortest among Section 80C options. Investments of up to ₹1.5 lakh a year are deductible under Section 80C, and gains are taxed as long-term capital gains."),
            ("nps", "NPS (National Pension System) is a government-regulated retirement scheme that invests in a mix of equity, corporate bonds and government securities. Contributions get deductions under Section 80CCD, including an extra ₹50,000 under 80CCD(1B); at 60, up to 60% of the corpus can be withdrawn tax-free and the rest buys an annuity."),
            ("epf", "EPF (Employees' Provident Fund) is a retirement scheme for salaried employees where you and your employer each contribute 12% of basic salary. It currently earns 8.25% a year and the employee contribution qualifies for Section 80C."),
            ("nsc", "NSC (National Savings Certificate) is a 5-year Post Office savings bond with a fixed interest rate, currently 7.7% compounded annually. Investments qualify for Section 80C, but the interest is taxable."),
            ("ulip", "ULIP (Unit Linked Insurance Plan) combines life insurance with market-linked investment and has a 5-year lock-in. Charges are usually higher than a term plan plus a mutual fund, so compare costs before buying."),
            ("cagr", "CAGR (Compound Annual Growth Rate) is the steady yearly rate at which an investment would have grown from its starting value to its ending value. For example, ₹1,00,000 growing to ₹2,00,000 in 6 years is a CAGR of about 12.2%."),
            ("xirr", "XIRR (Extended Internal Rate of Return) measures the annualised return of investments made at different dates, such as monthly SIP instalments. It is the right way to judge SIP performance, because CAGR assumes a single lump sum."),
            ("expense ratio", "The expense ratio is the annual fee a mutual fund charges as a percentage of your investment, deducted from the fund's NAV. Direct plans have lower expense ratios than regular plans, and even a 1% difference compounds into a large gap over 20 years."),
        ];

        let terms = terms
            .into_iter()
            .map(|(key, definition)| GlossaryTerm::new(key, definition))
            .collect();

        Self { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_keys_are_valid() {
        let bundled = Glossary::bundled();
        assert!(Glossary::new(bundled.terms().to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let terms = vec![GlossaryTerm::new("sip", "a"), GlossaryTerm::new("sip", "b")];
        assert!(Glossary::new(terms).is_err());
    }

    #[test]
    fn test_rejects_uppercase_keys() {
        let terms = vec![GlossaryTerm::new("SIP", "a")];
        assert!(Glossary::new(terms).is_err());
    }

    #[test]
    fn test_define_every_key_in_any_case() {
        let glossary = Glossary::bundled();
        for term in glossary.terms() {
            for question in [
                format!("what is {}?", term.key),
                format!("What is {}", term.key.to_uppercase()),
                format!("WHAT ARE the {}?", term.key),
            ] {
                let found = glossary.define(&question).expect(&question);
                assert_eq!(found.definition, term.definition, "{}", question);
            }
        }
    }

    #[test]
    fn test_plural_sips() {
        let glossary = Glossary::bundled();
        assert_eq!(glossary.define("What are SIPs?").unwrap().key, "sip");
    }

    #[test]
    fn test_superstring_match() {
        let glossary = Glossary::bundled();
        assert_eq!(glossary.define("What is a PPF account?").unwrap().key, "ppf");
    }

    #[test]
    fn test_substring_match() {
        let glossary = Glossary::bundled();
        assert_eq!(glossary.define("what is expense?").unwrap().key, "expense ratio");
    }

    #[test]
    fn test_spot_anywhere_in_question() {
        let glossary = Glossary::bundled();
        let found = glossary.spot("Should I stop my SIP during a crash?").unwrap();
        assert_eq!(found.key, "sip");
        assert!(glossary.spot("How much emergency fund should I keep?").is_none());
    }

    #[test]
    fn test_unknown_term() {
        let glossary = Glossary::bundled();
        assert!(glossary.define("What is the 50-30-20 Rule?").is_none());
        assert!(glossary.lookup("I want to invest for 2 years").is_none());
    }
}
