//! Rule-of-thumb classifier.
//!
//! Questions that mention a rule trigger word are matched against rule names
//! first, then against topic buckets, then against a list-all request. Three
//! further classifiers (vehicle purchase, budget, doubling) fire without the
//! trigger word.

use crate::query::Query;
use nivesh_knowledge::{Rule, RuleId};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const TRIGGER_WORDS: [&str; 6] = [
    "rule",
    "strategy",
    "formula",
    "principle",
    "ratio",
    "calculation",
];

const VEHICLE_WORDS: [&str; 7] = [
    "car",
    "cars",
    "bike",
    "bikes",
    "vehicle",
    "vehicles",
    "automobile",
];

const HOME_WORDS: [&str; 6] = ["home", "house", "property", "flat", "mortgage", "housing"];

const RETIREMENT_WORDS: [&str; 3] = ["retire", "pension", "fire"];

const PURCHASE_WORDS: [&str; 4] = ["buy", "buying", "purchase", "afford"];

const BUDGET_WORDS: [&str; 6] = [
    "budget",
    "allocate",
    "allocation",
    "spending",
    "expense",
    "income allocation",
];

const GROWTH_WORDS: [&str; 5] = ["double", "compound", "growth", "triple", "calculate return"];

const LIST_ALL_PHRASES: [&str; 8] = [
    "what rules",
    "which rules",
    "what are the rules",
    "all rules",
    "what strategies",
    "what formulas",
    "rules of thumb",
    "financial rules",
];

const VEHICLE_RULES: [RuleId; 2] = [RuleId::TWENTY_FOUR_TEN, RuleId::FORTY_PERCENT_EMI];
const HOME_RULES: [RuleId; 2] = [RuleId::TWENTY_EIGHT_THIRTY_SIX, RuleId::FORTY_PERCENT_EMI];
const RETIREMENT_RULES: [RuleId; 3] = [
    RuleId::HUNDRED_MINUS_AGE,
    RuleId::FOUR_PERCENT_WITHDRAWAL,
    RuleId::TWENTY_FIVE_X,
];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("number pattern is valid"))
}

fn triple_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d+(?:[\s\-/]+\d+){2,}").expect("triple pattern is valid")
    })
}

/// Whether the question mentions a rule trigger word.
pub fn is_rule_question(query: &Query) -> bool {
    query.contains_any(&TRIGGER_WORDS)
}

pub fn is_vehicle_purchase(query: &Query) -> bool {
    query.has_any_word(&PURCHASE_WORDS) && mentions_vehicle(query)
}

pub fn is_budget_question(query: &Query) -> bool {
    query.contains_any(&BUDGET_WORDS)
}

pub fn is_growth_question(query: &Query) -> bool {
    query.contains_any(&GROWTH_WORDS)
}

fn mentions_vehicle(query: &Query) -> bool {
    query.has_any_word(&VEHICLE_WORDS) || query.contains("two-wheeler")
}

/// Rules selected for a question that passed the trigger-word gate.
///
/// Name matches win over topic buckets, which win over a list-all request.
/// An empty result means the gate fired but nothing matched.
pub fn classify<'a>(query: &Query, rules: &'a [Rule]) -> Vec<&'a Rule> {
    let named = by_name(query, rules);
    if !named.is_empty() {
        return named;
    }

    let topical = by_topic(query, rules);
    if !topical.is_empty() {
        return topical;
    }

    if wants_all(query) {
        return rules.iter().collect();
    }

    Vec::new()
}

/// Rules whose name the question mentions, in list order.
pub fn by_name<'a>(query: &Query, rules: &'a [Rule]) -> Vec<&'a Rule> {
    let text = query.lower().replace('-', " ");
    let numbers = bare_numbers(query.lower());

    rules
        .iter()
        .filter(|rule| name_matches(&rule.name, &text, query.lower(), &numbers))
        .collect()
}

fn name_matches(name: &str, text: &str, lower: &str, numbers: &HashSet<String>) -> bool {
    let name = name.to_lowercase();
    let spaced = name.replace('-', " ");
    let core = spaced
        .strip_suffix(" rule")
        .unwrap_or(&spaced)
        .trim()
        .to_string();

    if !core.is_empty() && text.contains(&core) {
        return true;
    }

    if let Some(group) = triple_pattern().find(&name) {
        return triple_regex(group.as_str()).is_some_and(|re| re.is_match(lower));
    }

    number_pattern()
        .find_iter(&name)
        .any(|m| numbers.contains(m.as_str()))
}

/// Regex matching the digits of a `d-d-d` group separated by spaces, hyphens or slashes.
fn triple_regex(group: &str) -> Option<Regex> {
    let digits: Vec<&str> = number_pattern().find_iter(group).map(|m| m.as_str()).collect();
    let body = digits.join(r"[\s\-/]+");
    Regex::new(&format!(r"(?:^|\D){}(?:\D|$)", body)).ok()
}

/// Standalone numbers in the question, ignoring any `d-d-d` groups.
fn bare_numbers(lower: &str) -> HashSet<String> {
    let without_groups = triple_pattern().replace_all(lower, " ");
    number_pattern()
        .find_iter(&without_groups)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Rules for vehicle, home or retirement questions, first bucket that applies.
pub fn by_topic<'a>(query: &Query, rules: &'a [Rule]) -> Vec<&'a Rule> {
    let bucket: &[RuleId] = if mentions_vehicle(query) {
        &VEHICLE_RULES
    } else if query.has_any_word(&HOME_WORDS) {
        &HOME_RULES
    } else if query.contains("retire") || query.has_any_word(&RETIREMENT_WORDS) {
        &RETIREMENT_RULES
    } else {
        return Vec::new();
    };

    select(rules, bucket)
}

pub fn wants_all(query: &Query) -> bool {
    query.contains_any(&LIST_ALL_PHRASES) || query.has_word("list")
}

/// Rules with the given ids, in list order.
pub fn select<'a>(rules: &'a [Rule], ids: &[RuleId]) -> Vec<&'a Rule> {
    rules.iter().filter(|r| ids.contains(&r.id)).collect()
}
