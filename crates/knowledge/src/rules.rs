//! Financial rules of thumb and their worked examples.
//!
//! Each rule carries a stable [`RuleId`]. Worked examples are not stored on
//! the rule: [`worked_example`] dispatches on the id to a generator that
//! computes the figures, so display names can change freely.

use crate::money::{format_inr, format_years};
use crate::types::{Rule, RuleId};

/// Used for any rule without a dedicated example generator.
pub const GENERIC_EXAMPLE: &str =
    "Apply this rule to your own income, expenses and goals to see what it means for you.";

type ExampleGenerator = fn() -> String;

const EXAMPLES: [(RuleId, ExampleGenerator); 12] = [
    (RuleId::FIFTY_THIRTY_TWENTY, fifty_thirty_twenty),
    (RuleId::RULE_OF_72, rule_of_72),
    (RuleId::RULE_OF_114, rule_of_114),
    (RuleId::RULE_OF_70, rule_of_70),
    (RuleId::HUNDRED_MINUS_AGE, hundred_minus_age),
    (RuleId::FOUR_PERCENT_WITHDRAWAL, four_percent_withdrawal),
    (RuleId::TWENTY_FIVE_X, twenty_five_x),
    (RuleId::TWENTY_FOUR_TEN, twenty_four_ten),
    (RuleId::TEN_FIVE_THREE, ten_five_three),
    (RuleId::TWENTY_EIGHT_THIRTY_SIX, twenty_eight_thirty_six),
    (RuleId::FORTY_PERCENT_EMI, forty_percent_emi),
    (RuleId::EMERGENCY_FUND, emergency_fund),
];

/// Worked numeric example for a rule, or [`GENERIC_EXAMPLE`].
pub fn worked_example(id: RuleId) -> String {
    EXAMPLES
        .iter()
        .find(|(rule_id, _)| *rule_id == id)
        .map(|(_, generate)| generate())
        .unwrap_or_else(|| GENERIC_EXAMPLE.to_string())
}

/// Whether a rule has its own example generator.
pub fn has_worked_example(id: RuleId) -> bool {
    EXAMPLES.iter().any(|(rule_id, _)| *rule_id == id)
}

fn fifty_thirty_twenty() -> String {
    let income = 60_000.0;
    format!(
        "On a monthly take-home pay of {}: {} goes to needs (rent, groceries, EMIs), {} to wants (dining out, travel, shopping) and {} to savings and investments.",
        format_inr(income),
        format_inr(income * 0.50),
        format_inr(income * 0.30),
        format_inr(income * 0.20),
    )
}

fn rule_of_72() -> String {
    let principal = 100_000.0;
    format!(
        "At 12% a year, {} doubles to {} in about 72 / 12 = {} years; at a 7% FD rate it takes about {} years.",
        format_inr(principal),
        format_inr(principal * 2.0),
        format_years(72.0 / 12.0),
        format_years(72.0 / 7.0),
    )
}

fn rule_of_114() -> String {
    let principal = 100_000.0;
    format!(
        "At 12% a year, {} grows to {} in about 114 / 12 = {} years.",
        format_inr(principal),
        format_inr(principal * 3.0),
        format_years(114.0 / 12.0),
    )
}

fn rule_of_70() -> String {
    format!(
        "At 6% inflation, the purchasing power of {} halves in about 70 / 6 = {} years.",
        format_inr(100_000.0),
        format_years(70.0 / 6.0),
    )
}

fn hundred_minus_age() -> String {
    let age = 30;
    format!(
        "At age {}, keep about 100 - {} = {}% in equity and {}% in debt; at 50 the split moves to 50% each.",
        age,
        age,
        100 - age,
        age,
    )
}

fn four_percent_withdrawal() -> String {
    let corpus = 20_000_000.0;
    let yearly = corpus * 0.04;
    format!(
        "A retirement corpus of {} supports a first-year withdrawal of {} ({} a month), raised with inflation in later years.",
        format_inr(corpus),
        format_inr(yearly),
        format_inr(yearly / 12.0),
    )
}

fn twenty_five_x() -> String {
    let expenses = 600_000.0;
    format!(
        "With annual expenses of {}, target a retirement corpus of 25 x {} = {}.",
        format_inr(expenses),
        format_inr(expenses),
        format_inr(expenses * 25.0),
    )
}

fn twenty_four_ten() -> String {
    let price = 1_000_000.0;
    let income = 100_000.0;
    format!(
        "For a {} car: pay at least {} down, finance the remaining {} for no more than 4 years, and keep total monthly car costs (EMI, fuel, insurance) under {} on a {} monthly income.",
        format_inr(price),
        format_inr(price * 0.20),
        format_inr(price * 0.80),
        format_inr(income * 0.10),
        format_inr(income),
    )
}

fn ten_five_three() -> String {
    let principal = 100_000.0;
    format!(
        "Over one year, {} might grow to about {} in equity, {} in debt and {} in a savings account.",
        format_inr(principal),
        format_inr(principal * 1.10),
        format_inr(principal * 1.05),
        format_inr(principal * 1.03),
    )
}

fn twenty_eight_thirty_six() -> String {
    let income = 150_000.0;
    format!(
        "On a gross monthly income of {}, keep housing costs under {} and all EMIs combined under {}.",
        format_inr(income),
        format_inr(income * 0.28),
        format_inr(income * 0.36),
    )
}

fn forty_percent_emi() -> String {
    let income = 80_000.0;
    format!(
        "On a take-home pay of {}, keep all EMIs together below {}.",
        format_inr(income),
        format_inr(income * 0.40),
    )
}

fn emergency_fund() -> String {
    let expenses = 40_000.0;
    format!(
        "With monthly expenses of {}, hold {} to {} in a savings account or liquid fund.",
        format_inr(expenses),
        format_inr(expenses * 3.0),
        format_inr(expenses * 6.0),
    )
}

/// The rules bundled with the application, in display order.
pub fn bundled_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            RuleId::FIFTY_THIRTY_TWENTY,
            "50-30-20 Rule",
            "Split your take-home pay into 50% for needs, 30% for wants and 20% for savings and investments.",
            "Use it as a starting budget, then push savings above 20% once essentials are under control.",
        ),
        Rule::new(
            RuleId::RULE_OF_72,
            "Rule of 72",
            "Divide 72 by the annual rate of return to estimate how many years it takes to double your money.",
            "Compare options quickly: the higher the return, the faster the doubling.",
        ),
        Rule::new(
            RuleId::RULE_OF_114,
            "Rule of 114",
            "Divide 114 by the annual rate of return to estimate how many years it takes to triple your money.",
            "Use it alongside the Rule of 72 for long-term goals such as retirement or a child's education.",
        ),
        Rule::new(
            RuleId::RULE_OF_70,
            "Rule of 70",
            "Divide 70 by the inflation rate to estimate how many years it takes for prices to double and the value of money to halve.",
            "Check whether your savings earn more than inflation over the long run.",
        ),
        Rule::new(
            RuleId::HUNDRED_MINUS_AGE,
            "100 Minus Age Rule",
            "Subtract your age from 100 to get the percentage of your portfolio to hold in equity; the rest goes to debt.",
            "Revisit the split every few years and lower equity as retirement approaches.",
        ),
        Rule::new(
            RuleId::FOUR_PERCENT_WITHDRAWAL,
            "4% Withdrawal Rule",
            "Withdraw 4% of your retirement corpus in the first year and adjust for inflation after that to make the money last about 30 years.",
            "Use it to test whether a retirement corpus can support your expected lifestyle.",
        ),
        Rule::new(
            RuleId::TWENTY_FIVE_X,
            "25X Rule",
            "Your retirement corpus should be about 25 times your annual expenses.",
            "Set a retirement target from your current spending, adjusted for inflation up to your retirement date.",
        ),
        Rule::new(
            RuleId::TWENTY_FOUR_TEN,
            "20-4-10 Rule",
            "When buying a vehicle, pay at least 20% down, finance for no more than 4 years, and keep total vehicle costs under 10% of monthly income.",
            "Apply it before booking a car or bike to decide what you can afford.",
        ),
        Rule::new(
            RuleId::TEN_FIVE_THREE,
            "10-5-3 Rule",
            "Expect roughly 10% a year from equity, 5% from debt and 3% from savings accounts over the long term.",
            "Use these as conservative planning assumptions, not promises.",
        ),
        Rule::new(
            RuleId::TWENTY_EIGHT_THIRTY_SIX,
            "28-36 Rule",
            "Spend no more than 28% of gross monthly income on housing and no more than 36% on all debt payments combined.",
            "Check affordability before taking a home loan or signing a rent agreement.",
        ),
        Rule::new(
            RuleId::FORTY_PERCENT_EMI,
            "40% EMI Rule",
            "Keep the total of all your EMIs below 40% of your monthly take-home pay.",
            "Lenders use a similar limit; staying below it leaves room for savings and emergencies.",
        ),
        Rule::new(
            RuleId::EMERGENCY_FUND,
            "Emergency Fund Rule",
            "Keep 3 to 6 months of essential expenses in safe, liquid savings.",
            "Build this before investing in equity so that a job loss or medical bill does not force you to sell.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_twelve_rules_with_unique_ids() {
        let rules = bundled_rules();
        assert_eq!(rules.len(), 12);
        let ids: HashSet<RuleId> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_every_rule_has_an_example() {
        for rule in bundled_rules() {
            assert!(has_worked_example(rule.id), "{}", rule.name);
            assert_ne!(worked_example(rule.id), GENERIC_EXAMPLE);
        }
    }

    #[test]
    fn test_unknown_rule_gets_generic_example() {
        assert_eq!(worked_example(RuleId("rule-of-thumb-13")), GENERIC_EXAMPLE);
    }

    #[test]
    fn test_fifty_thirty_twenty_figures() {
        let example = worked_example(RuleId::FIFTY_THIRTY_TWENTY);
        assert!(example.contains("₹60,000"));
        assert!(example.contains("₹30,000"));
        assert!(example.contains("₹18,000"));
        assert!(example.contains("₹12,000"));
    }

    #[test]
    fn test_doubling_and_tripling_figures() {
        assert!(worked_example(RuleId::RULE_OF_72).contains("72 / 12 = 6 years"));
        assert!(worked_example(RuleId::RULE_OF_72).contains("about 10.3 years"));
        assert!(worked_example(RuleId::RULE_OF_114).contains("114 / 12 = 9.5 years"));
    }

    #[test]
    fn test_withdrawal_figures() {
        let example = worked_example(RuleId::FOUR_PERCENT_WITHDRAWAL);
        assert!(example.contains("₹2,00,00,000"));
        assert!(example.contains("₹8,00,000"));
        assert!(example.contains("₹66,667"));
    }
}
