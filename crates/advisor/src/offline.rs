//! Offline heuristic: canned paragraphs used whenever the remote service is
//! unavailable, unconfigured or returned something irrelevant.

use crate::query::Query;
use crate::timeframe::{LONG_TERM, MEDIUM_TERM, SHORT_TERM};
use nivesh_core::GoalConfig;
use nivesh_knowledge::{format_inr, Glossary};

pub const MUTUAL_FUNDS: &str = "Mutual funds pool money from many investors and invest it in stocks, bonds or both, managed by a professional fund manager. Equity funds suit goals more than five years away, debt funds suit shorter horizons, and hybrid funds mix the two. You can start with a monthly SIP of as little as ₹500, and direct plans keep costs low.";

pub const FIXED_DEPOSITS: &str = "Fixed deposits (FDs) lock in a fixed interest rate, currently around 6.5% to 7.5% a year at major banks, for a tenure you choose. Deposits up to ₹5 lakh per bank are insured by DICGC. Interest is taxed at your slab rate, so post-tax returns can trail inflation; FDs suit emergency funds and short-term goals.";

pub const EQUITY: &str = "Equity means owning shares in companies. It has historically delivered the highest long-term returns in India, around 10% to 12% a year, but prices can swing sharply in the short run. Invest only money you will not need for at least five years, and consider diversified index or flexi-cap funds instead of picking individual stocks.";

pub const TAX: &str = "Under the old tax regime, Section 80C lets you deduct up to ₹1.5 lakh a year through options such as ELSS, PPF, EPF, NSC and five-year tax-saving FDs. ELSS has the shortest lock-in at three years. NPS gives an additional ₹50,000 deduction under Section 80CCD(1B), and health insurance premiums qualify under Section 80D.";

pub const DEFAULT_REPLY: &str = "I can help with investment questions. Try asking me about mutual funds, PPF, FDs or stocks, or about financial rules such as the 50-30-20 rule.";

pub const NO_GOAL: &str = "Set a savings goal with a name and a target amount, and I can suggest how much to put aside every month to reach it. A goal-based SIP is a simple way to stay on track.";

/// Months the goal paragraph spreads a target over.
const GOAL_MONTHS: f64 = 36.0;

/// Answer a question without the remote service.
///
/// Always produces text: the glossary first, then keyword mappings in fixed
/// order, then a generic prompt to ask about common topics.
pub fn answer(query: &Query, glossary: &Glossary, goal: Option<&GoalConfig>) -> String {
    if let Some(term) = glossary.lookup(query.raw()) {
        return term.definition.clone();
    }

    if query.contains("goal") {
        return goal_paragraph(goal);
    }

    if let Some(paragraph) = horizon_paragraph(query) {
        return paragraph.to_string();
    }

    if query.contains_any(&["mutual fund", "mutual funds"]) {
        return MUTUAL_FUNDS.to_string();
    }

    if query.contains("fixed deposit") || query.has_any_word(&["fd", "fds"]) {
        return FIXED_DEPOSITS.to_string();
    }

    if query.contains("equity") || query.has_any_word(&["stock", "stocks", "share", "shares"]) {
        return EQUITY.to_string();
    }

    if query.contains_any(&["tax", "80c"]) {
        return TAX.to_string();
    }

    DEFAULT_REPLY.to_string()
}

fn horizon_paragraph(query: &Query) -> Option<&'static str> {
    if query.contains_any(&["short term", "short-term"]) {
        Some(SHORT_TERM)
    } else if query.contains_any(&["medium term", "medium-term"]) {
        Some(MEDIUM_TERM)
    } else if query.contains_any(&["long term", "long-term"]) {
        Some(LONG_TERM)
    } else {
        None
    }
}

/// Paragraph for goal questions, interpolating the stored goal when present.
pub fn goal_paragraph(goal: Option<&GoalConfig>) -> String {
    let Some(goal) = goal.filter(|g| g.amount > 0.0) else {
        return NO_GOAL.to_string();
    };

    format!(
        "To reach your goal \"{}\" of {}, set aside about {} a month for the next three years. For a goal this close, a SIP into a debt or hybrid fund keeps the money steady; if you can wait longer than five years, an equity index fund SIP can do more of the work.",
        goal.name,
        format_inr(goal.amount),
        format_inr(goal.amount / GOAL_MONTHS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(question: &str) -> String {
        answer(&Query::new(question), &Glossary::bundled(), None)
    }

    #[test]
    fn test_glossary_first() {
        let glossary = Glossary::bundled();
        assert_eq!(
            reply("Tell me about PPF for tax saving"),
            glossary.get("ppf").unwrap().definition
        );
    }

    #[test]
    fn test_keyword_order() {
        assert_eq!(reply("Are mutual funds better than keeping money idle?"), MUTUAL_FUNDS);
        assert_eq!(reply("Are FDs still worth it?"), FIXED_DEPOSITS);
        assert_eq!(reply("Should I buy stocks now?"), EQUITY);
        assert_eq!(reply("How do I save income tax?"), TAX);
        assert_eq!(reply("Where to park money for the long term?"), LONG_TERM);
        assert_eq!(reply("Tell me something useful please"), DEFAULT_REPLY);
    }

    #[test]
    fn test_horizon_beats_products() {
        assert_eq!(reply("Best mutual funds for the short-term?"), SHORT_TERM);
    }

    #[test]
    fn test_goal_interpolation() {
        let goal = GoalConfig {
            name: "New laptop".to_string(),
            amount: 120_000.0,
        };
        let text = answer(
            &Query::new("How do I reach my goal faster?"),
            &Glossary::bundled(),
            Some(&goal),
        );
        assert!(text.contains("\"New laptop\""));
        assert!(text.contains("₹1,20,000"));
        assert!(text.contains("₹3,333"));
    }

    #[test]
    fn test_goal_without_stored_goal() {
        assert_eq!(reply("Help me plan a goal"), NO_GOAL);
    }

    #[test]
    fn test_fd_is_a_whole_word() {
        assert_ne!(reply("What is the feedback on funding?"), FIXED_DEPOSITS);
    }
}
