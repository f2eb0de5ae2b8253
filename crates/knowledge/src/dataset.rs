//! Question/answer dataset and similarity search over it.

use crate::similarity::{self, tokenize};
use crate::types::QAEntry;
use std::collections::HashSet;

/// A dataset answer is used only when its question scores above this.
pub const MATCH_THRESHOLD: f32 = 0.6;

/// Words that never count as key terms when relating questions.
const STOP_WORDS: [&str; 24] = [
    "the", "and", "for", "are", "was", "what", "which", "how", "does", "can", "should", "with",
    "from", "this", "that", "have", "has", "you", "your", "when", "who", "why", "into", "about",
];

/// The best-scoring dataset entry for a question.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMatch<'a> {
    pub entry: &'a QAEntry,
    pub score: f32,
}

/// Ordered, read-only collection of Q&A entries.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<QAEntry>,
}

impl Dataset {
    pub fn new(entries: Vec<QAEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[QAEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring entry, first entry winning ties, without a threshold.
    pub fn best_candidate(&self, question: &str) -> Option<DatasetMatch<'_>> {
        let mut best: Option<DatasetMatch<'_>> = None;
        for entry in &self.entries {
            let score = similarity::score(question, &entry.question);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(DatasetMatch { entry, score });
            }
        }
        best
    }

    /// Best entry if it clears [`MATCH_THRESHOLD`].
    pub fn best_match(&self, question: &str) -> Option<DatasetMatch<'_>> {
        self.best_candidate(question)
            .filter(|candidate| candidate.score > MATCH_THRESHOLD)
    }

    /// Up to `limit` entries sharing at least `min_shared` key terms with the question.
    pub fn related(&self, question: &str, min_shared: usize, limit: usize) -> Vec<&QAEntry> {
        let wanted = key_terms(question);
        if wanted.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| key_terms(&entry.question).intersection(&wanted).count() >= min_shared)
            .take(limit)
            .collect()
    }

    /// The dataset bundled with the application.
    pub fn bundled() -> Self {
        let entries = [
            (
                "How does LTCG tax work on equity investments in India?",
                "Long-term capital gains (LTCG) apply to listed shares and equity mutual funds held for more than 12 months. Gains up to ₹1.25 lakh in a financial year are exempt, and gains above that are taxed at 12.5% without indexation. Booking some gains every year to use the exemption is a common way to lower the bill.",
            ),
            (
                "How are short-term capital gains on equity taxed?",
                "Short-term capital gains (STCG) on listed shares and equity mutual funds held for 12 months or less are taxed at a flat 20%, regardless of your income slab. Holding past the 12-month mark moves the gain into the lower long-term rate.",
            ),
            (
                "Should I pay off my home loan early or invest the money?",
                "Compare the loan's interest rate with the post-tax return you can reasonably expect. At an 8.5% home loan rate, prepaying is a guaranteed 8.5% saving; equity may beat it over 10+ years but with volatility. Many people do both: keep the emergency fund intact, prepay a little every year, and continue a monthly SIP.",
            ),
            (
                "How much emergency fund should I keep?",
                "Keep 3 to 6 months of essential expenses as an emergency fund, and up to 12 months if your income is irregular or you are the sole earner. Park it in a savings account, a sweep-in FD or a liquid fund so it is available within a day.",
            ),
            (
                "What is the difference between direct and regular mutual fund plans?",
                "Both plans hold the same portfolio, but regular plans pay a distributor commission through a higher expense ratio, typically 0.5% to 1.5% more a year. Direct plans skip the commission, so their returns are higher by that difference. Choose direct if you can select funds on your own.",
            ),
            (
                "How do debt mutual funds work?",
                "Debt mutual funds invest in bonds, treasury bills and money-market instruments, earning interest plus or minus changes in bond prices. Liquid and short-duration funds carry little interest-rate risk; long-duration and credit-risk funds can be volatile. Gains are taxed at your income slab rate.",
            ),
            (
                "Is gold a good investment in India?",
                "Gold works best as a diversifier and hedge against rupee depreciation, not as a core growth asset. Keeping 5% to 10% of a portfolio in gold ETFs, gold mutual funds or Sovereign Gold Bonds is a common approach. Physical jewellery carries making charges and storage risk.",
            ),
            (
                "What are sovereign gold bonds?",
                "Sovereign Gold Bonds are government securities priced in grams of gold, issued by the Reserve Bank of India. They pay 2.5% a year interest on top of gold price movement, and gains are tax-free if held to the 8-year maturity.",
            ),
            (
                "How do I start investing in the stock market?",
                "Open a demat and trading account with a SEBI-registered broker, complete KYC, and link your bank account. Beginners usually start with a diversified index fund or a large-cap fund before picking individual stocks, and invest only money they will not need for at least five years.",
            ),
            (
                "What is an index fund?",
                "An index fund is a mutual fund that copies a market index such as the Nifty 50 or Sensex, holding the same stocks in the same proportions. It has low costs, no fund-manager risk and returns close to the index, which makes it a strong default for long-term investors.",
            ),
            (
                "How much term insurance cover do I need?",
                "A common guideline is a cover of 10 to 15 times your annual income, plus outstanding loans, minus existing investments. Buy a pure term plan rather than an endowment or money-back policy, and choose a policy term that runs until your dependants are financially independent.",
            ),
            (
                "What is the tax benefit under Section 80C?",
                "Section 80C lets you deduct up to ₹1.5 lakh a year from taxable income under the old tax regime. Eligible options include PPF, ELSS, EPF, NSC, five-year tax-saving FDs, life insurance premiums, home loan principal and children's tuition fees.",
            ),
            (
                "How does inflation affect my savings?",
                "Inflation reduces what your money can buy. At 6% inflation, ₹1 lakh today buys only about ₹56,000 worth of goods in 10 years. Savings that earn less than inflation after tax lose value in real terms, which is why long-term money needs growth assets like equity.",
            ),
            (
                "What is asset allocation?",
                "Asset allocation is how you divide money across asset classes such as equity, debt, gold and cash. It drives most of a portfolio's risk and return. Set it based on goals, time horizon and risk tolerance, and rebalance once a year to stay on target.",
            ),
            (
                "How can I reduce my tax on salary income?",
                "Compare the old and new tax regimes every year. Under the old regime, use Section 80C (₹1.5 lakh), 80D for health insurance, 80CCD(1B) for an extra ₹50,000 in NPS, HRA and home loan interest. Under the new regime, the standard deduction and employer NPS contributions still apply.",
            ),
            (
                "What is a credit score and why does it matter?",
                "A credit score, ranging from 300 to 900 in India, summarises your repayment history. Lenders use it to approve loans and set interest rates; a score above 750 usually gets the best terms. Pay dues on time and keep credit card usage below 30% of the limit to improve it.",
            ),
            (
                "How do I build a retirement corpus?",
                "Estimate your annual expenses at retirement after inflation, then target a corpus of about 25 to 30 times that amount. Build it with a mix of equity mutual fund SIPs, EPF, PPF and NPS, increase contributions with every raise, and shift gradually toward debt in the last 5 to 7 years.",
            ),
            (
                "Are fixed deposits safe in India?",
                "Bank fixed deposits are among the safest options: deposits up to ₹5 lakh per bank are insured by DICGC. Interest is taxed at your slab rate, so post-tax returns often trail inflation. Spreading large amounts across banks keeps everything within the insured limit.",
            ),
            (
                "What happens if I stop paying my credit card bill?",
                "Missing payments triggers late fees and interest of 36% to 45% a year on the outstanding balance, and the default is reported to credit bureaus, lowering your score. Contact the issuer early; converting the dues into an EMI costs far less than letting them roll over.",
            ),
            (
                "How should I diversify my investment portfolio?",
                "Spread money across asset classes (equity, debt, gold), within equity across market caps and sectors, and across fund houses. Four or five well-chosen funds are usually enough; owning more adds overlap rather than diversification.",
            ),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(question, answer)| QAEntry::new(question, answer))
                .collect(),
        )
    }
}

/// Significant tokens of a question, stop words removed.
pub fn key_terms(text: &str) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_questions_return_their_answers() {
        let dataset = Dataset::bundled();
        for entry in dataset.entries() {
            let found = dataset.best_match(&entry.question.to_uppercase()).unwrap();
            assert_eq!(found.entry.answer, entry.answer);
            assert_eq!(found.score, 1.0);
        }
    }

    #[test]
    fn test_ltcg_question_matches() {
        let dataset = Dataset::bundled();
        let found = dataset
            .best_match("How does LTCG tax work on equity investments in India?")
            .unwrap();
        assert!(found.score >= 0.6);
        assert!(found.entry.answer.contains("12.5%"));
    }

    #[test]
    fn test_near_match_above_threshold() {
        let dataset = Dataset::bundled();
        let found = dataset.best_match("how do debt mutual funds really work").unwrap();
        assert_eq!(found.entry.question, "How do debt mutual funds work?");
    }

    #[test]
    fn test_weak_match_is_rejected() {
        let dataset = Dataset::bundled();
        assert!(dataset.best_match("I want to invest for 2 years").is_none());
        assert!(dataset.best_match("What is the 50-30-20 Rule?").is_none());
        let candidate = dataset.best_candidate("What is the 50-30-20 Rule?").unwrap();
        assert!(candidate.score <= MATCH_THRESHOLD);
    }

    #[test]
    fn test_ties_go_to_first_entry() {
        let dataset = Dataset::new(vec![
            QAEntry::new("gold bonds returns", "first"),
            QAEntry::new("gold bonds returns", "second"),
        ]);
        assert_eq!(dataset.best_match("gold bonds returns").unwrap().entry.answer, "first");
    }

    #[test]
    fn test_related_requires_two_shared_terms() {
        let dataset = Dataset::bundled();
        let related = dataset.related("Are debt mutual funds better than fixed deposits?", 2, 3);
        assert!(!related.is_empty());
        assert!(related.len() <= 3);
        assert!(related.iter().any(|e| e.question == "How do debt mutual funds work?"));

        assert!(dataset.related("pizza toppings", 2, 3).is_empty());
    }
}
