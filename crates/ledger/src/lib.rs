//! Transaction ledger for Nivesh.
//!
//! Transactions (income, expenses and debt payments) are loaded from a JSON
//! array and grouped by calendar month with a running balance carried from
//! month to month.

use chrono::{Datelike, NaiveDate};
use nivesh_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// What a transaction does to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
    Debt,
}

/// A single ledger entry. Amounts are positive rupees; the kind gives the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: EntryKind,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: f64, kind: EntryKind, category: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            kind,
            category: category.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Effect on the balance: income adds, expenses and debt payments subtract.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense | EntryKind::Debt => -self.amount,
        }
    }
}

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    #[serde(serialize_with = "month_as_string")]
    pub month: Month,
    pub income: f64,
    pub expenses: f64,
    pub debt_payments: f64,
    /// Income minus expenses and debt payments
    pub net: f64,
    /// Sum of `net` for this and every earlier month
    pub running_balance: f64,
    pub transactions: usize,
}

impl MonthlySummary {
    fn empty(month: Month) -> Self {
        Self {
            month,
            income: 0.0,
            expenses: 0.0,
            debt_payments: 0.0,
            net: 0.0,
            running_balance: 0.0,
            transactions: 0,
        }
    }

    /// Share of income kept this month, or `None` without income.
    pub fn savings_rate(&self) -> Option<f64> {
        (self.income > 0.0).then(|| self.net / self.income)
    }
}

fn month_as_string<S: serde::Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(month)
}

/// Progress toward a savings goal from the latest running balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub saved: f64,
    pub target: f64,
    /// Clamped to 0..=100
    pub percent: f64,
}

/// Read transactions from a JSON array file.
pub fn load_transactions(path: &Path) -> AppResult<Vec<Transaction>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Ledger(format!("Failed to read transactions {:?}: {}", path, e))
    })?;

    let transactions: Vec<Transaction> = serde_json::from_str(&contents).map_err(|e| {
        AppError::Ledger(format!("Failed to parse transactions {:?}: {}", path, e))
    })?;

    validate(&transactions)?;
    tracing::debug!("Loaded {} transactions from {:?}", transactions.len(), path);
    Ok(transactions)
}

/// Reject negative or non-finite amounts.
pub fn validate(transactions: &[Transaction]) -> AppResult<()> {
    for (i, t) in transactions.iter().enumerate() {
        if !t.amount.is_finite() || t.amount < 0.0 {
            return Err(AppError::Ledger(format!(
                "Transaction {} on {} has invalid amount {}",
                i, t.date, t.amount
            )));
        }
    }
    Ok(())
}

/// Group transactions by month, oldest first, with a running balance.
///
/// Months without transactions are omitted; the balance carries over them.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<Month, MonthlySummary> = BTreeMap::new();

    for t in transactions {
        let month = Month::of(t.date);
        let entry = months
            .entry(month)
            .or_insert_with(|| MonthlySummary::empty(month));

        match t.kind {
            EntryKind::Income => entry.income += t.amount,
            EntryKind::Expense => entry.expenses += t.amount,
            EntryKind::Debt => entry.debt_payments += t.amount,
        }
        entry.net += t.signed_amount();
        entry.transactions += 1;
    }

    let mut balance = 0.0;
    months
        .into_values()
        .map(|mut summary| {
            balance += summary.net;
            summary.running_balance = balance;
            summary
        })
        .collect()
}

/// Spending per category for one kind, largest first.
pub fn category_totals(transactions: &[Transaction], kind: EntryKind) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == kind) {
        let category = if t.category.trim().is_empty() {
            "uncategorized"
        } else {
            t.category.as_str()
        };
        *totals.entry(category).or_insert(0.0) += t.amount;
    }

    let mut totals: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_string(), total))
        .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
}

/// Progress toward `target` using the final running balance.
pub fn goal_progress(summaries: &[MonthlySummary], target: f64) -> GoalProgress {
    let saved = summaries.last().map_or(0.0, |s| s.running_balance);
    let percent = if target > 0.0 {
        (saved / target * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    GoalProgress {
        saved,
        target,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(date(2024, 2, 1), 60_000.0, EntryKind::Income, "salary"),
            Transaction::new(date(2024, 1, 1), 60_000.0, EntryKind::Income, "salary"),
            Transaction::new(date(2024, 1, 5), 20_000.0, EntryKind::Expense, "rent"),
            Transaction::new(date(2024, 1, 10), 5_000.0, EntryKind::Debt, "credit card"),
            Transaction::new(date(2024, 2, 5), 20_000.0, EntryKind::Expense, "rent"),
            Transaction::new(date(2024, 2, 18), 8_000.0, EntryKind::Expense, "groceries"),
            Transaction::new(date(2024, 4, 1), 10_000.0, EntryKind::Expense, "travel"),
        ]
    }

    #[test]
    fn test_monthly_grouping_and_running_balance() {
        let summary = monthly_summary(&sample());
        assert_eq!(summary.len(), 3);

        let jan = &summary[0];
        assert_eq!(jan.month.to_string(), "2024-01");
        assert_eq!(jan.income, 60_000.0);
        assert_eq!(jan.expenses, 20_000.0);
        assert_eq!(jan.debt_payments, 5_000.0);
        assert_eq!(jan.net, 35_000.0);
        assert_eq!(jan.running_balance, 35_000.0);
        assert_eq!(jan.transactions, 3);

        let feb = &summary[1];
        assert_eq!(feb.net, 32_000.0);
        assert_eq!(feb.running_balance, 67_000.0);

        let apr = &summary[2];
        assert_eq!(apr.month.to_string(), "2024-04");
        assert_eq!(apr.net, -10_000.0);
        assert_eq!(apr.running_balance, 57_000.0);
        assert_eq!(apr.savings_rate(), None);
    }

    #[test]
    fn test_year_boundary_ordering() {
        let txns = vec![
            Transaction::new(date(2025, 1, 3), 1.0, EntryKind::Income, ""),
            Transaction::new(date(2024, 12, 30), 1.0, EntryKind::Income, ""),
        ];
        let months: Vec<String> = monthly_summary(&txns)
            .iter()
            .map(|s| s.month.to_string())
            .collect();
        assert_eq!(months, vec!["2024-12", "2025-01"]);
    }

    #[test]
    fn test_empty_ledger() {
        assert!(monthly_summary(&[]).is_empty());
        assert_eq!(goal_progress(&[], 1000.0).saved, 0.0);
    }

    #[test]
    fn test_category_totals() {
        let totals = category_totals(&sample(), EntryKind::Expense);
        assert_eq!(totals[0], ("rent".to_string(), 40_000.0));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn test_goal_progress_is_clamped() {
        let summary = monthly_summary(&sample());
        let progress = goal_progress(&summary, 100_000.0);
        assert_eq!(progress.saved, 57_000.0);
        assert!((progress.percent - 57.0).abs() < 1e-9);
        assert_eq!(goal_progress(&summary, 10_000.0).percent, 100.0);
    }

    #[test]
    fn test_load_transactions_from_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("transactions.json");
        std::fs::write(
            &path,
            r#"[
                {"date": "2024-03-01", "amount": 50000, "kind": "income", "category": "salary"},
                {"date": "2024-03-02", "amount": 1200.5, "kind": "expense", "category": "food", "note": "dinner"}
            ]"#,
        )
        .unwrap();

        let txns = load_transactions(&path).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[1].note.as_deref(), Some("dinner"));
        assert_eq!(monthly_summary(&txns)[0].net, 48_799.5);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(
            &path,
            r#"[{"date": "2024-03-01", "amount": -5, "kind": "expense"}]"#,
        )
        .unwrap();
        assert!(matches!(load_transactions(&path), Err(AppError::Ledger(_))));
    }

    #[test]
    fn test_summary_serializes_month_as_string() {
        let summary = monthly_summary(&sample());
        let json = serde_json::to_value(&summary[0]).unwrap();
        assert_eq!(json["month"], "2024-01");
        assert_eq!(json["debt_payments"], 5000.0);
    }
}
