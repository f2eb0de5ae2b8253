//! Summary command handler.
//!
//! Prints month-by-month totals for a transactions file.

use clap::Args;
use nivesh_core::{config::AppConfig, AppResult};
use nivesh_knowledge::format_inr;
use nivesh_ledger::{goal_progress, load_transactions, monthly_summary};
use std::path::PathBuf;

/// Monthly income, expense and debt summary
#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// JSON file with an array of transactions
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Summarising {:?}", self.file);

        let transactions = load_transactions(&self.file)?;
        let months = monthly_summary(&transactions);
        let progress = config
            .goal
            .as_ref()
            .map(|goal| (goal, goal_progress(&months, goal.amount)));

        if self.json {
            let output = serde_json::json!({
                "months": months,
                "goal": progress.as_ref().map(|(goal, p)| serde_json::json!({
                    "name": goal.name,
                    "progress": p,
                })),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if months.is_empty() {
            println!("No transactions in {}", self.file.display());
            return Ok(());
        }

        println!(
            "{:<8} {:>14} {:>14} {:>14} {:>14} {:>14}",
            "Month", "Income", "Expenses", "Debt", "Net", "Balance"
        );
        for m in &months {
            println!(
                "{:<8} {:>14} {:>14} {:>14} {:>14} {:>14}",
                m.month.to_string(),
                format_inr(m.income),
                format_inr(m.expenses),
                format_inr(m.debt_payments),
                format_inr(m.net),
                format_inr(m.running_balance)
            );
        }

        if let Some((goal, p)) = progress {
            println!(
                "\nGoal \"{}\": {} of {} ({:.0}%)",
                goal.name,
                format_inr(p.saved),
                format_inr(p.target),
                p.percent
            );
        }

        Ok(())
    }
}
