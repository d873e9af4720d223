//! Monthly dashboard
//!
//! Everything the summary screen shows for one month, computed in a single
//! pass over that month's rows by the aggregation engine.

use serde::Serialize;

use super::budget_usage::{compute_budget_usage, BudgetStatus, BudgetUsage};
use super::summary::{compute_totals, group_by_category, group_by_day, ranked_categories, DailyTotals, Totals};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{BudgetMap, Month, TransactionRow};
use crate::storage::{TransactionFilter, TransactionStore};

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
}

/// Monthly summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub transaction_count: usize,
    pub totals: Totals,
    /// Largest first
    pub by_category: Vec<CategorySpending>,
    /// Date ascending
    pub daily: DailyTotals,
    /// Highest usage first
    pub budget_usage: Vec<BudgetUsage>,
}

impl MonthlySummary {
    /// Load the owner's rows for `month` and summarize them against `budgets`
    pub fn generate<S: TransactionStore + ?Sized>(
        store: &S,
        owner_id: &str,
        month: Month,
        budgets: &BudgetMap,
    ) -> LedgerResult<Self> {
        let filter = TransactionFilter::for_owner(owner_id).with_month(Some(month));
        let rows: Vec<TransactionRow> = store.select(&filter)?.iter().map(|t| t.to_row()).collect();

        log::debug!("Summarizing {} rows for {}", rows.len(), month);
        Ok(Self::from_rows(month, &rows, budgets))
    }

    /// Summarize an already selected row set
    pub fn from_rows(month: Month, rows: &[TransactionRow], budgets: &BudgetMap) -> Self {
        let categories = group_by_category(rows);

        Self {
            month,
            transaction_count: rows.len(),
            totals: compute_totals(rows),
            by_category: ranked_categories(&categories)
                .into_iter()
                .map(|(category, amount)| CategorySpending { category, amount })
                .collect(),
            daily: group_by_day(rows),
            budget_usage: compute_budget_usage(budgets, &categories),
        }
    }

    /// Format for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |amount: f64| settings.format_money(amount);
        let mut output = String::new();

        output.push_str(&format!("Summary for {}\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Income:       {:>16}\n", money(self.totals.income)));
        output.push_str(&format!("Expenses:     {:>16}\n", money(self.totals.expense)));
        output.push_str(&format!("Balance:      {:>16}\n", money(self.totals.balance)));
        output.push_str(&format!("Transactions: {:>16}\n", self.transaction_count));

        if !self.by_category.is_empty() {
            output.push_str("\nSpending by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for entry in &self.by_category {
                let share = if self.totals.expense > 0.0 {
                    entry.amount / self.totals.expense * 100.0
                } else {
                    0.0
                };
                output.push_str(&format!(
                    "{:<30} {:>16} {:>10.1}%\n",
                    entry.category,
                    money(entry.amount),
                    share
                ));
            }
        }

        if !self.budget_usage.is_empty() {
            output.push_str("\nBudgets\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for usage in &self.budget_usage {
                let (marker, used) = match (usage.status(), usage.percentage) {
                    (BudgetStatus::OverBudget, Some(p)) => ("!!", format!("{:.0}%", p)),
                    (BudgetStatus::Warning, Some(p)) => ("! ", format!("{:.0}%", p)),
                    (_, Some(p)) => ("  ", format!("{:.0}%", p)),
                    (_, None) => ("  ", "no budget".to_string()),
                };
                output.push_str(&format!(
                    "{} {:<27} {:>14} / {:<14} {}\n",
                    marker,
                    usage.category,
                    money(usage.spent),
                    money(usage.limit),
                    used
                ));
            }
        }

        output
    }
}
