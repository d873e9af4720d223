//! Budget usage ranking
//!
//! Joins monthly limits with spending per category and ranks the result by
//! how much of each limit is used. Categories without a limit rank last.

use serde::Serialize;
use std::collections::BTreeSet;

use super::summary::CategoryTotals;
use crate::models::BudgetMap;

/// Usage at or above this percentage (and below `OVER_BUDGET_THRESHOLD`) is a warning
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Usage at or above this percentage is over budget
pub const OVER_BUDGET_THRESHOLD: f64 = 100.0;

/// Where a category stands against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No positive limit set
    NoBudget,
    OnTrack,
    Warning,
    OverBudget,
}

/// Spending against the limit for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    /// `spent / limit * 100`, absent when `limit <= 0`
    pub percentage: Option<f64>,
}

impl BudgetUsage {
    pub fn status(&self) -> BudgetStatus {
        match self.percentage {
            None => BudgetStatus::NoBudget,
            Some(p) if p >= OVER_BUDGET_THRESHOLD => BudgetStatus::OverBudget,
            Some(p) if p >= WARNING_THRESHOLD => BudgetStatus::Warning,
            Some(_) => BudgetStatus::OnTrack,
        }
    }

    /// Amount left before the limit; negative once over. `None` without a limit.
    pub fn remaining(&self) -> Option<f64> {
        self.percentage.map(|_| self.limit - self.spent)
    }

    fn sort_key(&self) -> f64 {
        self.percentage.unwrap_or(-1.0)
    }
}

/// One entry per category in either map, highest usage first
///
/// Categories are visited alphabetically and the sort is stable, so equal
/// percentages (including several absent ones) stay in alphabetical order.
pub fn compute_budget_usage(budgets: &BudgetMap, spending: &CategoryTotals) -> Vec<BudgetUsage> {
    let categories: BTreeSet<&String> = budgets.keys().chain(spending.keys()).collect();

    let mut usage: Vec<BudgetUsage> = categories
        .into_iter()
        .map(|category| {
            let spent = spending.get(category).copied().unwrap_or(0.0);
            let limit = budgets.get(category).copied().unwrap_or(0.0);
            let percentage = (limit > 0.0).then(|| spent / limit * 100.0);

            BudgetUsage {
                category: category.clone(),
                spent,
                limit,
                percentage,
            }
        })
        .collect();

    usage.sort_by(|a, b| b.sort_key().total_cmp(&a.sort_key()));
    usage
}
