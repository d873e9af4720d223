//! Reports module
//!
//! The aggregation engine (totals, category and day breakdowns, budget usage)
//! and the monthly dashboard built on top of it.

pub mod budget_usage;
pub mod dashboard;
pub mod summary;

pub use budget_usage::{
    compute_budget_usage, BudgetStatus, BudgetUsage, OVER_BUDGET_THRESHOLD, WARNING_THRESHOLD,
};
pub use dashboard::{CategorySpending, MonthlySummary};
pub use summary::{
    compute_totals, group_by_category, group_by_day, ranked_categories, CategoryTotals,
    DailyTotals, Totals, UNCATEGORIZED_LABEL,
};
