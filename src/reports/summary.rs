//! Aggregation engine
//!
//! Pure functions from a row set to totals and breakdowns. Rows whose amount
//! does not coerce to a finite number are skipped by every sum; only expense
//! rows take part in the category and day breakdowns.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{TransactionRow, TransactionType};

/// Label for expenses with no category
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// Category name -> accumulated expense
pub type CategoryTotals = HashMap<String, f64>;

/// `YYYY-MM-DD` -> accumulated expense, iterated in date order
pub type DailyTotals = BTreeMap<String, f64>;

/// Income, expense and their difference over a row set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Sum income and expense amounts; `balance = income - expense`
pub fn compute_totals(rows: &[TransactionRow]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for row in rows {
        let Some(amount) = row.amount.coerce() else {
            continue;
        };

        match row.kind {
            TransactionType::Income => income += amount,
            TransactionType::Expense => expense += amount,
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Expense amounts grouped by trimmed category (`"Other"` when blank)
pub fn group_by_category(rows: &[TransactionRow]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();

    for (row, amount) in expenses(rows) {
        let category = row
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL);

        *totals.entry(category.to_string()).or_insert(0.0) += amount;
    }

    totals
}

/// Expense amounts grouped by the row's raw date string
pub fn group_by_day(rows: &[TransactionRow]) -> DailyTotals {
    let mut totals = DailyTotals::new();

    for (row, amount) in expenses(rows) {
        *totals.entry(row.date.clone()).or_insert(0.0) += amount;
    }

    totals
}

/// Expense rows paired with their coerced amount
fn expenses(rows: &[TransactionRow]) -> impl Iterator<Item = (&TransactionRow, f64)> {
    rows.iter()
        .filter(|row| row.kind == TransactionType::Expense)
        .filter_map(|row| row.amount.coerce().map(|amount| (row, amount)))
}

/// Category totals as a list sorted by amount, largest first
///
/// Equal amounts keep alphabetical order.
pub fn ranked_categories(totals: &CategoryTotals) -> Vec<(String, f64)> {
    let mut ranked: Vec<_> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    const EPSILON: f64 = 1e-9;

    fn sample_rows() -> Vec<TransactionRow> {
        use TransactionType::*;
        vec![
            TransactionRow::new(Income, 3000.0, "2026-01-01", Some("Salary")),
            TransactionRow::new(Expense, 25.5, "2026-01-05", Some("Food")),
            TransactionRow::new(Expense, "10", "2026-01-05", Some("Food")),
            TransactionRow::new(Expense, 50.0, "2026-01-06", Some("Transport")),
            TransactionRow::new(Expense, "not-a-number", "2026-01-06", Some("Food")),
        ]
    }

    #[test]
    fn test_totals_sum_income_and_expense() {
        let totals = compute_totals(&sample_rows());
        assert_eq!(totals.income, 3000.0);
        assert!((totals.expense - 85.5).abs() < EPSILON);
        assert!((totals.balance - (3000.0 - 85.5)).abs() < EPSILON);
        assert_eq!(totals.balance, totals.income - totals.expense);
    }

    #[test]
    fn test_totals_order_independent() {
        let rows = sample_rows();
        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(compute_totals(&rows), compute_totals(&reversed));
    }

    #[test]
    fn test_totals_of_empty_set() {
        assert_eq!(compute_totals(&[]), Totals::default());
    }

    #[test]
    fn test_group_by_category_ignores_income_and_invalid() {
        let totals = group_by_category(&sample_rows());
        assert!((totals["Food"] - 35.5).abs() < EPSILON);
        assert_eq!(totals["Transport"], 50.0);
        assert!(!totals.contains_key("Salary"));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_group_by_category_defaults_blank_to_other() {
        use TransactionType::Expense;
        let rows = vec![
            TransactionRow::new(Expense, 1.0, "2026-01-01", None),
            TransactionRow::new(Expense, 2.0, "2026-01-01", Some("   ")),
            TransactionRow::new(Expense, 4.0, "2026-01-01", Some(" Food ")),
        ];
        let totals = group_by_category(&rows);
        assert_eq!(totals[UNCATEGORIZED_LABEL], 3.0);
        assert_eq!(totals["Food"], 4.0);
    }

    #[test]
    fn test_category_sum_equals_expense_total() {
        let rows = sample_rows();
        let by_category: f64 = group_by_category(&rows).values().sum();
        assert!((by_category - compute_totals(&rows).expense).abs() < EPSILON);
    }

    #[test]
    fn test_group_by_day() {
        let totals = group_by_day(&sample_rows());
        assert!((totals["2026-01-05"] - 35.5).abs() < EPSILON);
        assert_eq!(totals["2026-01-06"], 50.0);
        assert!(!totals.contains_key("2026-01-01"));
    }

    #[test]
    fn test_group_by_day_keeps_raw_keys() {
        let rows = vec![TransactionRow {
            kind: TransactionType::Expense,
            amount: Amount::Number(7.0),
            date: "not a date".into(),
            category: None,
        }];
        assert_eq!(group_by_day(&rows)["not a date"], 7.0);
    }

    #[test]
    fn test_ranked_categories() {
        let mut totals = CategoryTotals::new();
        totals.insert("Bills".into(), 10.0);
        totals.insert("Food".into(), 80.0);
        totals.insert("Apps".into(), 10.0);

        let ranked = ranked_categories(&totals);
        let names: Vec<_> = ranked.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Food", "Apps", "Bills"]);
    }
}
