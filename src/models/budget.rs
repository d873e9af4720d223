//! Monthly budget model
//!
//! A budget is a spending limit for one category in one month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::period::Month;
use crate::error::LedgerError;

/// Category name -> limit, the input shape of the budget-usage ranking
pub type BudgetMap = HashMap<String, f64>;

/// A spending limit for a category in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub month: Month,
    pub category: String,
    /// Limit for the month; zero means "not set"
    pub amount: f64,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget, trimming the category and checking the amount
    pub fn new(month: Month, category: &str, amount: f64) -> Result<Self, LedgerError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("category is required".into()));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::Validation(format!(
                "invalid budget amount {} (must be a non-negative number)",
                amount
            )));
        }

        Ok(Self {
            month,
            category: category.to_string(),
            amount,
            updated_at: Utc::now(),
        })
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.category, self.amount)
    }
}
