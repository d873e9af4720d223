//! Core data models
//!
//! Transaction rows in their raw, validated and stored forms, the permissive
//! amount type, monthly budgets and the month value they are keyed by.

pub mod amount;
pub mod budget;
pub mod ids;
pub mod period;
pub mod transaction;

pub use amount::{parse_amount, Amount};
pub use budget::{Budget, BudgetMap};
pub use ids::TransactionId;
pub use period::Month;
pub use transaction::{
    is_iso_date_pattern, ImportRow, StoredTransaction, TransactionRow, TransactionType,
};
