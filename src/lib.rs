//! budget-ledger - personal finance ledger core
//!
//! This library records income and expense transactions, keeps monthly
//! per-category budgets, and turns a month of transactions into totals,
//! breakdowns and budget usage. Transactions move in and out as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings (currency, theme)
//! - `error`: Custom error types
//! - `models`: Transaction rows, amounts, months and budgets
//! - `codec`: Single-line CSV parsing and field escaping
//! - `storage`: The `TransactionStore` seam and its JSON-file implementation
//! - `services`: Validated transaction CRUD and the batched CSV import
//! - `reports`: The aggregation engine and the monthly dashboard
//! - `export`: CSV export
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```
//! use ledger::models::{TransactionRow, TransactionType};
//! use ledger::reports::compute_totals;
//!
//! let rows = vec![
//!     TransactionRow::new(TransactionType::Income, 3000.0, "2026-01-01", Some("Salary")),
//!     TransactionRow::new(TransactionType::Expense, "25.50", "2026-01-05", Some("Food")),
//! ];
//! let totals = compute_totals(&rows);
//! assert_eq!(totals.balance, 2974.5);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ImportError, LedgerError, LedgerResult};
