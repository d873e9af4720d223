//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod config;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportArgs};
pub use import::handle_import_command;
pub use report::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::LedgerResult;
use crate::models::Month;

/// Parse a `--month` argument (`YYYY-MM`)
pub(crate) fn parse_month_arg(s: &str) -> LedgerResult<Month> {
    Month::parse(s.trim())
}

/// The given month, or the current one when none was passed
pub(crate) fn month_or_current(s: Option<&str>) -> LedgerResult<Month> {
    s.map(parse_month_arg)
        .transpose()
        .map(|m| m.unwrap_or_else(Month::current))
}
