//! Summary CLI command
//!
//! Monthly dashboard: totals, spending by category, budget usage.

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::reports::MonthlySummary;
use crate::storage::Storage;

use super::month_or_current;

/// Handle the summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<&str>,
    json: bool,
) -> LedgerResult<()> {
    let month = month_or_current(month)?;
    let budgets = storage.budgets.for_month(month)?;
    let summary = MonthlySummary::generate(&storage.transactions, &settings.owner_id, month, &budgets)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.format_terminal(settings));
    }

    Ok(())
}
