//! Budget CLI commands
//!
//! Implements CLI commands for monthly category limits.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::parse_amount;
use crate::storage::Storage;

use super::month_or_current;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the limit for a category
    Set {
        /// Category name
        category: String,
        /// Monthly limit (e.g., "400" or "400.00")
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove the limit for a category
    Remove {
        /// Category name
        category: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List limits for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let amount = parse_amount(&amount).ok_or_else(|| {
                LedgerError::Validation(format!("invalid amount \"{}\"", amount.trim()))
            })?;

            let budget = storage.budgets.set(month, &category, amount)?;
            storage.budgets.save()?;

            println!(
                "Budget for '{}' in {}: {}",
                budget.category,
                month,
                settings.format_money(budget.amount)
            );
        }

        BudgetCommands::Remove { category, month } => {
            let month = month_or_current(month.as_deref())?;
            let removed = storage.budgets.remove(month, &category)?;
            storage.budgets.save()?;

            println!("Removed budget for '{}' in {}", removed.category, month);
        }

        BudgetCommands::List { month } => {
            let month = month_or_current(month.as_deref())?;
            let budgets = storage.budgets.list_for_month(month)?;

            println!("Budgets for {}", month);
            println!("{}", "=".repeat(44));

            if budgets.is_empty() {
                println!("No budgets set.");
                return Ok(());
            }

            let mut total = 0.0;
            for budget in &budgets {
                total += budget.amount;
                println!(
                    "{:<28} {:>15}",
                    budget.category,
                    settings.format_money(budget.amount)
                );
            }
            println!("{}", "-".repeat(44));
            println!("{:<28} {:>15}", "Total", settings.format_money(total));
        }
    }

    Ok(())
}
