//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_amount, TransactionId, TransactionType};
use crate::services::{CreateTransactionInput, ListQuery, TransactionPage, TransactionService};
use crate::storage::Storage;

use super::parse_month_arg;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// INCOME or EXPENSE
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Amount, a positive number (e.g., "25.50")
        amount: String,
        /// Category name
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Transactions per page (max 50)
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Only INCOME or EXPENSE
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Category name contains this text
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(&storage.transactions, settings.owner_id.clone());

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            note,
        } => {
            let amount = parse_amount(&amount).ok_or_else(|| {
                LedgerError::Validation(format!("invalid amount \"{}\"", amount.trim()))
            })?;
            let date = date.unwrap_or_else(|| Local::now().date_naive().to_string());

            let txn = service.create(CreateTransactionInput {
                kind: kind.parse()?,
                amount,
                category,
                date,
                note,
            })?;

            println!("Added transaction {}", txn.id);
            println!(
                "  {} {} {} {}",
                txn.date,
                txn.kind,
                txn.category,
                settings.format_money(txn.amount)
            );
        }

        TransactionCommands::List {
            page,
            limit,
            kind,
            category,
            month,
            json,
        } => {
            let query = ListQuery {
                page: Some(page),
                limit: Some(limit),
                kind: kind.as_deref().map(str::parse::<TransactionType>).transpose()?,
                category,
                month: month.as_deref().map(parse_month_arg).transpose()?,
            };
            let result = service.list(&query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_page(&result, settings));
            }
        }

        TransactionCommands::Delete { id } => {
            let id: TransactionId = id
                .parse()
                .map_err(|_| LedgerError::transaction_not_found(id.clone()))?;
            service.delete(id)?;
            println!("Deleted transaction {}", id);
        }
    }

    Ok(())
}

/// Render one page of transactions as a table
pub fn format_page(page: &TransactionPage, settings: &Settings) -> String {
    if page.items.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:<12} {:<8} {:<20} {:>14}  {}\n",
        "Date", "Type", "Category", "Amount", "ID"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in &page.items {
        output.push_str(&format!(
            "{:<12} {:<8} {:<20} {:>14}  {}\n",
            txn.date,
            txn.kind,
            txn.category,
            settings.format_money(txn.amount),
            txn.id
        ));
        if let Some(note) = &txn.note {
            output.push_str(&format!("{:<12} {}\n", "", note));
        }
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} transactions)\n",
        page.page, page.total_pages, page.total
    ));
    output
}
