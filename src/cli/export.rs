//! CLI command handler for CSV export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_file_name, export_transactions_csv};
use crate::models::TransactionType;
use crate::services::{ListQuery, TransactionService};
use crate::storage::Storage;

use super::parse_month_arg;

/// Arguments for the export command
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Output file; `-` writes to stdout. Defaults to transactions[_YYYY-MM].csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Only INCOME or EXPENSE
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    /// Category name contains this text
    #[arg(short, long)]
    pub category: Option<String>,
    /// Month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> LedgerResult<()> {
    let month = args.month.as_deref().map(parse_month_arg).transpose()?;
    let query = ListQuery {
        kind: args
            .kind
            .as_deref()
            .map(str::parse::<TransactionType>)
            .transpose()?,
        category: args.category,
        month,
        ..ListQuery::default()
    };

    let service = TransactionService::new(&storage.transactions, settings.owner_id.clone());
    let transactions = service.all_matching(&query)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_file_name(month)));

    if output.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        export_transactions_csv(&transactions, &mut handle)?;
        writeln!(handle).map_err(|e| LedgerError::Export(e.to_string()))?;
        return Ok(());
    }

    let file = File::create(&output)
        .map_err(|e| LedgerError::Export(format!("Failed to create file: {}", e)))?;
    let mut writer = BufWriter::new(file);
    export_transactions_csv(&transactions, &mut writer)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    println!(
        "Exported {} transactions to: {}",
        transactions.len(),
        output.display()
    );
    Ok(())
}
