//! CLI command handler for CSV import
//!
//! Reads a CSV file and runs it through the import service. Failures are
//! reported with their row details before the command exits with an error.

use std::path::Path;

use crate::config::Settings;
use crate::error::{ImportError, LedgerError, LedgerResult};
use crate::services::{ImportService, IMPORT_BATCH_SIZE};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
    json: bool,
) -> LedgerResult<()> {
    if !file.exists() {
        return Err(LedgerError::Io(format!("File not found: {}", file.display())));
    }

    let content = std::fs::read_to_string(file)
        .map_err(|e| LedgerError::Io(format!("Failed to read file: {}", e)))?;

    let service = ImportService::new(&storage.transactions, settings.owner_id.clone());

    match service.import_csv(&content) {
        Ok(outcome) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!(
                    "Imported {} transactions from {}",
                    outcome.inserted,
                    file.display()
                );
            }
            Ok(())
        }
        Err(err) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&err.report())?);
            } else {
                eprintln!("Import failed: {}", err.summary());
                for line in err.details().unwrap_or_default() {
                    eprintln!("  {}", line);
                }
                if matches!(err, ImportError::StorageFailure(_)) {
                    eprintln!(
                        "  Rows are written in batches of {}; batches before the failure were kept.",
                        IMPORT_BATCH_SIZE
                    );
                }
            }
            Err(err.into())
        }
    }
}
