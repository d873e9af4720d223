//! CSV Import service
//!
//! Turns raw CSV text into validated rows and writes them through a
//! `TransactionStore`. Validation is all-or-nothing: a single bad row rejects
//! the whole file before anything is written. Writing happens in sequential
//! batches; a failing batch stops the import but earlier batches stay.

use serde::Serialize;
use thiserror::Error;

use crate::codec::parse_line;
use crate::error::ImportError;
use crate::models::{is_iso_date_pattern, parse_amount, ImportRow, StoredTransaction, TransactionType};
use crate::storage::TransactionStore;

/// Rows handed to the store per `insert_many` call
pub const IMPORT_BATCH_SIZE: usize = 500;

/// Row errors reported back to the caller, at most
pub const MAX_REPORTED_ERRORS: usize = 25;

/// Header names that must be present, in reporting order
pub const REQUIRED_COLUMNS: [&str; 4] = ["type", "amount", "category", "date"];

/// Column positions located from the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub type_column: usize,
    pub amount_column: usize,
    pub category_column: usize,
    pub date_column: usize,
    pub note_column: Option<usize>,
}

impl ColumnMapping {
    /// Locate columns by case-insensitive, trimmed header name
    ///
    /// Reports every missing required column at once.
    pub fn from_header(line: &str) -> Result<Self, ImportError> {
        let headers: Vec<String> = parse_line(line)
            .into_iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let find = |name: &str| headers.iter().position(|h| h == name);

        let [type_column, amount_column, category_column, date_column] =
            REQUIRED_COLUMNS.map(&find);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip([type_column, amount_column, category_column, date_column])
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match (type_column, amount_column, category_column, date_column) {
            (Some(type_column), Some(amount_column), Some(category_column), Some(date_column)) => {
                Ok(Self {
                    type_column,
                    amount_column,
                    category_column,
                    date_column,
                    note_column: find("note"),
                })
            }
            _ => Err(ImportError::MissingColumns { names: missing }),
        }
    }
}

/// Why a single data row was rejected; `line` is 1-based with the header on line 1
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Line {line}: invalid type \"{value}\" (must be INCOME or EXPENSE)")]
    InvalidType { line: usize, value: String },

    #[error("Line {line}: invalid amount \"{value}\" (must be positive number)")]
    InvalidAmount { line: usize, value: String },

    #[error("Line {line}: category is required")]
    MissingCategory { line: usize },

    #[error("Line {line}: invalid date \"{value}\" (must be YYYY-MM-DD)")]
    InvalidDate { line: usize, value: String },
}

/// Validate one parsed data row, stopping at the first failing rule
///
/// Rules run in order: type, amount, category, date. Cells past the end of
/// the row read as empty.
pub fn validate_row(
    cells: &[String],
    mapping: &ColumnMapping,
    line: usize,
) -> Result<ImportRow, RowError> {
    let cell = |idx: usize| cells.get(idx).map(|c| c.trim()).unwrap_or("");

    let type_label = cell(mapping.type_column).to_uppercase();
    let kind = TransactionType::from_label(&type_label).ok_or_else(|| RowError::InvalidType {
        line,
        value: type_label.clone(),
    })?;

    let amount_text = cell(mapping.amount_column);
    let amount = parse_amount(amount_text)
        .filter(|a| *a > 0.0)
        .ok_or_else(|| RowError::InvalidAmount {
            line,
            value: amount_text.to_string(),
        })?;

    let category = cell(mapping.category_column);
    if category.is_empty() {
        return Err(RowError::MissingCategory { line });
    }

    let date = cell(mapping.date_column);
    if !is_iso_date_pattern(date) {
        return Err(RowError::InvalidDate {
            line,
            value: date.to_string(),
        });
    }

    let note = mapping
        .note_column
        .map(cell)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ImportRow {
        kind,
        amount,
        category: category.to_string(),
        date: date.to_string(),
        note,
    })
}

/// Normalize line endings and drop leading/trailing blank lines
fn significant_lines(text: &str) -> Vec<&str> {
    let normalized: Vec<&str> = text.split('\n').collect();
    let is_blank = |l: &&str| l.trim().is_empty();

    let start = normalized.iter().position(|l| !is_blank(l)).unwrap_or(normalized.len());
    let end = normalized.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    normalized[start..end].to_vec()
}

/// Parse and validate a whole CSV document
///
/// Returns every row in file order, or the first structural failure, or a
/// `ValidationFailed` report listing up to `MAX_REPORTED_ERRORS` row errors.
pub fn parse_import(text: &str) -> Result<Vec<ImportRow>, ImportError> {
    // Spreadsheet exports often start with a byte order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines = significant_lines(&normalized);
    if lines.len() < 2 {
        return Err(ImportError::MissingHeaderOrRows);
    }

    let mapping = ColumnMapping::from_header(lines[0])?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in lines.iter().enumerate().skip(1) {
        if raw.trim().is_empty() {
            continue;
        }

        match validate_row(&parse_line(raw), &mapping, idx + 1) {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        log::info!("CSV import rejected: {} invalid rows", errors.len());
        return Err(ImportError::ValidationFailed {
            details: errors
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .map(ToString::to_string)
                .collect(),
        });
    }

    if rows.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    Ok(rows)
}

/// Success shape of an import: `{ "inserted": n }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub inserted: usize,
}

/// Service for CSV import
pub struct ImportService<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
    owner_id: String,
}

impl<'a, S: TransactionStore + ?Sized> ImportService<'a, S> {
    /// Create an import service writing rows owned by `owner_id`
    pub fn new(store: &'a S, owner_id: impl Into<String>) -> Self {
        Self {
            store,
            owner_id: owner_id.into(),
        }
    }

    /// Validate the document, then insert every row in batches
    pub fn import_csv(&self, text: &str) -> Result<ImportOutcome, ImportError> {
        let rows = parse_import(text)?;
        let inserted = self.insert_in_batches(rows)?;
        log::info!("Imported {} transactions for {}", inserted, self.owner_id);
        Ok(ImportOutcome { inserted })
    }

    /// Write validated rows sequentially, `IMPORT_BATCH_SIZE` at a time
    ///
    /// Stops at the first failing batch. Batches already written are kept.
    pub fn insert_in_batches(&self, rows: Vec<ImportRow>) -> Result<usize, ImportError> {
        let stored: Vec<StoredTransaction> = rows
            .into_iter()
            .map(|row| StoredTransaction::from_import(row, self.owner_id.clone()))
            .collect();

        let mut inserted = 0;
        for batch in stored.chunks(IMPORT_BATCH_SIZE) {
            if let Err(e) = self.store.insert_many(batch) {
                log::warn!(
                    "Import aborted after {} of {} rows: {}",
                    inserted,
                    stored.len(),
                    e
                );
                return Err(ImportError::StorageFailure(e.to_string()));
            }
            inserted += batch.len();
            log::debug!("Inserted batch of {} ({} so far)", batch.len(), inserted);
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LedgerError, LedgerResult};
    use crate::models::TransactionId;
    use crate::storage::{MemoryTransactionStore, TransactionFilter};
    use std::cell::RefCell;

    /// Store that counts batches and refuses the n-th one
    struct FlakyStore {
        inner: MemoryTransactionStore,
        fail_on_batch: Option<usize>,
        batches: RefCell<Vec<usize>>,
    }

    impl FlakyStore {
        fn new(fail_on_batch: Option<usize>) -> Self {
            Self {
                inner: MemoryTransactionStore::new(),
                fail_on_batch,
                batches: RefCell::new(Vec::new()),
            }
        }
    }

    impl TransactionStore for FlakyStore {
        fn select(&self, filter: &TransactionFilter) -> LedgerResult<Vec<StoredTransaction>> {
            self.inner.select(filter)
        }

        fn insert_many(&self, rows: &[StoredTransaction]) -> LedgerResult<()> {
            let batch_no = self.batches.borrow().len();
            if self.fail_on_batch == Some(batch_no) {
                return Err(LedgerError::Storage("disk full".into()));
            }
            self.batches.borrow_mut().push(rows.len());
            self.inner.insert_many(rows)
        }

        fn delete_one(&self, id: TransactionId, owner_id: &str) -> LedgerResult<()> {
            self.inner.delete_one(id, owner_id)
        }
    }

    fn csv_with_rows(n: usize) -> String {
        let mut text = String::from("type,amount,category,date\n");
        for i in 0..n {
            text.push_str(&format!("EXPENSE,{},Food,2026-01-05\n", i + 1));
        }
        text
    }

    #[test]
    fn test_parse_simple_csv() {
        let rows = parse_import(
            "type,amount,category,date,note\n\
             INCOME,3000,Salary,2026-01-01,\n\
             expense,25.50,Food,2026-01-05,\"lunch, with team\"",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, TransactionType::Income);
        assert_eq!(rows[0].note, None);
        assert_eq!(rows[1].kind, TransactionType::Expense);
        assert_eq!(rows[1].amount, 25.5);
        assert_eq!(rows[1].note.as_deref(), Some("lunch, with team"));
    }

    #[test]
    fn test_header_is_case_insensitive_and_reorderable() {
        let rows =
            parse_import(" Date ,CATEGORY,Amount,Type\n2026-02-03,Rent,800,EXPENSE").unwrap();
        assert_eq!(rows[0].category, "Rent");
        assert_eq!(rows[0].date, "2026-02-03");
        assert_eq!(rows[0].amount, 800.0);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let rows =
            parse_import("\u{feff}type,amount,category,date\nEXPENSE,5,Food,2026-01-05").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, TransactionType::Expense);
        assert_eq!(rows[0].category, "Food");

        assert_eq!(parse_import("\u{feff}"), Err(ImportError::EmptyInput));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_import(""), Err(ImportError::EmptyInput));
        assert_eq!(parse_import(" \r\n\t\n"), Err(ImportError::EmptyInput));
    }

    #[test]
    fn test_header_without_rows() {
        assert_eq!(
            parse_import("\n\ntype,amount,category,date\n\n"),
            Err(ImportError::MissingHeaderOrRows)
        );
    }

    #[test]
    fn test_missing_columns_reports_all() {
        assert_eq!(
            parse_import("type,amount,category\nEXPENSE,5,Food"),
            Err(ImportError::MissingColumns {
                names: vec!["date".into()]
            })
        );
        assert_eq!(
            parse_import("amount,note\n5,x"),
            Err(ImportError::MissingColumns {
                names: vec!["type".into(), "category".into(), "date".into()]
            })
        );
    }

    #[test]
    fn test_negative_amount_rejects_whole_import() {
        let store = MemoryTransactionStore::new();
        let service = ImportService::new(&store, "local");

        let err = service
            .import_csv("type,amount,category,date\nEXPENSE,-5,Food,2026-01-05")
            .unwrap_err();

        assert_eq!(
            err,
            ImportError::ValidationFailed {
                details: vec![
                    "Line 2: invalid amount \"-5\" (must be positive number)".to_string()
                ]
            }
        );
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_validation_order_one_error_per_row() {
        let text = "type,amount,category,date\n\
                    transfer,abc,,bad\n\
                    EXPENSE,0,,bad\n\
                    EXPENSE,5,,bad\n\
                    EXPENSE,5,Food,05/01/2026\n\
                    INCOME,5,Pay,2026-01-01";

        let Err(ImportError::ValidationFailed { details }) = parse_import(text) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            details,
            vec![
                "Line 2: invalid type \"TRANSFER\" (must be INCOME or EXPENSE)",
                "Line 3: invalid amount \"0\" (must be positive number)",
                "Line 4: category is required",
                "Line 5: invalid date \"05/01/2026\" (must be YYYY-MM-DD)",
            ]
        );
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let text = "\r\n\r\ntype,amount,category,date\r\n\r\nEXPENSE,5,Food,2026-01-05\r\nEXPENSE,x,Food,2026-01-05\r\n";
        let Err(ImportError::ValidationFailed { details }) = parse_import(text) else {
            panic!("expected validation failure");
        };
        assert_eq!(details, vec!["Line 4: invalid amount \"x\" (must be positive number)"]);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let Err(ImportError::ValidationFailed { details }) =
            parse_import("type,amount,category,date\nEXPENSE,5")
        else {
            panic!("expected validation failure");
        };
        assert_eq!(details, vec!["Line 2: category is required"]);
    }

    #[test]
    fn test_error_report_capped() {
        let mut text = String::from("type,amount,category,date\n");
        for _ in 0..40 {
            text.push_str("EXPENSE,-1,Food,2026-01-05\n");
        }

        let Err(ImportError::ValidationFailed { details }) = parse_import(&text) else {
            panic!("expected validation failure");
        };
        assert_eq!(details.len(), MAX_REPORTED_ERRORS);
        assert!(details[0].starts_with("Line 2:"));
        assert!(details[24].starts_with("Line 26:"));
    }

    #[test]
    fn test_cr_only_line_endings() {
        let rows = parse_import("type,amount,category,date\rEXPENSE,1,Food,2026-01-05\rINCOME,2,Pay,2026-01-06")
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_import_inserts_in_order() {
        let store = MemoryTransactionStore::new();
        let service = ImportService::new(&store, "local");

        let outcome = service.import_csv(&csv_with_rows(3)).unwrap();
        assert_eq!(outcome, ImportOutcome { inserted: 3 });

        let amounts: Vec<f64> = store.all().unwrap().iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0]);
        assert!(store.all().unwrap().iter().all(|t| t.owner_id == "local"));
    }

    #[test]
    fn test_large_import_is_batched() {
        let store = FlakyStore::new(None);
        let service = ImportService::new(&store, "local");

        let outcome = service.import_csv(&csv_with_rows(1201)).unwrap();
        assert_eq!(outcome.inserted, 1201);
        assert_eq!(*store.batches.borrow(), vec![500, 500, 201]);
    }

    #[test]
    fn test_storage_failure_keeps_earlier_batches() {
        let store = FlakyStore::new(Some(1));
        let service = ImportService::new(&store, "local");

        let err = service.import_csv(&csv_with_rows(1200)).unwrap_err();
        assert_eq!(
            err,
            ImportError::StorageFailure("Storage error: disk full".into())
        );
        assert_eq!(store.inner.all().unwrap().len(), IMPORT_BATCH_SIZE);
    }
}
