//! CSV Export functionality
//!
//! Writes transactions in the same column layout the importer reads, so an
//! exported file can be imported again unchanged.

use chrono::SecondsFormat;
use std::io::Write;

use crate::codec::{escape_field, escape_opt};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Month, StoredTransaction, TransactionType};

/// Fixed column order of exported files
pub const EXPORT_HEADER: [&str; 6] = ["type", "amount", "category", "date", "note", "created_at"];

/// One exported line before escaping
///
/// Fields are written as found; nothing is validated on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub kind: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub date: String,
    pub note: Option<String>,
    pub created_at: Option<String>,
}

impl From<&StoredTransaction> for ExportRow {
    fn from(txn: &StoredTransaction) -> Self {
        Self {
            kind: txn.kind,
            amount: Amount::Number(txn.amount),
            category: txn.category.clone(),
            date: txn.date.clone(),
            note: txn.note.clone(),
            created_at: Some(txn.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl ExportRow {
    fn to_line(&self) -> String {
        [
            escape_field(self.kind.as_str()),
            escape_field(&self.amount.to_string()),
            escape_field(&self.category),
            escape_field(&self.date),
            escape_opt(self.note.as_deref()),
            escape_opt(self.created_at.as_deref()),
        ]
        .join(",")
    }
}

/// Render rows as CSV text: header first, rows in the given order
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn render_csv<I>(rows: I) -> String
where
    I: IntoIterator<Item = ExportRow>,
{
    std::iter::once(EXPORT_HEADER.join(","))
        .chain(rows.into_iter().map(|row| row.to_line()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export stored transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[StoredTransaction],
    writer: &mut W,
) -> LedgerResult<()> {
    let text = render_csv(transactions.iter().map(ExportRow::from));

    writer
        .write_all(text.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    log::debug!("Exported {} transactions", transactions.len());
    Ok(())
}

/// Suggested download name: `transactions.csv` or `transactions_2026-01.csv`
pub fn export_file_name(month: Option<Month>) -> String {
    match month {
        Some(month) => format!("transactions_{}.csv", month),
        None => "transactions.csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImportRow;
    use crate::services::parse_import;

    fn stored(kind: TransactionType, amount: f64, category: &str, note: Option<&str>) -> StoredTransaction {
        StoredTransaction::from_import(
            ImportRow {
                kind,
                amount,
                category: category.into(),
                date: "2026-01-05".into(),
                note: note.map(str::to_string),
            },
            "local",
        )
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render_csv(Vec::new()), "type,amount,category,date,note,created_at");
    }

    #[test]
    fn test_absent_fields_are_empty() {
        let row = ExportRow {
            kind: TransactionType::Income,
            amount: Amount::from("3000"),
            category: "Salary".into(),
            date: "2026-01-01".into(),
            note: None,
            created_at: None,
        };
        assert_eq!(
            render_csv(vec![row]),
            "type,amount,category,date,note,created_at\nINCOME,3000,Salary,2026-01-01,,"
        );
    }

    #[test]
    fn test_fields_are_escaped() {
        let txn = stored(
            TransactionType::Expense,
            25.5,
            "Food, drinks",
            Some("said \"hi\""),
        );
        let mut out = Vec::new();
        export_transactions_csv(std::slice::from_ref(&txn), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let line = text.lines().nth(1).unwrap();
        assert!(line.starts_with("EXPENSE,25.5,\"Food, drinks\",2026-01-05,\"said \"\"hi\"\"\","));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_readable_by_standard_reader() {
        let txns = vec![
            stored(TransactionType::Income, 3000.0, "Salary", None),
            stored(TransactionType::Expense, 12.75, "Food", Some("lunch, \"big\" one")),
        ];
        let text = render_csv(txns.iter().map(ExportRow::from));

        let mut reader = ::csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_HEADER.to_vec());

        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][1], "12.75");
        assert_eq!(&records[1][4], "lunch, \"big\" one");
        assert!(records[0][5].ends_with('Z'));
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let txns = vec![
            stored(TransactionType::Income, 3000.0, "Salary", None),
            stored(TransactionType::Expense, 0.1, "Coffee, tea", Some("a \"treat\"")),
        ];
        let text = render_csv(txns.iter().map(ExportRow::from));

        let rows = parse_import(&text).unwrap();
        let expected: Vec<ImportRow> = txns
            .iter()
            .map(|t| ImportRow {
                kind: t.kind,
                amount: t.amount,
                category: t.category.clone(),
                date: t.date.clone(),
                note: t.note.clone(),
            })
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(None), "transactions.csv");
        assert_eq!(
            export_file_name(Some(Month::parse("2026-01").unwrap())),
            "transactions_2026-01.csv"
        );
    }
}
