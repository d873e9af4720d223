//! Transaction model
//!
//! Three shapes of the same record:
//! - `TransactionRow`: what the aggregation engine consumes; amount unchecked
//! - `ImportRow`: a fully validated record ready to be written
//! - `StoredTransaction`: a persisted record with identity and owner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::ids::TransactionId;
use crate::error::LedgerError;

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Match a label case-insensitively: `income`, `Expense`, ...
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            LedgerError::Validation(format!(
                "invalid type \"{}\" (must be INCOME or EXPENSE)",
                s.trim()
            ))
        })
    }
}

/// A raw transaction row as read from storage or another source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    /// Expected `YYYY-MM-DD`, never checked here
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionRow {
    pub fn new(
        kind: TransactionType,
        amount: impl Into<Amount>,
        date: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            kind,
            amount: amount.into(),
            date: date.into(),
            category: category.map(str::to_string),
        }
    }
}

/// A CSV row that passed every validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Finite and strictly positive
    pub amount: f64,
    /// Trimmed, never empty
    pub category: String,
    /// Matches `YYYY-MM-DD`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: TransactionId,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredTransaction {
    /// Stamp a validated row with a fresh id, its owner and the current time
    pub fn from_import(row: ImportRow, owner_id: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            owner_id: owner_id.into(),
            kind: row.kind,
            amount: row.amount,
            category: row.category,
            date: row.date,
            note: row.note,
            created_at: Utc::now(),
        }
    }

    /// The anonymous row view used by the aggregation engine
    pub fn to_row(&self) -> TransactionRow {
        TransactionRow {
            kind: self.kind,
            amount: Amount::Number(self.amount),
            date: self.date.clone(),
            category: Some(self.category.clone()),
        }
    }
}

impl fmt::Display for StoredTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.date,
            self.kind,
            self.category,
            self.amount,
            self.note.as_deref().unwrap_or("")
        )
    }
}

/// True when `s` is exactly four digits, dash, two digits, dash, two digits
///
/// Shape only: `2026-13-45` passes.
pub fn is_iso_date_pattern(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        assert_eq!(TransactionType::from_label("income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::from_label(" Expense "), Some(TransactionType::Expense));
        assert_eq!(TransactionType::from_label("transfer"), None);
        assert!("refund".parse::<TransactionType>().unwrap_err().is_validation());
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_iso_date_pattern("2026-01-05"));
        assert!(is_iso_date_pattern("2026-13-45"));
        assert!(!is_iso_date_pattern("2026-1-05"));
        assert!(!is_iso_date_pattern("05/01/2026"));
        assert!(!is_iso_date_pattern("2026-01-05 "));
        assert!(!is_iso_date_pattern("２０２６-01-05"));
        assert!(!is_iso_date_pattern(""));
    }

    #[test]
    fn test_row_deserializes_text_amount() {
        let row: TransactionRow = serde_json::from_str(
            r#"{"type":"EXPENSE","amount":"10","date":"2026-01-05","category":"Food"}"#,
        )
        .unwrap();
        assert_eq!(row.kind, TransactionType::Expense);
        assert_eq!(row.amount.coerce(), Some(10.0));
    }

    #[test]
    fn test_stored_to_row() {
        let stored = StoredTransaction::from_import(
            ImportRow {
                kind: TransactionType::Income,
                amount: 3000.0,
                category: "Salary".into(),
                date: "2026-01-01".into(),
                note: None,
            },
            "local",
        );
        let row = stored.to_row();
        assert_eq!(row.amount, Amount::Number(3000.0));
        assert_eq!(row.category.as_deref(), Some("Salary"));
        assert_eq!(stored.owner_id, "local");
    }

    #[test]
    fn test_stored_serialization() {
        let stored = StoredTransaction::from_import(
            ImportRow {
                kind: TransactionType::Expense,
                amount: 12.5,
                category: "Food".into(),
                date: "2026-01-05".into(),
                note: Some("lunch".into()),
            },
            "local",
        );
        let json = serde_json::to_string(&stored).unwrap();
        assert!(json.contains(r#""type":"EXPENSE""#));
        let back: StoredTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stored);
    }
}
