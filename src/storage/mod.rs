//! Storage layer
//!
//! The ledger core never builds queries itself; it talks to a
//! `TransactionStore` with a `TransactionFilter`. The default store keeps
//! JSON files with atomic writes. An in-memory store is provided for
//! embedding and tests.

pub mod budget;
pub mod file_io;
pub mod memory;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryTransactionStore;
pub use transactions::JsonTransactionStore;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Month, StoredTransaction, TransactionId, TransactionType};

/// The storage collaborator for transactions
pub trait TransactionStore {
    /// Rows matching the filter, newest date first
    fn select(&self, filter: &TransactionFilter) -> LedgerResult<Vec<StoredTransaction>>;

    /// Persist a batch; either the whole batch is stored or none of it
    fn insert_many(&self, rows: &[StoredTransaction]) -> LedgerResult<()>;

    /// Delete one row, only if it belongs to `owner_id`
    fn delete_one(&self, id: TransactionId, owner_id: &str) -> LedgerResult<()>;
}

/// Selection criteria passed through to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub owner_id: String,
    pub kind: Option<TransactionType>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    pub month: Option<Month>,
}

impl TransactionFilter {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    /// Blank text means no category filter
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn with_month(mut self, month: Option<Month>) -> Self {
        self.month = month;
        self
    }

    pub fn matches(&self, txn: &StoredTransaction) -> bool {
        if txn.owner_id != self.owner_id {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        if let Some(needle) = &self.category {
            if !txn.category.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(month) = &self.month {
            if !month.contains(&txn.date) {
                return false;
            }
        }
        true
    }
}

/// Order by date descending, then creation time descending
pub fn sort_newest_first(rows: &mut [StoredTransaction]) {
    rows.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: JsonTransactionStore,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: JsonTransactionStore::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImportRow;
    use tempfile::TempDir;

    fn stored(kind: TransactionType, category: &str, date: &str, owner: &str) -> StoredTransaction {
        StoredTransaction::from_import(
            ImportRow {
                kind,
                amount: 10.0,
                category: category.into(),
                date: date.into(),
                note: None,
            },
            owner,
        )
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.paths().base_dir(), temp_dir.path());
    }

    #[test]
    fn test_filter_matches() {
        let txn = stored(TransactionType::Expense, "Groceries", "2026-02-14", "me");

        assert!(TransactionFilter::for_owner("me").matches(&txn));
        assert!(!TransactionFilter::for_owner("you").matches(&txn));
        assert!(!TransactionFilter::for_owner("me")
            .with_kind(Some(TransactionType::Income))
            .matches(&txn));
        assert!(TransactionFilter::for_owner("me")
            .with_category(Some("CERIES".into()))
            .matches(&txn));
        assert!(TransactionFilter::for_owner("me")
            .with_category(Some("  ".into()))
            .matches(&txn));
        assert!(!TransactionFilter::for_owner("me")
            .with_month(Some(Month::parse("2026-03").unwrap()))
            .matches(&txn));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut rows = vec![
            stored(TransactionType::Expense, "a", "2026-01-01", "me"),
            stored(TransactionType::Expense, "b", "2026-01-03", "me"),
            stored(TransactionType::Expense, "c", "2026-01-02", "me"),
        ];
        sort_newest_first(&mut rows);
        let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-03", "2026-01-02", "2026-01-01"]);
    }
}
