//! In-memory transaction store
//!
//! Same contract as the JSON store without touching disk. Useful when the
//! ledger is embedded in another process that owns persistence.

use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{StoredTransaction, TransactionId};

use super::{sort_newest_first, TransactionFilter, TransactionStore};

#[derive(Default)]
pub struct MemoryTransactionStore {
    rows: RwLock<Vec<StoredTransaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row in insertion order
    pub fn all(&self) -> LedgerResult<Vec<StoredTransaction>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(rows.clone())
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn select(&self, filter: &TransactionFilter) -> LedgerResult<Vec<StoredTransaction>> {
        let mut selected: Vec<_> = self
            .all()?
            .into_iter()
            .filter(|txn| filter.matches(txn))
            .collect();
        sort_newest_first(&mut selected);
        Ok(selected)
    }

    fn insert_many(&self, batch: &[StoredTransaction]) -> LedgerResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        rows.extend_from_slice(batch);
        Ok(())
    }

    fn delete_one(&self, id: TransactionId, owner_id: &str) -> LedgerResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = rows
            .iter()
            .position(|txn| txn.id == id && txn.owner_id == owner_id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        rows.remove(position);
        Ok(())
    }
}
