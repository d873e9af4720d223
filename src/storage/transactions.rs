//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{StoredTransaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{sort_newest_first, TransactionFilter, TransactionStore};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<StoredTransaction>,
}

/// File-backed transaction store
pub struct JsonTransactionStore {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, StoredTransaction>>,
}

impl JsonTransactionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        log::debug!("Loaded {} transactions from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        persist(&self.path, &data)
    }
}

fn persist(
    path: &Path,
    data: &HashMap<TransactionId, StoredTransaction>,
) -> Result<(), LedgerError> {
    let mut transactions: Vec<_> = data.values().cloned().collect();
    sort_newest_first(&mut transactions);
    write_json_atomic(path, &TransactionData { transactions })
}

impl TransactionStore for JsonTransactionStore {
    fn select(&self, filter: &TransactionFilter) -> LedgerResult<Vec<StoredTransaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut rows: Vec<_> = data
            .values()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn insert_many(&self, rows: &[StoredTransaction]) -> LedgerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for txn in rows {
            data.insert(txn.id, txn.clone());
        }

        // Keep memory in step with disk: a failed write drops the whole batch
        if let Err(e) = persist(&self.path, &data) {
            for txn in rows {
                data.remove(&txn.id);
            }
            return Err(e);
        }

        log::debug!("Inserted {} transactions", rows.len());
        Ok(())
    }

    fn delete_one(&self, id: TransactionId, owner_id: &str) -> LedgerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let owned = data.get(&id).is_some_and(|txn| txn.owner_id == owner_id);
        if !owned {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }

        let removed = data.remove(&id);
        if let Err(e) = persist(&self.path, &data) {
            if let Some(txn) = removed {
                data.insert(id, txn);
            }
            return Err(e);
        }

        Ok(())
    }
}
