//! Budget repository for JSON storage
//!
//! Monthly per-category limits, keyed by (month, category), in budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Budget, BudgetMap, Month};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budgets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub month: Month,
    pub category: String,
}

impl BudgetKey {
    pub fn new(month: Month, category: impl Into<String>) -> Self {
        Self {
            month,
            category: category.into(),
        }
    }
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            let key = BudgetKey::new(budget.month, budget.category.clone());
            budgets.insert(key, budget);
        }

        log::debug!("Loaded {} budgets from {}", budgets.len(), self.path.display());
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.month.cmp(&b.month).then(a.category.cmp(&b.category)));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Insert or replace the limit for a category in a month
    pub fn set(&self, month: Month, category: &str, amount: f64) -> Result<Budget, LedgerError> {
        let budget = Budget::new(month, category, amount)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = BudgetKey::new(month, budget.category.clone());
        let stored = budgets
            .entry(key)
            .and_modify(|existing| existing.set_amount(amount))
            .or_insert(budget)
            .clone();

        Ok(stored)
    }

    /// Remove the limit for a category in a month
    pub fn remove(&self, month: Month, category: &str) -> Result<Budget, LedgerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets
            .remove(&BudgetKey::new(month, category.trim()))
            .ok_or_else(|| LedgerError::budget_not_found(format!("{} {}", month, category.trim())))
    }

    /// All budgets for a month, sorted by category
    pub fn list_for_month(&self, month: Month) -> Result<Vec<Budget>, LedgerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.month == month)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(list)
    }

    /// Category -> limit for a month, the shape the usage ranking consumes
    pub fn for_month(&self, month: Month) -> Result<BudgetMap, LedgerError> {
        Ok(self
            .list_for_month(month)?
            .into_iter()
            .map(|b| (b.category, b.amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_set_replaces_existing() {
        let (_temp_dir, repo) = create_test_repo();
        repo.set(month("2026-01"), "Food", 100.0).unwrap();
        repo.set(month("2026-01"), " Food ", 150.0).unwrap();

        let list = repo.list_for_month(month("2026-01")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, 150.0);
    }

    #[test]
    fn test_for_month_is_scoped() {
        let (_temp_dir, repo) = create_test_repo();
        repo.set(month("2026-01"), "Food", 100.0).unwrap();
        repo.set(month("2026-01"), "Transport", 10.0).unwrap();
        repo.set(month("2026-02"), "Food", 999.0).unwrap();

        let jan = repo.for_month(month("2026-01")).unwrap();
        assert_eq!(jan.len(), 2);
        assert_eq!(jan["Food"], 100.0);
        assert!(repo.for_month(month("2026-03")).unwrap().is_empty());
    }

    #[test]
    fn test_remove_and_persist() {
        let (temp_dir, repo) = create_test_repo();
        repo.set(month("2026-01"), "Food", 100.0).unwrap();
        repo.set(month("2026-01"), "Bills", 300.0).unwrap();
        repo.remove(month("2026-01"), "Food").unwrap();
        assert!(repo.remove(month("2026-01"), "Food").unwrap_err().is_not_found());
        repo.save().unwrap();

        let reopened = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        reopened.load().unwrap();
        let list = reopened.list_for_month(month("2026-01")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category, "Bills");
    }

    #[test]
    fn test_rejects_negative_limit() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.set(month("2026-01"), "Food", -5.0).unwrap_err().is_validation());
    }
}
