//! Transaction service
//!
//! Provides business logic for transaction management: validated creation,
//! paginated listing and owner-scoped deletion.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    is_iso_date_pattern, ImportRow, Month, StoredTransaction, TransactionId, TransactionType,
};
use crate::storage::{TransactionFilter, TransactionStore};

pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_NOTE_LEN: usize = 200;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

/// Service for transaction management
pub struct TransactionService<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
    owner_id: String,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub note: Option<String>,
}

impl CreateTransactionInput {
    /// Check every field and produce the normalized row
    pub fn validate(self) -> LedgerResult<ImportRow> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("category is required".into()));
        }
        if has_line_break(category) {
            return Err(LedgerError::Validation("category must be a single line".into()));
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(LedgerError::Validation(format!(
                "category must be at most {} characters",
                MAX_CATEGORY_LEN
            )));
        }

        let date = self.date.trim();
        if !is_iso_date_pattern(date) {
            return Err(LedgerError::Validation(format!(
                "invalid date \"{}\" (must be YYYY-MM-DD)",
                date
            )));
        }

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if note.is_some_and(has_line_break) {
            return Err(LedgerError::Validation("note must be a single line".into()));
        }
        if note.is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            return Err(LedgerError::Validation(format!(
                "note must be at most {} characters",
                MAX_NOTE_LEN
            )));
        }

        Ok(ImportRow {
            kind: self.kind,
            amount: self.amount,
            category: category.to_string(),
            date: date.to_string(),
            note: note.map(str::to_string),
        })
    }
}

/// CSV import splits on line terminators, so stored text must not contain any
fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Page request plus filters for listing
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub month: Option<Month>,
}

impl ListQuery {
    /// Page number, at least 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// The store filter for this query, scoped to one owner
    pub fn filter(&self, owner_id: &str) -> TransactionFilter {
        TransactionFilter::for_owner(owner_id)
            .with_kind(self.kind)
            .with_category(self.category.clone())
            .with_month(self.month)
    }

    /// Page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    pub items: Vec<StoredTransaction>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<'a, S: TransactionStore + ?Sized> TransactionService<'a, S> {
    /// Create a new transaction service acting for `owner_id`
    pub fn new(store: &'a S, owner_id: impl Into<String>) -> Self {
        Self {
            store,
            owner_id: owner_id.into(),
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> LedgerResult<StoredTransaction> {
        let row = input.validate()?;
        let txn = StoredTransaction::from_import(row, self.owner_id.clone());
        self.store.insert_many(std::slice::from_ref(&txn))?;

        log::info!("Created transaction {}", txn.id);
        Ok(txn)
    }

    /// List a page of transactions, newest first
    pub fn list(&self, query: &ListQuery) -> LedgerResult<TransactionPage> {
        let rows = self.all_matching(query)?;
        let page = query.page();
        let limit = query.limit();
        let total = rows.len();
        let total_pages = total.div_ceil(limit).max(1);

        let items = rows
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(TransactionPage {
            items,
            page,
            limit,
            total,
            total_pages,
        })
    }

    /// Every transaction matching the filter, unpaginated
    pub fn all_matching(&self, query: &ListQuery) -> LedgerResult<Vec<StoredTransaction>> {
        self.store.select(&query.filter(&self.owner_id))
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> LedgerResult<()> {
        self.store.delete_one(id, &self.owner_id)?;
        log::info!("Deleted transaction {}", id);
        Ok(())
    }
}
