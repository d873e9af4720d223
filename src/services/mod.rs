//! Service layer for the ledger
//!
//! The service layer provides business logic on top of a `TransactionStore`,
//! handling validation and the batched CSV import.

pub mod import;
pub mod transaction;

pub use import::{parse_import, ImportOutcome, ImportService, IMPORT_BATCH_SIZE, MAX_REPORTED_ERRORS};
pub use transaction::{CreateTransactionInput, ListQuery, TransactionPage, TransactionService};
