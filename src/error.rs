//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Import failures have their own enum so the
//! caller can tell a structural problem from a row-level validation report.

use serde::Serialize;
use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// CSV import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Why a CSV import was rejected
///
/// Every variant except `StorageFailure` is raised before anything is
/// written, so the store is untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("CSV is empty")]
    EmptyInput,

    #[error("CSV must have header + at least 1 row")]
    MissingHeaderOrRows,

    #[error("Missing required CSV columns")]
    MissingColumns { names: Vec<String> },

    /// One message per rejected row, capped at the first 25
    #[error("CSV validation failed")]
    ValidationFailed { details: Vec<String> },

    #[error("No valid rows found")]
    NoValidRows,

    /// The store refused a batch; batches before it stay committed
    #[error("{0}")]
    StorageFailure(String),
}

impl ImportError {
    /// One-line summary, the `error` field of the failure report
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Ordered per-row (or per-column) messages, when the failure has any
    pub fn details(&self) -> Option<Vec<String>> {
        match self {
            Self::MissingColumns { names } => Some(vec![format!(
                "Required headers: type, amount, category, date. Missing: {}",
                names.join(", ")
            )]),
            Self::ValidationFailed { details } => Some(details.clone()),
            _ => None,
        }
    }

    /// Serializable `{error, details?}` report for API-style output
    pub fn report(&self) -> ImportFailure {
        ImportFailure {
            error: self.summary(),
            details: self.details(),
        }
    }
}

/// Failure shape of an import: `{ "error": ..., "details": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}
