//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Structured error surfaced to ledger callers.
///
/// Every failure of `record_transaction` / `list_transactions` lands in one of
/// these variants; nothing is swallowed. Callers decide retry behaviour from
/// the variant: `Validation` and `NotFound` are the caller's fault,
/// `InsufficientStock` is an expected business rejection, `Storage` is safe to
/// retry because commits are all-or-nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A value failed validation (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced product/variant/barcode does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An OUT movement would drive a stock pool negative.
    #[error("insufficient stock: only {available} remaining, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// Optimistic concurrency retries exhausted on a contended stock key.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage layer failed during the atomic commit (rolled back).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
