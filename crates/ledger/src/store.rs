//! Storage contract for the ledger.
//!
//! The store persists the append-only transaction log and the level
//! projection together. The one non-negotiable requirement is the atomic
//! commit: a log append and its level update land together or not at all,
//! guarded by the level's expected version so concurrent writers on the same
//! key are serialized.

use std::sync::Arc;

use thiserror::Error;

use morpankh_core::{ExpectedVersion, LedgerError, ProductId};

use crate::level::{LevelKey, StockLevel};
use crate::query::{Pagination, TransactionFilter, TransactionPage};
use crate::transaction::StockTransaction;

/// Store operation error (infrastructure, not business rules).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The expected level version did not match; a concurrent commit won.
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    /// The commit pair was internally inconsistent (transaction/level key
    /// mismatch, version not advanced by one).
    #[error("invalid commit: {0}")]
    InvalidCommit(String),

    /// Backend failure (lock poisoned, IO, connection). Commit rolled back.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for LedgerError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Concurrency(msg) => LedgerError::Conflict(msg),
            StoreError::InvalidCommit(msg) => LedgerError::Storage(msg),
            StoreError::Backend(msg) => LedgerError::Storage(msg),
        }
    }
}

/// Append-only ledger storage.
///
/// Implementations must:
/// - check `expected` against the current level version for the key inside
///   their critical section, rejecting with `Concurrency` on mismatch
/// - persist the transaction and the level atomically (all or nothing)
/// - never mutate or drop previously committed transactions
pub trait LedgerStore: Send + Sync {
    /// Atomically append `transaction` and write `new_level`.
    ///
    /// `new_level.version` must be exactly one past the current version
    /// (`expected`), mirroring how the level was read.
    fn commit(
        &self,
        transaction: StockTransaction,
        new_level: StockLevel,
        expected: ExpectedVersion,
    ) -> Result<(), StoreError>;

    /// Current level for a key; `None` means no transactions yet (zero).
    fn level(&self, key: &LevelKey) -> Result<Option<StockLevel>, StoreError>;

    /// All level rows for a product, across variants and channels.
    fn levels_for_product(&self, product_id: ProductId) -> Result<Vec<StockLevel>, StoreError>;

    /// Filtered, paginated history read, most recent first.
    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        pagination: Pagination,
    ) -> Result<TransactionPage, StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn commit(
        &self,
        transaction: StockTransaction,
        new_level: StockLevel,
        expected: ExpectedVersion,
    ) -> Result<(), StoreError> {
        (**self).commit(transaction, new_level, expected)
    }

    fn level(&self, key: &LevelKey) -> Result<Option<StockLevel>, StoreError> {
        (**self).level(key)
    }

    fn levels_for_product(&self, product_id: ProductId) -> Result<Vec<StockLevel>, StoreError> {
        (**self).levels_for_product(product_id)
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        pagination: Pagination,
    ) -> Result<TransactionPage, StoreError> {
        (**self).list_transactions(filter, pagination)
    }
}
