//! The ledger service: validation, resolution, and the atomic commit loop.

use chrono::Utc;

use morpankh_catalog::ProductDirectory;
use morpankh_core::{ExpectedVersion, LedgerError, LedgerResult, MovementKind, ProductId, TransactionId};

use crate::level::{LevelKey, StockLevel};
use crate::query::{Pagination, TransactionFilter, TransactionPage};
use crate::store::{LedgerStore, StoreError};
use crate::transaction::{StockTransaction, TransactionRequest};

/// What to do when an OUT movement would drive a pool negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OverdraftPolicy {
    /// Reject with `InsufficientStock`; the log never records a movement that
    /// could not physically have happened.
    #[default]
    Reject,
    /// Allow negative levels (explicit opt-in for shops that reconcile later).
    Allow,
}

/// Result of a successful `record_transaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransaction {
    pub transaction: StockTransaction,
    pub new_quantity: i64,
}

/// Retry budget for contended keys. Each retry re-reads the level, so the
/// loser of a race is re-evaluated against the winner's committed quantity.
const MAX_COMMIT_ATTEMPTS: u32 = 8;

/// The stock-adjustment ledger.
///
/// Owns all writes to the transaction log and the level projection. Callers
/// never touch either directly; the scanning UI, admin panel, and fulfillment
/// process all go through [`record_transaction`](Self::record_transaction).
#[derive(Debug)]
pub struct StockLedger<D, S> {
    directory: D,
    store: S,
    policy: OverdraftPolicy,
}

impl<D, S> StockLedger<D, S> {
    pub fn new(directory: D, store: S) -> Self {
        Self {
            directory,
            store,
            policy: OverdraftPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OverdraftPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> OverdraftPolicy {
        self.policy
    }
}

impl<D, S> StockLedger<D, S>
where
    D: ProductDirectory,
    S: LedgerStore,
{
    /// Record a stock movement and return the committed record plus the new
    /// quantity of the affected pool.
    ///
    /// The read-compute-commit sequence behaves as an atomic unit per stock
    /// key: the commit is guarded by the level version observed at read time,
    /// and a concurrent writer on the same key forces a re-read. Validation
    /// and policy failures leave both the log and the projection untouched.
    pub fn record_transaction(
        &self,
        request: TransactionRequest,
    ) -> LedgerResult<RecordedTransaction> {
        if request.quantity == 0 {
            return Err(LedgerError::validation("quantity must be positive"));
        }

        let resolved = self.directory.resolve(&request.target)?;
        let key = LevelKey {
            product_id: resolved.product_id,
            variant_id: resolved.variant_id,
            channel: request.channel,
        };
        let delta = i64::from(request.quantity);

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let current = self
                .store
                .level(&key)?
                .unwrap_or_else(|| StockLevel::empty(key));

            let candidate = match request.movement {
                MovementKind::In => current.quantity + delta,
                MovementKind::Out => current.quantity - delta,
            };

            if candidate < 0
                && request.movement == MovementKind::Out
                && self.policy == OverdraftPolicy::Reject
            {
                return Err(LedgerError::insufficient_stock(current.quantity, delta));
            }

            let transaction = StockTransaction {
                id: TransactionId::new(),
                product_id: key.product_id,
                variant_id: key.variant_id,
                movement: request.movement,
                quantity: request.quantity,
                channel: request.channel,
                reason: request.reason.clone(),
                scanned_by: request.scanned_by,
                notes: request.notes.clone(),
                created_at: Utc::now(),
            };
            let new_level = StockLevel {
                key,
                quantity: candidate,
                version: current.version + 1,
            };

            match self.store.commit(
                transaction.clone(),
                new_level,
                ExpectedVersion::Exact(current.version),
            ) {
                Ok(()) => {
                    tracing::debug!(
                        transaction_id = %transaction.id,
                        product_id = %key.product_id,
                        movement = request.movement.as_str(),
                        quantity = request.quantity,
                        new_quantity = candidate,
                        "stock transaction committed"
                    );
                    return Ok(RecordedTransaction {
                        transaction,
                        new_quantity: candidate,
                    });
                }
                Err(StoreError::Concurrency(_)) => {
                    tracing::debug!(product_id = %key.product_id, attempt, "stock key contended, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(LedgerError::conflict(format!(
            "stock key stayed contended after {MAX_COMMIT_ATTEMPTS} attempts"
        )))
    }

    /// Paginated history read, most recent first. Pure read.
    pub fn list_transactions(
        &self,
        filter: TransactionFilter,
        pagination: Pagination,
    ) -> LedgerResult<TransactionPage> {
        Ok(self.store.list_transactions(&filter, pagination)?)
    }

    /// Current quantity for a key; a key with no transactions reads as zero.
    pub fn level(&self, key: &LevelKey) -> LedgerResult<i64> {
        Ok(self.store.level(key)?.map(|l| l.quantity).unwrap_or(0))
    }

    /// All level rows for a product, across variants and channels.
    pub fn levels_for_product(&self, product_id: ProductId) -> LedgerResult<Vec<StockLevel>> {
        Ok(self.store.levels_for_product(product_id)?)
    }
}
