//! In-memory ledger store.
//!
//! Intended for tests/dev. Both maps live behind one lock, which is what
//! makes the commit atomic: the version check, the log append, and the level
//! write all happen under a single write guard.

use std::collections::HashMap;
use std::sync::RwLock;

use morpankh_core::{ExpectedVersion, ProductId};

use crate::level::{LevelKey, StockLevel};
use crate::query::{Pagination, TransactionFilter, TransactionPage};
use crate::store::{LedgerStore, StoreError};
use crate::transaction::StockTransaction;

#[derive(Debug, Default)]
struct LedgerState {
    /// Append-only, insertion-ordered.
    log: Vec<StockTransaction>,
    levels: HashMap<LevelKey, StockLevel>,
}

/// In-memory append-only ledger store.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of committed transactions (test support).
    pub fn log_len(&self) -> usize {
        self.state.read().map(|s| s.log.len()).unwrap_or(0)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn commit(
        &self,
        transaction: StockTransaction,
        new_level: StockLevel,
        expected: ExpectedVersion,
    ) -> Result<(), StoreError> {
        // The commit pair must describe the same stock key.
        let key = new_level.key;
        if transaction.product_id != key.product_id
            || transaction.variant_id != key.variant_id
            || transaction.channel != key.channel
        {
            return Err(StoreError::InvalidCommit(
                "transaction does not match level key".to_string(),
            ));
        }

        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let current = state.levels.get(&key).map(|l| l.version).unwrap_or(0);
        if !expected.matches(current) {
            return Err(StoreError::Concurrency(format!(
                "expected {expected:?}, found {current}"
            )));
        }
        if new_level.version != current + 1 {
            return Err(StoreError::InvalidCommit(format!(
                "level version must advance by one (current {current}, got {})",
                new_level.version
            )));
        }

        state.log.push(transaction);
        state.levels.insert(key, new_level);
        Ok(())
    }

    fn level(&self, key: &LevelKey) -> Result<Option<StockLevel>, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(state.levels.get(key).cloned())
    }

    fn levels_for_product(&self, product_id: ProductId) -> Result<Vec<StockLevel>, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut levels: Vec<StockLevel> = state
            .levels
            .values()
            .filter(|l| l.key.product_id == product_id)
            .cloned()
            .collect();

        // Deterministic order for API responses.
        levels.sort_by_key(|l| (l.key.variant_id.map(|v| *v.as_uuid()), l.key.channel.as_str()));
        Ok(levels)
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        pagination: Pagination,
    ) -> Result<TransactionPage, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        // Reverse insertion order, then stable-sort by created_at descending:
        // ties keep newest-inserted first, so pagination is stable.
        let mut matching: Vec<&StockTransaction> =
            state.log.iter().rev().filter(|tx| filter.matches(tx)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let transactions = matching
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size as usize)
            .cloned()
            .collect();

        Ok(TransactionPage::new(transactions, total, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use morpankh_core::{MovementKind, StockChannel, TransactionId};

    fn tx_for(key: LevelKey, movement: MovementKind, quantity: u32) -> StockTransaction {
        StockTransaction {
            id: TransactionId::new(),
            product_id: key.product_id,
            variant_id: key.variant_id,
            movement,
            quantity,
            channel: key.channel,
            reason: None,
            scanned_by: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn online_key() -> LevelKey {
        LevelKey {
            product_id: ProductId::new(),
            variant_id: None,
            channel: StockChannel::Online,
        }
    }

    #[test]
    fn commit_appends_log_and_updates_level() {
        let store = InMemoryLedgerStore::new();
        let key = online_key();

        let level = StockLevel {
            key,
            quantity: 10,
            version: 1,
        };
        store
            .commit(
                tx_for(key, MovementKind::In, 10),
                level,
                ExpectedVersion::Exact(0),
            )
            .unwrap();

        assert_eq!(store.log_len(), 1);
        let stored = store.level(&key).unwrap().unwrap();
        assert_eq!(stored.quantity, 10);
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn stale_version_is_rejected_without_side_effects() {
        let store = InMemoryLedgerStore::new();
        let key = online_key();

        store
            .commit(
                tx_for(key, MovementKind::In, 5),
                StockLevel {
                    key,
                    quantity: 5,
                    version: 1,
                },
                ExpectedVersion::Exact(0),
            )
            .unwrap();

        // Second writer still thinks the key is at version 0.
        let err = store
            .commit(
                tx_for(key, MovementKind::Out, 3),
                StockLevel {
                    key,
                    quantity: 2,
                    version: 1,
                },
                ExpectedVersion::Exact(0),
            )
            .unwrap_err();
        match err {
            StoreError::Concurrency(_) => {}
            _ => panic!("expected Concurrency error"),
        }

        assert_eq!(store.log_len(), 1);
        assert_eq!(store.level(&key).unwrap().unwrap().quantity, 5);
    }

    #[test]
    fn mismatched_commit_pair_is_rejected() {
        let store = InMemoryLedgerStore::new();
        let key = online_key();
        let other_key = online_key();

        let err = store
            .commit(
                tx_for(other_key, MovementKind::In, 1),
                StockLevel {
                    key,
                    quantity: 1,
                    version: 1,
                },
                ExpectedVersion::Exact(0),
            )
            .unwrap_err();
        match err {
            StoreError::InvalidCommit(_) => {}
            _ => panic!("expected InvalidCommit error"),
        }
        assert_eq!(store.log_len(), 0);
    }

    #[test]
    fn list_transactions_is_most_recent_first_and_paginated() {
        let store = InMemoryLedgerStore::new();
        let key = online_key();

        for i in 1..=5u32 {
            store
                .commit(
                    tx_for(key, MovementKind::In, i),
                    StockLevel {
                        key,
                        quantity: (1..=i).map(i64::from).sum(),
                        version: u64::from(i),
                    },
                    ExpectedVersion::Exact(u64::from(i) - 1),
                )
                .unwrap();
        }

        let page = store
            .list_transactions(&TransactionFilter::default(), Pagination::new(Some(1), Some(2)))
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.transactions.len(), 2);
        // Newest first.
        assert_eq!(page.transactions[0].quantity, 5);
        assert_eq!(page.transactions[1].quantity, 4);

        let last = store
            .list_transactions(&TransactionFilter::default(), Pagination::new(Some(3), Some(2)))
            .unwrap();
        assert_eq!(last.transactions.len(), 1);
        assert_eq!(last.transactions[0].quantity, 1);
    }

    #[test]
    fn filters_apply_to_product_and_channel() {
        let store = InMemoryLedgerStore::new();
        let key_a = online_key();
        let key_b = LevelKey {
            product_id: ProductId::new(),
            variant_id: None,
            channel: StockChannel::Offline,
        };

        store
            .commit(
                tx_for(key_a, MovementKind::In, 1),
                StockLevel {
                    key: key_a,
                    quantity: 1,
                    version: 1,
                },
                ExpectedVersion::Exact(0),
            )
            .unwrap();
        store
            .commit(
                tx_for(key_b, MovementKind::In, 2),
                StockLevel {
                    key: key_b,
                    quantity: 2,
                    version: 1,
                },
                ExpectedVersion::Exact(0),
            )
            .unwrap();

        let filter = TransactionFilter {
            product_id: Some(key_a.product_id),
            ..Default::default()
        };
        let page = store
            .list_transactions(&filter, Pagination::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.transactions[0].product_id, key_a.product_id);

        let filter = TransactionFilter {
            channel: Some(StockChannel::Offline),
            ..Default::default()
        };
        let page = store
            .list_transactions(&filter, Pagination::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.transactions[0].channel, StockChannel::Offline);
    }
}
