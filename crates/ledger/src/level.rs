//! Derived stock level projection.

use serde::{Deserialize, Serialize};

use morpankh_core::{ProductId, StockChannel, VariantId};

/// Key of one independent stock pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelKey {
    pub product_id: ProductId,
    /// `None` is the product's base pool.
    pub variant_id: Option<VariantId>,
    pub channel: StockChannel,
}

/// Current quantity for one stock pool.
///
/// This is a cached projection over the transaction log: at all times
/// `quantity == sum(IN) - sum(OUT)` for the key. `version` counts commits
/// against the key and is the optimistic-concurrency token checked by the
/// store; a missing row reads as quantity 0 at version 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub key: LevelKey,
    pub quantity: i64,
    pub version: u64,
}

impl StockLevel {
    /// The implicit zero baseline for a key with no transactions yet.
    pub fn empty(key: LevelKey) -> Self {
        Self {
            key,
            quantity: 0,
            version: 0,
        }
    }
}
