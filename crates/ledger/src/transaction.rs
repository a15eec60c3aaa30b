//! Immutable stock transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use morpankh_catalog::TransactionTarget;
use morpankh_core::{ActorId, MovementKind, ProductId, StockChannel, TransactionId, VariantId};

/// One recorded stock movement.
///
/// Append-only: once committed, a transaction is never mutated or deleted.
/// The log of these records is the audit trail the level projection is
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    /// `None` targets the product's base stock pool.
    pub variant_id: Option<VariantId>,
    pub movement: MovementKind,
    /// Magnitude of stock moved; strictly positive.
    pub quantity: u32,
    pub channel: StockChannel,
    /// Free-text classification ("restock", "damage", "sale-correction").
    pub reason: Option<String>,
    pub scanned_by: Option<ActorId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A caller's request to record a stock movement.
///
/// The target is resolved against the product directory before any stock is
/// touched; quantity and enums are validated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub target: TransactionTarget,
    pub movement: MovementKind,
    pub quantity: u32,
    pub channel: StockChannel,
    pub reason: Option<String>,
    pub scanned_by: Option<ActorId>,
    pub notes: Option<String>,
}

impl TransactionRequest {
    pub fn new(
        target: TransactionTarget,
        movement: MovementKind,
        quantity: u32,
        channel: StockChannel,
    ) -> Self {
        Self {
            target,
            movement,
            quantity,
            channel,
            reason: None,
            scanned_by: None,
            notes: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_scanned_by(mut self, actor: ActorId) -> Self {
        self.scanned_by = Some(actor);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
