//! `morpankh-core` — shared domain building blocks for the stock ledger.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod movement;
pub mod version;

pub use error::{LedgerError, LedgerResult};
pub use id::{ActorId, ProductId, TransactionId, VariantId};
pub use movement::{MovementKind, StockChannel};
pub use version::ExpectedVersion;
