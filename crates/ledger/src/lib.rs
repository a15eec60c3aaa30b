//! Stock-adjustment ledger.
//!
//! The ledger owns two pieces of state:
//!
//! - an **append-only log** of [`StockTransaction`] records (the audit trail
//!   and source of truth), and
//! - a derived [`StockLevel`] projection per `(product, variant, channel)`
//!   key, kept for fast reads and reconstructible from the log.
//!
//! All writes go through [`StockLedger::record_transaction`], which appends
//! the log entry and updates the projection as one atomic storage commit. No
//! other component writes stock levels.

pub mod in_memory;
pub mod level;
pub mod query;
pub mod service;
pub mod store;
pub mod transaction;

pub use in_memory::InMemoryLedgerStore;
pub use level::{LevelKey, StockLevel};
pub use query::{Pagination, TransactionFilter, TransactionPage};
pub use service::{OverdraftPolicy, RecordedTransaction, StockLedger};
pub use store::{LedgerStore, StoreError};
pub use transaction::{StockTransaction, TransactionRequest};
