//! Product/variant directory for the stock ledger.
//!
//! The ledger never trusts raw identifiers from a scanning station: every
//! transaction target is resolved against this directory first, whether it
//! arrives as an explicit id pair, a barcode, or a variant code.

pub mod directory;
pub mod product;

pub use directory::{InMemoryProductDirectory, ProductDirectory, ResolvedTarget, TransactionTarget};
pub use product::{Product, Variant};
