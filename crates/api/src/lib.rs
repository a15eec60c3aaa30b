//! HTTP surface of the stock ledger.

pub mod app;
