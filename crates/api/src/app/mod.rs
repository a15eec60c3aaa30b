//! Application wiring: services + router.

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use morpankh_catalog::InMemoryProductDirectory;
use morpankh_ledger::{InMemoryLedgerStore, OverdraftPolicy, StockLedger};

pub mod dto;
pub mod errors;
pub mod routes;

/// Concrete ledger type used by the API (in-memory backends).
pub type AppLedger = StockLedger<Arc<InMemoryProductDirectory>, Arc<InMemoryLedgerStore>>;

/// Shared services injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    pub ledger: Arc<AppLedger>,
    pub directory: Arc<InMemoryProductDirectory>,
}

impl AppServices {
    /// In-memory wiring (dev/test): directory + ledger store.
    pub fn in_memory(policy: OverdraftPolicy) -> Self {
        let directory = Arc::new(InMemoryProductDirectory::new());
        let store = Arc::new(InMemoryLedgerStore::new());
        let ledger = Arc::new(StockLedger::new(directory.clone(), store).with_policy(policy));
        Self { ledger, directory }
    }
}

/// Build the application router.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .nest("/stock", routes::stock::router())
        .merge(routes::system::router())
        .layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}
