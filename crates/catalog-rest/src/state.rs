//! Application state for Axum handlers.

use catalog_core::HasComponent;
use catalog_repository::DatabasePoolInterface;
use catalog_service::ProductService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    /// Store pool probed by the readiness check. `None` reports ready.
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>) -> Self {
        Self {
            product_service,
            database: None,
        }
    }

    /// Creates application state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: HasComponent<dyn ProductService> + HasComponent<dyn DatabasePoolInterface>,
    {
        Self {
            product_service: module.resolve(),
            database: Some(module.resolve()),
        }
    }

    /// Sets the store pool used by the readiness check.
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database = Some(database);
        self
    }
}
