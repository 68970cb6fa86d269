//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::registry::TrackedStopRegistry;

/// Shared application state.
///
/// Contains the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Catalog service over the cached Bus Time client
    pub catalog: Arc<CatalogService>,

    /// Curated tracked-stop list
    pub registry: Arc<TrackedStopRegistry>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CatalogService, registry: TrackedStopRegistry) -> Self {
        Self {
            catalog: Arc::new(catalog),
            registry: Arc::new(registry),
        }
    }
}
