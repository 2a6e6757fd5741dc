//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::DataStore;
use crate::services::Services;

/// Application state containing all services.
///
/// Holds services only; the store context that backs them is owned by
/// whoever built the state and outlives the router.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Build every service on top of `store`.
    pub fn from_store(store: Arc<dyn DataStore>, config: &Config) -> Self {
        Self::new(Services::from_store(store, config))
    }
}
