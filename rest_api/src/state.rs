// rest_api/src/state.rs
use std::sync::Arc;

use lib::config::RestApiConfig;
use lib::storage_engine::HospitalStorage;

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HospitalStorage>,
    pub config: Arc<RestApiConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn HospitalStorage>, config: RestApiConfig) -> Self {
        AppState { store, config: Arc::new(config) }
    }
}
