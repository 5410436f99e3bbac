//! Shared application state for all routes. Datasources are resolved once at build time.

use crate::config::ResolvedDataSources;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub datasources: Arc<ResolvedDataSources>,
}

impl AppState {
    pub fn new(datasources: ResolvedDataSources) -> Self {
        AppState {
            datasources: Arc::new(datasources),
        }
    }
}
