//! Datasource report routes: GET /datasources, GET /datasource (the default one), GET /datasources/:name.

use crate::handlers::datasource::{list, read_default, read_named};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn datasource_routes(state: AppState) -> Router {
    Router::new()
        .route("/datasources", get(list))
        .route("/datasource", get(read_default))
        .route("/datasources/:name", get(read_named))
        .with_state(state)
}
