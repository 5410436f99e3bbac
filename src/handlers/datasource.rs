//! Datasource report handlers: list all resolved datasources, the default one, or a named one.

use crate::config::{ResolvedDataSource, DEFAULT_DATASOURCE};
use crate::error::AppError;
use crate::extractors::{extract, RequestContext};
use crate::response::{success_many, success_one};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let data: Vec<ResolvedDataSource> = state.datasources.iter().cloned().collect();
    success_many(data)
}

pub async fn read_default(State(state): State<AppState>, ctx: RequestContext) -> Result<impl IntoResponse, AppError> {
    report(&state, &ctx, DEFAULT_DATASOURCE)
}

/// Named datasources only; the default datasource is served by [`read_default`].
pub async fn read_named(State(state): State<AppState>, ctx: RequestContext) -> Result<impl IntoResponse, AppError> {
    let name = extract("name", &ctx).ok_or_else(|| AppError::BadRequest("missing datasource name".into()))?;
    if name == DEFAULT_DATASOURCE {
        return Err(AppError::NotFound(format!("datasource '{}'", name)));
    }
    report(&state, &ctx, name)
}

fn report(state: &AppState, ctx: &RequestContext, name: &str) -> Result<impl IntoResponse, AppError> {
    let ds = state
        .datasources
        .get(name)
        .ok_or_else(|| AppError::NotFound(format!("datasource '{}'", name)))?;
    if ctx.query_param("require").is_some_and(|v| v == "true") {
        state.datasources.require_db_kind(name)?;
    }
    Ok(success_one(ds.clone()))
}
