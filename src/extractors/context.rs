//! Per-request parameter sources, filled in by the router before any extractor runs.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::RawPathParamsRejection, FromRequestParts, Query, RawPathParams},
    http::{request::Parts, HeaderMap},
};
use serde_json::Value;
use std::collections::HashMap;

/// Built by hand or extracted from request parts in an axum handler. Parts carry no body, so an
/// extracted context has `body: None`; handlers that read the body attach it with [`RequestContext::with_body`].
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    /// Values bound by the matched route template, e.g. `id` for `/items/:id`.
    pub path_params: HashMap<String, String>,
    /// Query parameters in request order per name.
    pub query_params: HashMap<String, Vec<String>>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path_params = match RawPathParams::from_request_parts(parts, state).await {
            Ok(params) => params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            // not routed through a template (e.g. a fallback handler)
            Err(RawPathParamsRejection::MissingPathParams(_)) => HashMap::new(),
            Err(e) => return Err(AppError::BadRequest(e.body_text())),
        };

        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let mut query_params: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in pairs {
            query_params.entry(k).or_default().push(v);
        }

        Ok(RequestContext {
            path_params,
            query_params,
            headers: parts.headers.clone(),
            body: None,
        })
    }
}
