//! Request parameter extractors: one per parameter source, all reading from a [`RequestContext`].

mod context;

pub use context::RequestContext;

use serde_json::Value;
use std::fmt;

/// A parameter value borrowed from the request context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue<'a> {
    Text(&'a str),
    Json(&'a Value),
}

impl<'a> ParamValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Json(Value::String(s)) => Some(s.as_str()),
            ParamValue::Json(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match *self {
            ParamValue::Text(s) => Value::String(s.to_string()),
            ParamValue::Json(v) => v.clone(),
        }
    }
}

/// Pulls one handler parameter out of the request context.
pub trait ParameterExtractor: fmt::Debug + Send + Sync {
    /// `None` when the source does not carry the parameter; callers decide whether that is acceptable.
    fn extract_parameter<'a>(&self, ctx: &'a RequestContext) -> Option<ParamValue<'a>>;
}

/// Value of the path parameter `name` bound by the route matcher.
pub fn extract<'a>(name: &str, ctx: &'a RequestContext) -> Option<&'a str> {
    ctx.path_param(name)
}

#[derive(Clone, Debug)]
pub struct PathParamExtractor {
    name: String,
}

impl PathParamExtractor {
    pub fn new(name: impl Into<String>) -> Self {
        PathParamExtractor { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ParameterExtractor for PathParamExtractor {
    fn extract_parameter<'a>(&self, ctx: &'a RequestContext) -> Option<ParamValue<'a>> {
        extract(&self.name, ctx).map(ParamValue::Text)
    }
}

#[derive(Clone, Debug)]
pub struct QueryParamExtractor {
    name: String,
}

impl QueryParamExtractor {
    pub fn new(name: impl Into<String>) -> Self {
        QueryParamExtractor { name: name.into() }
    }
}

impl ParameterExtractor for QueryParamExtractor {
    fn extract_parameter<'a>(&self, ctx: &'a RequestContext) -> Option<ParamValue<'a>> {
        ctx.query_param(&self.name).map(ParamValue::Text)
    }
}

/// Header lookup is case-insensitive; values that are not visible ASCII are treated as absent.
#[derive(Clone, Debug)]
pub struct HeaderParamExtractor {
    name: String,
}

impl HeaderParamExtractor {
    pub fn new(name: impl Into<String>) -> Self {
        HeaderParamExtractor { name: name.into() }
    }
}

impl ParameterExtractor for HeaderParamExtractor {
    fn extract_parameter<'a>(&self, ctx: &'a RequestContext) -> Option<ParamValue<'a>> {
        ctx.headers
            .get(self.name.as_str())
            .and_then(|v| v.to_str().ok())
            .map(ParamValue::Text)
    }
}

/// The whole JSON request body.
#[derive(Clone, Debug, Default)]
pub struct BodyExtractor;

impl ParameterExtractor for BodyExtractor {
    fn extract_parameter<'a>(&self, ctx: &'a RequestContext) -> Option<ParamValue<'a>> {
        ctx.body.as_ref().map(ParamValue::Json)
    }
}

/// Where a handler parameter comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSource {
    Path,
    Query,
    Header,
    Body,
}

impl ParamSource {
    /// Extractor for parameter `name` from this source. `Body` ignores the name.
    pub fn extractor(self, name: &str) -> Box<dyn ParameterExtractor> {
        match self {
            ParamSource::Path => Box::new(PathParamExtractor::new(name)),
            ParamSource::Query => Box::new(QueryParamExtractor::new(name)),
            ParamSource::Header => Box::new(HeaderParamExtractor::new(name)),
            ParamSource::Body => Box::new(BodyExtractor),
        }
    }
}
