//! Datasource SDK: default database kinds contributed by extensions, and request parameter extraction.

pub mod config;
pub mod datasource;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{resolve_all, DataSourceConfig, DataSourcesConfig, ResolvedDataSource, ResolvedDataSources, DEFAULT_DATASOURCE};
pub use datasource::{
    resolve, AppDependency, ArtifactKey, DatabaseKind, DefaultDbKindCandidate, DefaultDbKindRegistry, DependencyModel,
    ScopeProvider, TEST_SCOPE,
};
pub use error::{AppError, ConfigError};
pub use extractors::{
    extract, BodyExtractor, HeaderParamExtractor, ParamSource, ParamValue, ParameterExtractor, PathParamExtractor,
    QueryParamExtractor, RequestContext,
};
pub use response::{success_many, success_one};
pub use routes::{common_routes, datasource_routes};
pub use state::AppState;
