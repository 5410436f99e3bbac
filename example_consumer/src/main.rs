//! Example consumer: registers the defaults two driver extensions would contribute, resolves
//! datasources from the environment, and serves the result.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `DATASOURCE_DB_KIND` (or `DATASOURCE_<NAME>_DB_KIND`) to override the implicit default.

use axum::Router;
use datasource_sdk::{
    common_routes, datasource_routes, resolve_all, AppState, ArtifactKey, DataSourcesConfig,
    DefaultDbKindCandidate, DefaultDbKindRegistry, DependencyModel,
};
use std::thread;
use tokio::net::TcpListener;

const DEPENDENCIES: &str = r#"[
    {"group_id": "org.acme", "artifact_id": "jdbc-postgresql", "scope": "compile"},
    {"group_id": "org.acme", "artifact_id": "jdbc-h2", "scope": "test"}
]"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("datasource_sdk=info,example_consumer=info")),
        )
        .init();

    let dependencies = match std::env::var("DEPENDENCIES_PATH") {
        Ok(path) => DependencyModel::from_json(&tokio::fs::read_to_string(path).await?)?,
        Err(_) => DependencyModel::from_json(DEPENDENCIES)?,
    };
    // each driver extension registers its default from its own build step
    let registry = DefaultDbKindRegistry::new();
    thread::scope(|s| {
        for (db_kind, artifact_id) in [("postgresql", "jdbc-postgresql"), ("h2", "jdbc-h2")] {
            let registry = &registry;
            s.spawn(move || {
                registry.register(DefaultDbKindCandidate::new(db_kind, ArtifactKey::new("org.acme", artifact_id)));
            });
        }
    });
    tracing::info!(candidates = registry.len(), dependencies = dependencies.len(), "extensions registered");
    let candidates = registry.into_candidates();

    let config = DataSourcesConfig::from_env()?;
    let resolved = resolve_all(&config, &candidates, &dependencies)?;
    for ds in resolved.iter() {
        match &ds.db_kind {
            Some(kind) => tracing::info!(datasource = %ds.name, db_kind = %kind, implicit = ds.implicit, "datasource ready"),
            None => tracing::warn!(datasource = %ds.name, "no db kind configured"),
        }
    }

    let app = Router::new()
        .merge(common_routes())
        .nest("/api/v1", datasource_routes(AppState::new(resolved)));

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    let port = listener.local_addr()?.port();
    tracing::info!("Example consumer listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
