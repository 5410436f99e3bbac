//! Application dependency graph: artifact coordinates and their scopes.

use crate::datasource::DefaultDbKindCandidate;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dependency scope used by the implicit db kind tie-break.
pub const TEST_SCOPE: &str = "test";

/// Identity of an extension artifact (group id + artifact id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactKey {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        ArtifactKey {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Looks up the dependency scope of the extension that registered a candidate.
pub trait ScopeProvider {
    fn scope_of(&self, candidate: &DefaultDbKindCandidate) -> Result<String, ConfigError>;
}

/// One deployment dependency of the application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppDependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "compile".into()
}

/// Full set of deployment dependencies, indexed by artifact key.
#[derive(Clone, Debug, Default)]
pub struct DependencyModel {
    scopes: HashMap<ArtifactKey, String>,
}

impl DependencyModel {
    pub fn new(deps: impl IntoIterator<Item = AppDependency>) -> Self {
        let mut scopes = HashMap::new();
        for dep in deps {
            // first declaration wins, like a resolved dependency tree
            scopes
                .entry(ArtifactKey::new(dep.group_id, dep.artifact_id))
                .or_insert(dep.scope);
        }
        DependencyModel { scopes }
    }

    /// Parse a JSON array of `{ "group_id", "artifact_id", "scope" }` objects.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let deps: Vec<AppDependency> = serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
        Ok(DependencyModel::new(deps))
    }

    pub fn scope(&self, key: &ArtifactKey) -> Option<&str> {
        self.scopes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl ScopeProvider for DependencyModel {
    fn scope_of(&self, candidate: &DefaultDbKindCandidate) -> Result<String, ConfigError> {
        let origin = candidate.origin();
        self.scope(origin)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::ScopeResolution {
                db_kind: candidate.db_kind().to_string(),
                group_id: origin.group_id.clone(),
                artifact_id: origin.artifact_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_from_json_defaults_scope_to_compile() {
        let model = DependencyModel::from_json(
            r#"[
                {"group_id": "org.acme", "artifact_id": "jdbc-h2", "scope": "test"},
                {"group_id": "org.acme", "artifact_id": "jdbc-postgresql"}
            ]"#,
        )
        .unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.scope(&ArtifactKey::new("org.acme", "jdbc-h2")), Some("test"));
        assert_eq!(model.scope(&ArtifactKey::new("org.acme", "jdbc-postgresql")), Some("compile"));
    }

    #[rstest]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(DependencyModel::from_json("{"), Err(ConfigError::Load(_))));
    }

    #[rstest]
    fn test_scope_of_unknown_origin_fails() {
        let model = DependencyModel::default();
        let candidate = DefaultDbKindCandidate::new("h2", ArtifactKey::new("org.acme", "jdbc-h2"));
        let err = model.scope_of(&candidate).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ScopeResolution { ref db_kind, ref artifact_id, .. }
                if db_kind == "h2" && artifact_id == "jdbc-h2"
        ));
        assert!(err.to_string().contains("org.acme:jdbc-h2"));
    }
}
