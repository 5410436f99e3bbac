//! Load datasource config from JSON or environment, and resolve db kinds for every datasource.

use crate::config::resolved::{ResolvedDataSource, ResolvedDataSources};
use crate::config::types::*;
use crate::datasource::{self, DefaultDbKindCandidate, ScopeProvider};
use crate::error::ConfigError;
use std::collections::BTreeMap;

const ENV_PREFIX: &str = "DATASOURCE_";
const DB_KIND_KEY: &str = "DB_KIND";
const IMPLICIT_RESOLUTION_KEY: &str = "IMPLICIT_RESOLUTION";

impl DataSourcesConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DataSourcesConfig = serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate_names()?;
        Ok(config)
    }

    /// Named datasources may not take the name reserved for the default datasource.
    pub fn validate_names(&self) -> Result<(), ConfigError> {
        if self.named.contains_key(DEFAULT_DATASOURCE) {
            return Err(ConfigError::Load(format!(
                "datasource name '{}' is reserved for the default datasource",
                DEFAULT_DATASOURCE
            )));
        }
        Ok(())
    }

    /// Read `DATASOURCE_DB_KIND`, `DATASOURCE_IMPLICIT_RESOLUTION` and their named variants
    /// `DATASOURCE_<NAME>_DB_KIND` / `DATASOURCE_<NAME>_IMPLICIT_RESOLUTION` from the process env.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`DataSourcesConfig::from_env`] over an explicit set of variables.
    /// Datasource names are lower-cased; empty values are treated as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = DataSourcesConfig::default();
        for (key, value) in vars {
            let Some(rest) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let (name, setting) = match split_setting(rest) {
                Some(parsed) => parsed,
                None => {
                    tracing::debug!(key = %key.as_ref(), "ignoring unrecognized datasource variable");
                    continue;
                }
            };
            let target = match name {
                None => &mut config.default,
                Some(name) => config.named.entry(name.to_lowercase()).or_default(),
            };
            match setting {
                DB_KIND_KEY => target.db_kind = Some(value.to_string()),
                _ => target.implicit_resolution = Some(parse_bool(key.as_ref(), value)?),
            }
        }
        config.validate_names()?;
        Ok(config)
    }
}

/// Split `DB_KIND`, `IMPLICIT_RESOLUTION`, `<NAME>_DB_KIND` or `<NAME>_IMPLICIT_RESOLUTION`.
fn split_setting(rest: &str) -> Option<(Option<&str>, &'static str)> {
    for setting in [DB_KIND_KEY, IMPLICIT_RESOLUTION_KEY] {
        if rest == setting {
            return Some((None, setting));
        }
        if let Some(name) = rest.strip_suffix(setting).and_then(|n| n.strip_suffix('_')) {
            if !name.is_empty() {
                return Some((Some(name), setting));
            }
        }
    }
    None
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Load(format!("{}: expected a boolean, got '{}'", key, value))),
    }
}

/// Resolve the db kind of the default datasource and every named one.
pub fn resolve_all(
    config: &DataSourcesConfig,
    candidates: &[DefaultDbKindCandidate],
    scopes: &dyn ScopeProvider,
) -> Result<ResolvedDataSources, ConfigError> {
    config.validate_names()?;
    let mut datasources = BTreeMap::new();
    let entries = std::iter::once((DEFAULT_DATASOURCE, &config.default, true))
        .chain(config.named.iter().map(|(name, ds)| (name.as_str(), ds, false)));

    for (name, ds, is_default) in entries {
        let configured = ds.db_kind.as_deref().filter(|s| !s.trim().is_empty());
        let implicit_resolution = ds.implicit_resolution.unwrap_or(is_default);
        let db_kind = datasource::resolve(configured, candidates, implicit_resolution, scopes)?;
        let implicit = configured.is_none() && db_kind.is_some();
        match &db_kind {
            Some(kind) => tracing::info!(datasource = name, db_kind = %kind, implicit, "resolved db kind"),
            None => tracing::debug!(datasource = name, "no db kind resolved"),
        }
        datasources.insert(
            name.to_string(),
            ResolvedDataSource {
                name: name.to_string(),
                db_kind,
                implicit,
            },
        );
    }

    Ok(ResolvedDataSources { datasources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{AppDependency, ArtifactKey, DependencyModel};
    use rstest::{fixture, rstest};

    #[fixture]
    fn model() -> DependencyModel {
        DependencyModel::new(vec![
            AppDependency {
                group_id: "org.acme".into(),
                artifact_id: "jdbc-h2".into(),
                scope: "test".into(),
            },
            AppDependency {
                group_id: "org.acme".into(),
                artifact_id: "jdbc-postgresql".into(),
                scope: "compile".into(),
            },
        ])
    }

    #[fixture]
    fn candidates() -> Vec<DefaultDbKindCandidate> {
        vec![
            DefaultDbKindCandidate::new("postgresql", ArtifactKey::new("org.acme", "jdbc-postgresql")),
            DefaultDbKindCandidate::new("h2", ArtifactKey::new("org.acme", "jdbc-h2")),
        ]
    }

    #[rstest]
    fn test_from_json() {
        let config = DataSourcesConfig::from_json(
            r#"{"default": {"db_kind": "pg"}, "named": {"users": {"implicit_resolution": true}}}"#,
        )
        .unwrap();
        assert_eq!(config.default, DataSourceConfig::with_db_kind("pg"));
        assert_eq!(config.named["users"].implicit_resolution, Some(true));
        assert!(DataSourcesConfig::from_json("{}").unwrap().named.is_empty());
        assert!(matches!(DataSourcesConfig::from_json("[]"), Err(ConfigError::Load(_))));
    }

    #[rstest]
    fn test_from_vars() {
        let config = DataSourcesConfig::from_vars([
            ("DATASOURCE_DB_KIND", "postgres"),
            ("DATASOURCE_IMPLICIT_RESOLUTION", "false"),
            ("DATASOURCE_USERS_DB_KIND", "mysql"),
            ("DATASOURCE_REPORTS_IMPLICIT_RESOLUTION", "1"),
            ("DATASOURCE_EMPTY_DB_KIND", "  "),
            ("DATASOURCE_", "ignored"),
            ("HOME", "/root"),
        ])
        .unwrap();
        assert_eq!(config.default.db_kind.as_deref(), Some("postgres"));
        assert_eq!(config.default.implicit_resolution, Some(false));
        assert_eq!(config.named["users"].db_kind.as_deref(), Some("mysql"));
        assert_eq!(config.named["reports"].implicit_resolution, Some(true));
        assert!(!config.named.contains_key("empty"));
        assert_eq!(config.named.len(), 2);
    }

    #[rstest]
    fn test_from_json_rejects_reserved_name() {
        let err = DataSourcesConfig::from_json(
            r#"{"default": {"db_kind": "postgresql"}, "named": {"<default>": {"db_kind": "h2"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(ref msg) if msg.contains("<default>")));
    }

    #[rstest]
    fn test_from_vars_named_default_is_separate() {
        let config = DataSourcesConfig::from_vars([("DATASOURCE_DEFAULT_DB_KIND", "mysql"), ("DATASOURCE_DB_KIND", "h2")])
            .unwrap();
        assert_eq!(config.default.db_kind.as_deref(), Some("h2"));
        assert_eq!(config.named["default"].db_kind.as_deref(), Some("mysql"));
    }

    #[rstest]
    fn test_from_vars_rejects_bad_bool() {
        let err = DataSourcesConfig::from_vars([("DATASOURCE_IMPLICIT_RESOLUTION", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("DATASOURCE_IMPLICIT_RESOLUTION"));
    }

    #[rstest]
    fn test_resolve_all_defaults(model: DependencyModel, candidates: Vec<DefaultDbKindCandidate>) {
        let mut config = DataSourcesConfig::default();
        config.named.insert("users".into(), DataSourceConfig::default());
        config.named.insert("reports".into(), DataSourceConfig::with_db_kind("SQLServer"));

        let resolved = resolve_all(&config, &candidates, &model).unwrap();
        assert_eq!(resolved.default_db_kind(), Some("h2"));
        assert!(resolved.get(DEFAULT_DATASOURCE).unwrap().implicit);
        // named datasources do not pick up extension defaults unless asked to
        assert_eq!(resolved.db_kind("users"), None);
        assert!(matches!(
            resolved.require_db_kind("users"),
            Err(ConfigError::MissingDbKind(name)) if name == "users"
        ));
        assert_eq!(resolved.require_db_kind("reports").unwrap(), "mssql");
        assert!(!resolved.get("reports").unwrap().implicit);
        assert_eq!(resolved.iter().count(), 3);
    }

    #[rstest]
    fn test_resolve_all_explicit_flags(model: DependencyModel, candidates: Vec<DefaultDbKindCandidate>) {
        let mut config = DataSourcesConfig::default();
        config.default.implicit_resolution = Some(false);
        config.named.insert(
            "users".into(),
            DataSourceConfig {
                db_kind: None,
                implicit_resolution: Some(true),
            },
        );
        let resolved = resolve_all(&config, &candidates, &model).unwrap();
        assert_eq!(resolved.default_db_kind(), None);
        assert_eq!(resolved.db_kind("users"), Some("h2"));
    }

    #[rstest]
    fn test_resolve_all_blank_db_kind_counts_as_unset(model: DependencyModel, candidates: Vec<DefaultDbKindCandidate>) {
        let config = DataSourcesConfig {
            default: DataSourceConfig::with_db_kind(" "),
            named: Default::default(),
        };
        let resolved = resolve_all(&config, &candidates, &model).unwrap();
        assert_eq!(resolved.default_db_kind(), Some("h2"));
    }

    #[rstest]
    fn test_resolve_all_rejects_reserved_name(model: DependencyModel, candidates: Vec<DefaultDbKindCandidate>) {
        let mut config = DataSourcesConfig {
            default: DataSourceConfig::with_db_kind("postgresql"),
            named: Default::default(),
        };
        config.named.insert(DEFAULT_DATASOURCE.into(), DataSourceConfig::with_db_kind("h2"));
        let err = resolve_all(&config, &candidates, &model).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[rstest]
    fn test_resolve_all_propagates_scope_failure(candidates: Vec<DefaultDbKindCandidate>) {
        let err = resolve_all(&DataSourcesConfig::default(), &candidates, &DependencyModel::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ScopeResolution { .. }));
    }
}
