//! Resolved datasources: the db kind chosen for every configured datasource.

use crate::config::DEFAULT_DATASOURCE;
use crate::error::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedDataSource {
    pub name: String,
    /// `None` when nothing was configured and no default could be picked.
    pub db_kind: Option<String>,
    /// Whether the db kind came from a registered extension default rather than config.
    pub implicit: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ResolvedDataSources {
    pub datasources: BTreeMap<String, ResolvedDataSource>,
}

impl ResolvedDataSources {
    pub fn get(&self, name: &str) -> Option<&ResolvedDataSource> {
        self.datasources.get(name)
    }

    pub fn db_kind(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|ds| ds.db_kind.as_deref())
    }

    pub fn default_db_kind(&self) -> Option<&str> {
        self.db_kind(DEFAULT_DATASOURCE)
    }

    /// Db kind for a datasource that must have one.
    pub fn require_db_kind(&self, name: &str) -> Result<&str, ConfigError> {
        self.db_kind(name)
            .ok_or_else(|| ConfigError::MissingDbKind(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDataSource> {
        self.datasources.values()
    }
}
