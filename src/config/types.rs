//! Raw datasource config as supplied by the user (JSON or environment).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name reported for the unnamed datasource.
pub const DEFAULT_DATASOURCE: &str = "<default>";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default)]
    pub db_kind: Option<String>,
    /// Let registered extension defaults pick the db kind when none is configured.
    /// Unset means enabled for the default datasource, disabled for named ones.
    #[serde(default)]
    pub implicit_resolution: Option<bool>,
}

impl DataSourceConfig {
    pub fn with_db_kind(db_kind: impl Into<String>) -> Self {
        DataSourceConfig {
            db_kind: Some(db_kind.into()),
            implicit_resolution: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourcesConfig {
    #[serde(default)]
    pub default: DataSourceConfig,
    #[serde(default)]
    pub named: BTreeMap<String, DataSourceConfig>,
}
