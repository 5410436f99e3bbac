//! Database kind identifiers and alias normalization.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known database kinds. Extensions may still register kinds outside this list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Db2,
    Derby,
    H2,
    Mariadb,
    Mssql,
    Mysql,
    Oracle,
    Postgresql,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 8] = [
        DatabaseKind::Db2,
        DatabaseKind::Derby,
        DatabaseKind::H2,
        DatabaseKind::Mariadb,
        DatabaseKind::Mssql,
        DatabaseKind::Mysql,
        DatabaseKind::Oracle,
        DatabaseKind::Postgresql,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Db2 => "db2",
            DatabaseKind::Derby => "derby",
            DatabaseKind::H2 => "h2",
            DatabaseKind::Mariadb => "mariadb",
            DatabaseKind::Mssql => "mssql",
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Oracle => "oracle",
            DatabaseKind::Postgresql => "postgresql",
        }
    }

    /// Alternate spellings accepted for this kind (already lower-case).
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            DatabaseKind::Db2 => &["ibmdb2"],
            DatabaseKind::Derby => &["apachederby"],
            DatabaseKind::Mssql => &["sqlserver", "microsoftsqlserver"],
            DatabaseKind::Postgresql => &["pgsql", "pg", "postgres"],
            DatabaseKind::H2 | DatabaseKind::Mariadb | DatabaseKind::Mysql | DatabaseKind::Oracle => &[],
        }
    }

    /// Canonical kind for an already lower-cased identifier or alias.
    fn lookup(lower: &str) -> Option<DatabaseKind> {
        DatabaseKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower || k.aliases().contains(&lower))
    }

    /// Canonical identifier for a user-supplied db kind.
    /// e.g. "PostgreSQL" -> "postgresql", "pg" -> "postgresql", "sqlserver" -> "mssql".
    /// Unknown kinds are returned trimmed and lower-cased.
    pub fn normalize(db_kind: &str) -> String {
        let lower = db_kind.trim().to_lowercase();
        match DatabaseKind::lookup(&lower) {
            Some(kind) => kind.as_str().to_string(),
            None => lower,
        }
    }

    /// Whether two identifiers name the same database kind after normalization.
    pub fn is(db_kind: &str, other: &str) -> bool {
        DatabaseKind::normalize(db_kind) == DatabaseKind::normalize(other)
    }
}

impl std::str::FromStr for DatabaseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatabaseKind::lookup(&s.trim().to_lowercase()).ok_or_else(|| ConfigError::UnknownDbKind(s.to_string()))
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
