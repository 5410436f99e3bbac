//! Default db kinds registered by extensions, and how one is picked when none is configured.

use crate::datasource::{ArtifactKey, DatabaseKind, ScopeProvider, TEST_SCOPE};
use crate::error::ConfigError;
use once_cell::sync::OnceCell;

/// A db kind an extension offers as the default, e.g. a JDBC driver extension offering "postgresql".
///
/// The registering extension passes its own artifact key so the candidate can later be matched
/// against the dependency graph. The scope is computed on first use and cached for the life of
/// the candidate.
#[derive(Clone, Debug)]
pub struct DefaultDbKindCandidate {
    db_kind: String,
    origin: ArtifactKey,
    scope: OnceCell<String>,
}

impl DefaultDbKindCandidate {
    pub fn new(db_kind: impl Into<String>, origin: ArtifactKey) -> Self {
        DefaultDbKindCandidate {
            db_kind: db_kind.into(),
            origin,
            scope: OnceCell::new(),
        }
    }

    pub fn db_kind(&self) -> &str {
        &self.db_kind
    }

    pub fn origin(&self) -> &ArtifactKey {
        &self.origin
    }

    /// Dependency scope of the registering extension. The provider runs at most once per
    /// candidate even under concurrent first access; a failed lookup is not cached.
    pub fn scope(&self, scopes: &dyn ScopeProvider) -> Result<&str, ConfigError> {
        self.scope
            .get_or_try_init(|| scopes.scope_of(self))
            .map(String::as_str)
    }

    /// Cached scope, if it has been computed.
    pub fn cached_scope(&self) -> Option<&str> {
        self.scope.get().map(String::as_str)
    }
}

/// Pick the db kind for a datasource.
///
/// A configured value always wins (normalized). Without one, and with implicit resolution
/// enabled, a single candidate is used as-is; among several, the only test-scoped candidate
/// wins. Anything else yields `None` so later validation can report the missing db kind.
pub fn resolve(
    configured: Option<&str>,
    candidates: &[DefaultDbKindCandidate],
    implicit_resolution: bool,
    scopes: &dyn ScopeProvider,
) -> Result<Option<String>, ConfigError> {
    if let Some(configured) = configured {
        return Ok(Some(DatabaseKind::normalize(configured)));
    }
    if !implicit_resolution {
        return Ok(None);
    }
    resolve_implicit(candidates, scopes)
}

fn resolve_implicit(
    candidates: &[DefaultDbKindCandidate],
    scopes: &dyn ScopeProvider,
) -> Result<Option<String>, ConfigError> {
    match candidates {
        [] => Ok(None),
        [only] => Ok(Some(only.db_kind.clone())),
        _ => {
            // a lone test-scoped driver is assumed to be the default; tests often run on e.g. H2
            let mut test_scoped: Option<&DefaultDbKindCandidate> = None;
            for candidate in candidates {
                let scope = candidate.scope(scopes)?;
                tracing::debug!(db_kind = %candidate.db_kind, origin = %candidate.origin, scope, "default db kind candidate");
                if scope == TEST_SCOPE {
                    if test_scoped.is_some() {
                        tracing::warn!("several test-scoped default db kinds registered, none selected");
                        return Ok(None);
                    }
                    test_scoped = Some(candidate);
                }
            }
            if test_scoped.is_none() {
                tracing::warn!(
                    count = candidates.len(),
                    "several default db kinds registered and none is test-scoped, none selected"
                );
            }
            Ok(test_scoped.map(|c| c.db_kind.clone()))
        }
    }
}
