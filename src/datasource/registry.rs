//! Collects default db kind candidates registered by extensions during a build.

use crate::datasource::DefaultDbKindCandidate;
use std::sync::{Mutex, PoisonError};

/// Append-only candidate collection. Extensions may register concurrently; the
/// datasource processor drains it once, in registration order.
#[derive(Debug, Default)]
pub struct DefaultDbKindRegistry {
    candidates: Mutex<Vec<DefaultDbKindCandidate>>,
}

impl DefaultDbKindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, candidate: DefaultDbKindCandidate) {
        tracing::debug!(db_kind = %candidate.db_kind(), origin = %candidate.origin(), "default db kind registered");
        self.candidates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(candidate);
    }

    pub fn len(&self) -> usize {
        self.candidates.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_candidates(self) -> Vec<DefaultDbKindCandidate> {
        self.candidates.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
