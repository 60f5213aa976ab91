//! Conditional-write quota storage
//!
//! The gate's atomicity rests entirely on `commit` being conditional on the
//! expected prior state: a stale writer observes `Conflict`, reloads, and
//! retries. Any backing store that can compare-and-swap a record satisfies
//! the contract; `MemoryQuotaStore` is the in-process reference used by the
//! gate's own tests and by single-node deployments.

use std::collections::HashMap;
use std::sync::Mutex;

use shared_types::QuotaState;
use thiserror::Error;

/// Outcome of a conditional commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The stored state no longer matches the expected prior state
    Conflict,
}

#[derive(Debug, Error)]
pub enum QuotaStoreError {
    #[error("No quota state for user: {0}")]
    UnknownUser(String),

    #[error("Quota storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable per-user quota storage with a conditional-write primitive
pub trait QuotaStore: Send + Sync {
    fn load(&self, user_id: &str) -> Result<QuotaState, QuotaStoreError>;

    /// Write `next` iff the stored state still equals `expected`
    fn commit(
        &self,
        user_id: &str,
        next: &QuotaState,
        expected: &QuotaState,
    ) -> Result<CommitOutcome, QuotaStoreError>;
}

/// In-memory reference store backed by a mutex-guarded map
#[derive(Debug, Default)]
pub struct MemoryQuotaStore {
    states: Mutex<HashMap<String, QuotaState>>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's state, replacing any existing record
    pub fn insert(&self, user_id: &str, state: QuotaState) {
        self.states
            .lock()
            .expect("quota store mutex poisoned")
            .insert(user_id.to_string(), state);
    }
}

impl QuotaStore for MemoryQuotaStore {
    fn load(&self, user_id: &str) -> Result<QuotaState, QuotaStoreError> {
        self.states
            .lock()
            .expect("quota store mutex poisoned")
            .get(user_id)
            .cloned()
            .ok_or_else(|| QuotaStoreError::UnknownUser(user_id.to_string()))
    }

    fn commit(
        &self,
        user_id: &str,
        next: &QuotaState,
        expected: &QuotaState,
    ) -> Result<CommitOutcome, QuotaStoreError> {
        let mut states = self.states.lock().expect("quota store mutex poisoned");
        let current = states
            .get(user_id)
            .ok_or_else(|| QuotaStoreError::UnknownUser(user_id.to_string()))?;

        if current != expected {
            return Ok(CommitOutcome::Conflict);
        }
        states.insert(user_id.to_string(), next.clone());
        Ok(CommitOutcome::Committed)
    }
}
