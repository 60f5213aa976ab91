//! Per-user, tier-aware admission control for validation requests
//!
//! The check and the increment are one atomic operation: the gate loads the
//! user's state, applies any calendar rollover, and conditionally commits
//! the incremented counter against the state it read. Two concurrent
//! requests from the same free-tier user with one slot remaining can never
//! both be admitted; the loser's commit conflicts and its retry observes
//! the exhausted counter.

pub mod store;

use chrono::{Datelike, NaiveDate, Utc};
use shared_types::{Role, Tier};
use thiserror::Error;
use tracing::{debug, warn};

pub use store::{CommitOutcome, MemoryQuotaStore, QuotaStore, QuotaStoreError};

/// Monthly validation allowance for the free tier
pub const FREE_TIER_MONTHLY_LIMIT: u32 = 5;

/// Bounded optimistic retries before reporting contention
const MAX_COMMIT_ATTEMPTS: u32 = 8;

/// Outcome of a quota consultation. Rejection is an outcome, not an error,
/// and carries what the boundary layer needs to render an upgrade prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaDecision {
    Admitted,
    Exceeded { tier: Tier, limit: u32, used: u32 },
}

impl QuotaDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, QuotaDecision::Admitted)
    }
}

#[derive(Debug, Error)]
pub enum QuotaError {
    #[error(transparent)]
    Store(#[from] QuotaStoreError),

    #[error("Quota commit contention persisted after {0} attempts")]
    ContentionExhausted(u32),
}

/// Admission gate over a conditional-write quota store
pub struct QuotaGate<S> {
    store: S,
}

impl<S: QuotaStore> QuotaGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check and consume one validation slot for the user
    pub fn check_and_consume(&self, user_id: &str) -> Result<QuotaDecision, QuotaError> {
        self.check_and_consume_at(user_id, Utc::now().date_naive())
    }

    /// Variant with an injected date
    pub fn check_and_consume_at(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<QuotaDecision, QuotaError> {
        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let prior = self.store.load(user_id)?;

            // Admins bypass quota accounting entirely
            if prior.role == Role::Admin {
                return Ok(QuotaDecision::Admitted);
            }

            // Calendar rollover folds into the same conditional commit;
            // the counter is zeroed exactly once per month, never
            // retroactively
            let mut next = prior.clone();
            if next.last_reset_month != today.month() || next.last_reset_year != today.year() {
                debug!(user_id, "Resetting monthly quota counter");
                next.validations_this_month = 0;
                next.last_reset_month = today.month();
                next.last_reset_year = today.year();
            }

            if next.tier == Tier::Free && next.validations_this_month >= FREE_TIER_MONTHLY_LIMIT {
                warn!(
                    user_id,
                    used = next.validations_this_month,
                    "Free-tier quota exceeded"
                );
                return Ok(QuotaDecision::Exceeded {
                    tier: next.tier,
                    limit: FREE_TIER_MONTHLY_LIMIT,
                    used: next.validations_this_month,
                });
            }

            // Unlimited tiers are never rejected but still record usage
            next.validations_this_month += 1;

            match self.store.commit(user_id, &next, &prior)? {
                CommitOutcome::Committed => return Ok(QuotaDecision::Admitted),
                CommitOutcome::Conflict => continue,
            }
        }

        Err(QuotaError::ContentionExhausted(MAX_COMMIT_ATTEMPTS))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::QuotaState;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    proptest! {
        /// Property: a fresh free-tier user gets exactly the limit, never more
        #[test]
        fn free_tier_admits_exactly_limit(requests in FREE_TIER_MONTHLY_LIMIT..40u32) {
            let store = MemoryQuotaStore::new();
            store.insert("user", QuotaState::new(Tier::Free, Role::User, today()));
            let gate = QuotaGate::new(store);

            let mut admitted = 0u32;
            for _ in 0..requests {
                if gate.check_and_consume_at("user", today()).unwrap().is_admitted() {
                    admitted += 1;
                }
            }
            prop_assert_eq!(admitted, FREE_TIER_MONTHLY_LIMIT);
        }

        /// Property: unlimited tiers are never rejected
        #[test]
        fn unlimited_tiers_always_admitted(
            requests in 1u32..30,
            start in 0u32..1000,
            professional in any::<bool>()
        ) {
            let tier = if professional { Tier::Professional } else { Tier::Enterprise };
            let store = MemoryQuotaStore::new();
            store.insert("user", QuotaState {
                validations_this_month: start,
                ..QuotaState::new(tier, Role::User, today())
            });
            let gate = QuotaGate::new(store);

            for _ in 0..requests {
                prop_assert!(gate.check_and_consume_at("user", today()).unwrap().is_admitted());
            }
            prop_assert_eq!(
                gate.store().load("user").unwrap().validations_this_month,
                start + requests
            );
        }

        /// Property: users are independent; exhausting one never affects another
        #[test]
        fn users_are_independent(exhaust in 0u32..10) {
            let store = MemoryQuotaStore::new();
            store.insert("first", QuotaState::new(Tier::Free, Role::User, today()));
            store.insert("second", QuotaState::new(Tier::Free, Role::User, today()));
            let gate = QuotaGate::new(store);

            for _ in 0..exhaust {
                let _ = gate.check_and_consume_at("first", today()).unwrap();
            }
            prop_assert!(gate.check_and_consume_at("second", today()).unwrap().is_admitted());
        }

        /// Property: the stored counter never exceeds the free-tier limit
        /// within a month
        #[test]
        fn counter_never_exceeds_limit(requests in 0u32..25) {
            let store = MemoryQuotaStore::new();
            store.insert("user", QuotaState::new(Tier::Free, Role::User, today()));
            let gate = QuotaGate::new(store);

            for _ in 0..requests {
                let _ = gate.check_and_consume_at("user", today()).unwrap();
            }
            prop_assert!(
                gate.store().load("user").unwrap().validations_this_month
                    <= FREE_TIER_MONTHLY_LIMIT
            );
        }
    }
}
