//! The authorization gate wiring context, lookup, and decision together.

use crate::context::HostCheckContext;
use crate::decision::decide;
use crate::store::AttendanceStore;
use crate::types::Verdict;
use tracing::{debug, error, instrument};

/// Gates protected activity operations on the host relationship.
///
/// The gate runs as an awaited step inside the request, before the protected
/// handler. A denial is final for that request; there is no retry. The gate
/// never resolves to `Authorized` on incomplete evaluation: an unreachable
/// store, like an absent identity, denies.
pub struct HostGate<S> {
    store: S,
}

impl<S: AttendanceStore> HostGate<S> {
    /// Creates a gate over the given attendance store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs the host check for the given context.
    ///
    /// When the context carries no identity the store is not consulted at
    /// all. A store failure is logged distinctly from a denial so operators
    /// can tell infrastructure faults from policy outcomes, but the caller
    /// sees the same `Denied` verdict.
    #[instrument(skip(self, ctx), fields(activity = %ctx.activity_id))]
    pub async fn check(&self, ctx: &HostCheckContext) -> Verdict {
        let Some(user_id) = ctx.user_id else {
            debug!("no authenticated identity, denied without lookup");
            return Verdict::Denied;
        };

        let relationship = match self.store.lookup(user_id, ctx.activity_id).await {
            Ok(rel) => rel,
            Err(e) => {
                error!(error = %e, "attendance lookup failed, failing closed");
                return Verdict::Denied;
            }
        };

        let verdict = decide(true, relationship.as_ref());
        debug!(authorized = verdict.is_authorized(), "host check verdict");
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthzError;
    use crate::types::AttendanceRelationship;
    use async_trait::async_trait;
    use gatherly_core::{ActivityId, UserId};
    use rootcause::prelude::Report;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory attendance store. Lookups count so tests can assert the
    /// short-circuit behavior, and entries can be mutated between checks to
    /// exercise the freshness contract.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<(UserId, ActivityId), bool>>,
        lookups: AtomicUsize,
    }

    impl MemoryStore {
        fn set_host(&self, user_id: UserId, activity_id: ActivityId, is_host: bool) {
            self.records
                .lock()
                .expect("lock")
                .insert((user_id, activity_id), is_host);
        }

        fn remove(&self, user_id: UserId, activity_id: ActivityId) {
            self.records
                .lock()
                .expect("lock")
                .remove(&(user_id, activity_id));
        }

        fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AttendanceStore for MemoryStore {
        async fn lookup(
            &self,
            user_id: UserId,
            activity_id: ActivityId,
        ) -> Result<Option<AttendanceRelationship>, Report<AuthzError>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let records = self.records.lock().expect("lock");
            Ok(records
                .get(&(user_id, activity_id))
                .map(|&is_host| AttendanceRelationship::new(user_id, activity_id, is_host)))
        }
    }

    /// Store that always fails, standing in for an unreachable database.
    struct BrokenStore;

    #[async_trait]
    impl AttendanceStore for BrokenStore {
        async fn lookup(
            &self,
            _user_id: UserId,
            _activity_id: ActivityId,
        ) -> Result<Option<AttendanceRelationship>, Report<AuthzError>> {
            Err(AuthzError::StoreUnavailable {
                details: "connection refused".to_string(),
            }
            .into())
        }
    }

    fn ctx(user_id: Option<UserId>, activity_id: ActivityId) -> HostCheckContext {
        HostCheckContext {
            user_id,
            activity_id,
        }
    }

    #[tokio::test]
    async fn creator_is_authorized_to_edit() {
        let store = Arc::new(MemoryStore::default());
        let host = UserId::new();
        let activity = ActivityId::new();
        store.set_host(host, activity, true);

        let gate = HostGate::new(Arc::clone(&store));
        let verdict = gate.check(&ctx(Some(host), activity)).await;
        assert_eq!(verdict, Verdict::Authorized);
    }

    #[tokio::test]
    async fn stranger_is_denied() {
        let store = Arc::new(MemoryStore::default());
        let host = UserId::new();
        let activity = ActivityId::new();
        store.set_host(host, activity, true);

        let gate = HostGate::new(Arc::clone(&store));
        let verdict = gate.check(&ctx(Some(UserId::new()), activity)).await;
        assert_eq!(verdict, Verdict::Denied);
    }

    #[tokio::test]
    async fn non_host_attendee_is_denied() {
        let store = Arc::new(MemoryStore::default());
        let attendee = UserId::new();
        let activity = ActivityId::new();
        store.set_host(attendee, activity, false);

        let gate = HostGate::new(Arc::clone(&store));
        let verdict = gate.check(&ctx(Some(attendee), activity)).await;
        assert_eq!(verdict, Verdict::Denied);
    }

    #[tokio::test]
    async fn unauthenticated_caller_is_denied_without_lookup() {
        let store = Arc::new(MemoryStore::default());
        let host = UserId::new();
        let activity = ActivityId::new();
        store.set_host(host, activity, true);

        let gate = HostGate::new(Arc::clone(&store));
        let verdict = gate.check(&ctx(None, activity)).await;
        assert_eq!(verdict, Verdict::Denied);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_fails_closed() {
        let gate = HostGate::new(BrokenStore);
        let verdict = gate
            .check(&ctx(Some(UserId::new()), ActivityId::new()))
            .await;
        assert_eq!(verdict, Verdict::Denied);
    }

    #[tokio::test]
    async fn granted_host_status_is_observed_by_the_next_check() {
        let store = Arc::new(MemoryStore::default());
        let user = UserId::new();
        let activity = ActivityId::new();
        store.set_host(user, activity, false);

        let gate = HostGate::new(Arc::clone(&store));
        assert_eq!(gate.check(&ctx(Some(user), activity)).await, Verdict::Denied);

        store.set_host(user, activity, true);
        assert_eq!(
            gate.check(&ctx(Some(user), activity)).await,
            Verdict::Authorized
        );
    }

    #[tokio::test]
    async fn revoked_host_status_is_observed_by_the_next_check() {
        let store = Arc::new(MemoryStore::default());
        let user = UserId::new();
        let activity = ActivityId::new();
        store.set_host(user, activity, true);

        let gate = HostGate::new(Arc::clone(&store));
        assert_eq!(
            gate.check(&ctx(Some(user), activity)).await,
            Verdict::Authorized
        );

        store.remove(user, activity);
        assert_eq!(gate.check(&ctx(Some(user), activity)).await, Verdict::Denied);
    }
}
