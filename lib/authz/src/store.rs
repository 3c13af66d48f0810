//! Read-only access to attendance relationships.

use crate::error::AuthzError;
use crate::types::AttendanceRelationship;
use async_trait::async_trait;
use gatherly_core::{ActivityId, UserId};
use rootcause::prelude::Report;

/// Read-only lookup of the attendance relationship for a `(user, activity)`
/// pair.
///
/// # Freshness contract
///
/// A verdict derived from this lookup gates a mutation of the same activity,
/// so the read must reflect every committed change to the pair's host flag.
/// Implementations must either read within the same consistency scope as the
/// protected operation (a direct query against the store of record) or
/// invalidate any cached entry for the pair synchronously when its host flag
/// changes. A cache refreshed on a schedule, or never, violates this contract.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Returns the attendance relationship for the pair, or `None` if the
    /// user is not attending the activity. Absence is an expected outcome,
    /// not an error.
    async fn lookup(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<Option<AttendanceRelationship>, Report<AuthzError>>;
}

#[async_trait]
impl<S: AttendanceStore> AttendanceStore for std::sync::Arc<S> {
    async fn lookup(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<Option<AttendanceRelationship>, Report<AuthzError>> {
        (**self).lookup(user_id, activity_id).await
    }
}
