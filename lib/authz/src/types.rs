//! Types for host authorization checks.

use gatherly_core::{ActivityId, UserId};

/// The outcome of a host authorization check.
///
/// A verdict is derived per request and never persisted. Callers must not
/// distinguish the reasons behind a denial to the requester; all denials
/// surface as the same access-denied response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The caller is the host of the activity; the operation may proceed.
    Authorized,
    /// The caller is not the host (or could not be established as such).
    Denied,
}

impl Verdict {
    /// Returns true if the verdict permits the protected operation.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// The attendance relationship between a user and an activity.
///
/// At most one record exists per `(user_id, activity_id)` pair. The host flag
/// is set exactly once, for the creator, when the activity is created; the
/// authorization path never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRelationship {
    /// The attending user.
    pub user_id: UserId,
    /// The activity being attended.
    pub activity_id: ActivityId,
    /// Whether this attendee is the activity's host.
    pub is_host: bool,
}

impl AttendanceRelationship {
    /// Creates a new attendance relationship.
    #[must_use]
    pub fn new(user_id: UserId, activity_id: ActivityId, is_host: bool) -> Self {
        Self {
            user_id,
            activity_id,
            is_host,
        }
    }
}
