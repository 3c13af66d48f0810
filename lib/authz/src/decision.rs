//! The host authorization decision.

use crate::types::{AttendanceRelationship, Verdict};

/// Decides whether the caller holds the host relationship to an activity.
///
/// This is a pure function of its inputs: no identity, no relationship, or a
/// non-host relationship all deny; only a relationship with the host flag set
/// authorizes. Nothing else affects the outcome.
#[must_use]
pub fn decide(identity_present: bool, relationship: Option<&AttendanceRelationship>) -> Verdict {
    if !identity_present {
        return Verdict::Denied;
    }
    match relationship {
        Some(rel) if rel.is_host => Verdict::Authorized,
        Some(_) | None => Verdict::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatherly_core::{ActivityId, UserId};

    fn relationship(is_host: bool) -> AttendanceRelationship {
        AttendanceRelationship::new(UserId::new(), ActivityId::new(), is_host)
    }

    #[test]
    fn no_identity_denies() {
        assert_eq!(decide(false, None), Verdict::Denied);
        assert_eq!(decide(false, Some(&relationship(true))), Verdict::Denied);
    }

    #[test]
    fn no_relationship_denies() {
        assert_eq!(decide(true, None), Verdict::Denied);
    }

    #[test]
    fn non_host_relationship_denies() {
        assert_eq!(decide(true, Some(&relationship(false))), Verdict::Denied);
    }

    #[test]
    fn host_relationship_authorizes() {
        assert_eq!(decide(true, Some(&relationship(true))), Verdict::Authorized);
    }

    #[test]
    fn identical_inputs_yield_identical_verdicts() {
        let rel = relationship(true);
        let first = decide(true, Some(&rel));
        for _ in 0..10 {
            assert_eq!(decide(true, Some(&rel)), first);
        }
    }
}
