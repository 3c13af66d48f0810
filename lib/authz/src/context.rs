//! Extraction of the host-check context from request data.

use crate::error::AuthzError;
use gatherly_core::{ActivityId, UserId};
use rootcause::prelude::Report;
use std::str::FromStr;
use tracing::warn;

/// The route parameter that addresses the target activity on protected routes.
pub const RESOURCE_ROUTE_PARAM: &str = "id";

/// The inputs a host authorization check operates on: who is asking, and
/// which activity they are asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCheckContext {
    /// The authenticated caller, if any. `None` always leads to a denial.
    pub user_id: Option<UserId>,
    /// The activity addressed by the request.
    pub activity_id: ActivityId,
}

impl HostCheckContext {
    /// Extracts a check context from the caller's subject claim and the raw
    /// value of the [`RESOURCE_ROUTE_PARAM`] route parameter.
    ///
    /// An absent subject is not an error: unauthenticated callers flow
    /// through to a denial. A subject that fails to parse is treated the
    /// same way, since it cannot correspond to any attendance record.
    ///
    /// A missing or unparseable route parameter is a configuration fault:
    /// the route is miswired for this policy. It propagates as
    /// [`AuthzError::RouteParameter`] rather than resolving to a denial, so
    /// operators can distinguish wiring defects from legitimate denials.
    pub fn extract(
        subject: Option<&str>,
        route_id: Option<&str>,
    ) -> Result<Self, Report<AuthzError>> {
        let user_id = match subject {
            Some(raw) => match UserId::from_str(raw) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(error = %e, "subject claim does not parse as a user id");
                    None
                }
            },
            None => None,
        };

        let raw = route_id.ok_or_else(|| AuthzError::RouteParameter {
            param: RESOURCE_ROUTE_PARAM,
            details: "parameter missing from route".to_string(),
        })?;
        let activity_id = ActivityId::from_str(raw).map_err(|e| AuthzError::RouteParameter {
            param: RESOURCE_ROUTE_PARAM,
            details: e.to_string(),
        })?;

        Ok(Self {
            user_id,
            activity_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identity_and_activity() {
        let user = UserId::new();
        let activity = ActivityId::new();
        let ctx = HostCheckContext::extract(
            Some(&user.to_string()),
            Some(&activity.to_string()),
        )
        .expect("should extract");
        assert_eq!(ctx.user_id, Some(user));
        assert_eq!(ctx.activity_id, activity);
    }

    #[test]
    fn absent_subject_yields_no_identity() {
        let activity = ActivityId::new();
        let ctx = HostCheckContext::extract(None, Some(&activity.to_string()))
            .expect("should extract");
        assert_eq!(ctx.user_id, None);
    }

    #[test]
    fn malformed_subject_yields_no_identity() {
        let activity = ActivityId::new();
        let ctx = HostCheckContext::extract(Some("not-an-id"), Some(&activity.to_string()))
            .expect("should extract");
        assert_eq!(ctx.user_id, None);
    }

    #[test]
    fn missing_route_parameter_is_a_fault() {
        let user = UserId::new();
        let result = HostCheckContext::extract(Some(&user.to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_route_parameter_is_a_fault() {
        let user = UserId::new();
        let result =
            HostCheckContext::extract(Some(&user.to_string()), Some("not-a-valid-activity-id"));
        assert!(result.is_err());
    }
}
