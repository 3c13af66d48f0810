//! Authorization error types.

use std::fmt;

/// Authorization errors.
///
/// Note that a denial is not an error: denials are ordinary [`Verdict`]
/// values. These variants cover the two fault classes around the check:
/// a misconfigured route (operator-facing, propagated loudly) and an
/// unreachable relationship store (resolved fail-closed by the gate).
///
/// [`Verdict`]: crate::Verdict
#[derive(Debug)]
pub enum AuthzError {
    /// The route parameter addressing the target resource is missing or
    /// does not parse as an activity ID. This indicates a policy wiring
    /// defect, not an authorization fact.
    RouteParameter {
        /// The expected parameter name.
        param: &'static str,
        /// Error details.
        details: String,
    },
    /// The attendance store could not serve the relationship lookup.
    StoreUnavailable {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for AuthzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouteParameter { param, details } => {
                write!(
                    f,
                    "route parameter '{}' unusable for host check: {}",
                    param, details
                )
            }
            Self::StoreUnavailable { details } => {
                write!(f, "attendance store unavailable: {}", details)
            }
        }
    }
}

impl std::error::Error for AuthzError {}
