//! Domain error types for server operations.
//!
//! Each variant converts into a user-safe HTTP response; internal details
//! stay in the logs. Authorization denials are not represented here: they
//! surface through the `RequireHost` extractor's rejection so every denial
//! produces the same response regardless of cause.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Activity-related errors.
#[derive(Debug)]
pub enum ActivityError {
    /// Activity was not found.
    NotFound { id: String },
    /// Invalid activity ID format.
    InvalidId { id: String, reason: String },
    /// The host tried to leave their own activity.
    HostCannotLeave { id: String },
    /// Database error while accessing activities.
    DatabaseError { details: String },
}

impl fmt::Display for ActivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "activity '{}' not found", id),
            Self::InvalidId { id, reason } => {
                write!(f, "invalid activity id '{}': {}", id, reason)
            }
            Self::HostCannotLeave { id } => {
                write!(f, "host cannot leave activity '{}'", id)
            }
            Self::DatabaseError { details } => {
                write!(f, "activity database error: {}", details)
            }
        }
    }
}

impl std::error::Error for ActivityError {}

impl From<sqlx::Error> for ActivityError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError {
            details: e.to_string(),
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "Activity not found").into_response(),
            Self::InvalidId { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid activity ID").into_response()
            }
            Self::HostCannotLeave { .. } => {
                (StatusCode::BAD_REQUEST, "The host cannot leave their own activity")
                    .into_response()
            }
            Self::DatabaseError { .. } => {
                tracing::error!(error = %self, "activity request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}

/// Profile-related errors.
#[derive(Debug)]
pub enum ProfileError {
    /// Profile was not found.
    NotFound { username: String },
    /// Database error while accessing profiles.
    DatabaseError { details: String },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { username } => write!(f, "profile '{}' not found", username),
            Self::DatabaseError { details } => {
                write!(f, "profile database error: {}", details)
            }
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<sqlx::Error> for ProfileError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError {
            details: e.to_string(),
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
            Self::DatabaseError { .. } => {
                tracing::error!(error = %self, "profile request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_error_display() {
        let err = ActivityError::NotFound {
            id: "act_123".to_string(),
        };
        assert_eq!(err.to_string(), "activity 'act_123' not found");
    }

    #[test]
    fn host_cannot_leave_display() {
        let err = ActivityError::HostCannotLeave {
            id: "act_123".to_string(),
        };
        assert_eq!(err.to_string(), "host cannot leave activity 'act_123'");
    }
}
