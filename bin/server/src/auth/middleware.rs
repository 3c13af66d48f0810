//! Authentication and host-authorization extractors for Axum.

use axum::{
    extract::{FromRef, FromRequestParts, RawPathParams},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use gatherly_authz::{HostCheckContext, HostGate, RESOURCE_ROUTE_PARAM, Verdict};
use gatherly_core::ActivityId;
use std::sync::Arc;

use super::{AppState, AuthenticatedUser, SESSION_COOKIE, db::SessionRepository};
use crate::db::{AttendanceRepository, UserRepository};

/// Extractor for requiring an authenticated user.
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::InternalError)?;

        // Get session ID from cookie
        let session_cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(AuthRejection::NotAuthenticated)?;

        // Look up session in database
        let session_repo = SessionRepository::new(app_state.db_pool.clone());
        let session = session_repo
            .find_by_id(session_cookie.value())
            .await
            .map_err(|_| AuthRejection::InternalError)?
            .ok_or(AuthRejection::NotAuthenticated)?;

        if session.is_expired() {
            // Delete the expired session
            let _ = session_repo.delete(&session.id).await;
            return Err(AuthRejection::SessionExpired);
        }

        // Load user from database
        let user_repo = UserRepository::new(app_state.db_pool.clone());
        let user = user_repo
            .find_by_id(session.user_id)
            .await
            .map_err(|_| AuthRejection::InternalError)?
            .ok_or(AuthRejection::NotAuthenticated)?;

        Ok(RequireAuth(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
        }))
    }
}

/// Extractor for optionally getting the authenticated user.
///
/// Returns None if the user is not authenticated.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
    SessionExpired,
    InternalError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated | Self::SessionExpired => {
                (StatusCode::UNAUTHORIZED, "Not authenticated").into_response()
            }
            Self::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Extractor requiring the caller to be the host of the activity addressed
/// by the route's `id` parameter.
///
/// Routes using this extractor short-circuit with a uniform 403 before their
/// handler runs unless the host relationship is established. The response
/// carries no reason: an unauthenticated caller, a stranger, and a non-host
/// attendee all see the same denial.
pub struct RequireHost {
    /// The authenticated host.
    pub user: AuthenticatedUser,
    /// The activity the caller is host of.
    pub activity_id: ActivityId,
}

impl<S> FromRequestParts<S> for RequireHost
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = HostRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);

        let OptionalAuth(user) = OptionalAuth::from_request_parts(parts, state)
            .await
            .map_err(|never| match never {})?;

        // A route mounted without the id parameter cannot be host-checked;
        // that's a wiring defect, not a denial.
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "host-gated route has no usable path parameters");
                HostRejection::Misconfigured
            })?;
        let route_id = params
            .iter()
            .find(|(name, _)| *name == RESOURCE_ROUTE_PARAM)
            .map(|(_, value)| value);

        let subject = user.as_ref().map(|u| u.user_id.to_string());
        let ctx = HostCheckContext::extract(subject.as_deref(), route_id).map_err(|e| {
            tracing::error!(error = %e, "host check misconfigured");
            HostRejection::Misconfigured
        })?;

        let gate = HostGate::new(AttendanceRepository::new(app_state.db_pool.clone()));
        match (gate.check(&ctx).await, user) {
            (Verdict::Authorized, Some(user)) => Ok(RequireHost {
                user,
                activity_id: ctx.activity_id,
            }),
            _ => Err(HostRejection::Forbidden),
        }
    }
}

/// Rejection type for the host extractor.
#[derive(Debug)]
pub enum HostRejection {
    /// The caller does not hold the host relationship. Uniform, reason-free.
    Forbidden,
    /// The route is miswired for the host policy (missing or unparseable
    /// `id` parameter). Already logged at error level where detected.
    Misconfigured,
}

impl IntoResponse for HostRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Forbidden => (StatusCode::FORBIDDEN, "Access denied").into_response(),
            Self::Misconfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
