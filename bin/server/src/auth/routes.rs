//! Session lifecycle routes.
//!
//! Login happens upstream in the identity provider integration; the server
//! only terminates sessions.

use super::{AppState, SESSION_COOKIE, db::SessionRepository};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use std::sync::Arc;

/// Logout: delete the session row and clear the cookie.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let session_repo = SessionRepository::new(state.db_pool.clone());
    if let Err(e) = session_repo.delete(cookie.value()).await {
        tracing::warn!(error = %e, "failed to delete session on logout");
    }

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    (jar, StatusCode::NO_CONTENT).into_response()
}
