//! Router assembly.

use crate::auth::{self, AppState};
use crate::routes::{activities, profiles};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/activities",
            get(activities::list).post(activities::create),
        )
        .route(
            "/activities/{id}",
            get(activities::get_one)
                .put(activities::edit)
                .delete(activities::remove),
        )
        .route("/activities/{id}/cancel", post(activities::cancel))
        .route(
            "/activities/{id}/attend",
            post(activities::attend).delete(activities::unattend),
        )
        .route("/profiles/{username}", get(profiles::get_profile))
        .route("/auth/logout", get(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
