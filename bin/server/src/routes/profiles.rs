//! Profile route handlers.

use crate::auth::AppState;
use crate::db::UserRepository;
use crate::error::ProfileError;
use axum::{
    Json,
    extract::{Path, State},
};
use gatherly_activities::projection::ProfileDto;
use std::sync::Arc;

/// `GET /profiles/{username}`
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileDto>, ProfileError> {
    let repo = UserRepository::new(state.db_pool.clone());
    let profile = repo
        .find_profile_by_username(&username)
        .await?
        .ok_or(ProfileError::NotFound { username })?;
    Ok(Json(ProfileDto::project(&profile)))
}
