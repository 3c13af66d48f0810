//! Activity route handlers.
//!
//! Reads are open; creating requires authentication; edit, delete, and
//! cancel require the host relationship and are gated by [`RequireHost`]
//! before these handlers run.

use crate::auth::{AppState, RequireAuth, RequireHost};
use crate::db::{ActivityRecord, ActivityRepository, AttendanceRepository};
use crate::error::ActivityError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use gatherly_activities::projection::ActivityDto;
use gatherly_core::ActivityId;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Request body for creating or editing an activity.
#[derive(Debug, Deserialize)]
pub struct ActivityInput {
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    pub city: String,
    pub venue: String,
}

fn parse_id(raw: &str) -> Result<ActivityId, ActivityError> {
    ActivityId::from_str(raw).map_err(|e| ActivityError::InvalidId {
        id: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `GET /activities`
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActivityDto>>, ActivityError> {
    let repo = ActivityRepository::new(state.db_pool.clone());
    let activities = repo.list().await?;
    Ok(Json(activities.iter().map(ActivityDto::project).collect()))
}

/// `GET /activities/{id}`
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivityDto>, ActivityError> {
    let id = parse_id(&id)?;
    let repo = ActivityRepository::new(state.db_pool.clone());
    let activity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ActivityError::NotFound { id: id.to_string() })?;
    Ok(Json(ActivityDto::project(&activity)))
}

/// `POST /activities`
///
/// The creator becomes the host: the activity and its host attendance
/// record are written in one transaction.
pub async fn create(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<ActivityInput>,
) -> Result<(StatusCode, Json<ActivityDto>), ActivityError> {
    let record = ActivityRecord::new(
        input.title,
        input.date,
        input.description,
        input.category,
        input.city,
        input.venue,
    );

    let repo = ActivityRepository::new(state.db_pool.clone());
    repo.create(&record, user.user_id).await?;
    tracing::info!(activity = %record.id, host = %user.user_id, "activity created");

    let activity = repo
        .find_by_id(record.id)
        .await?
        .ok_or_else(|| ActivityError::NotFound {
            id: record.id.to_string(),
        })?;
    Ok((StatusCode::CREATED, Json(ActivityDto::project(&activity))))
}

/// `PUT /activities/{id}` (host only)
pub async fn edit(
    State(state): State<Arc<AppState>>,
    host: RequireHost,
    Json(input): Json<ActivityInput>,
) -> Result<Json<ActivityDto>, ActivityError> {
    let repo = ActivityRepository::new(state.db_pool.clone());
    let mut record =
        repo.find_record(host.activity_id)
            .await?
            .ok_or_else(|| ActivityError::NotFound {
                id: host.activity_id.to_string(),
            })?;

    record.apply_edit(
        input.title,
        input.date,
        input.description,
        input.category,
        input.city,
        input.venue,
    );
    repo.update(&record).await?;

    let activity = repo
        .find_by_id(record.id)
        .await?
        .ok_or_else(|| ActivityError::NotFound {
            id: record.id.to_string(),
        })?;
    Ok(Json(ActivityDto::project(&activity)))
}

/// `DELETE /activities/{id}` (host only)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    host: RequireHost,
) -> Result<StatusCode, ActivityError> {
    let repo = ActivityRepository::new(state.db_pool.clone());
    repo.delete(host.activity_id).await?;
    tracing::info!(activity = %host.activity_id, host = %host.user.user_id, "activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /activities/{id}/cancel` (host only)
///
/// Toggles the cancelled flag.
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    host: RequireHost,
) -> Result<Json<ActivityDto>, ActivityError> {
    let repo = ActivityRepository::new(state.db_pool.clone());
    let cancelled = repo.toggle_cancelled(host.activity_id).await?;
    tracing::info!(activity = %host.activity_id, cancelled, "activity cancellation toggled");

    let activity =
        repo.find_by_id(host.activity_id)
            .await?
            .ok_or_else(|| ActivityError::NotFound {
                id: host.activity_id.to_string(),
            })?;
    Ok(Json(ActivityDto::project(&activity)))
}

/// `POST /activities/{id}/attend`
pub async fn attend(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, ActivityError> {
    let id = parse_id(&id)?;
    let activities = ActivityRepository::new(state.db_pool.clone());
    if activities.find_record(id).await?.is_none() {
        return Err(ActivityError::NotFound { id: id.to_string() });
    }

    let attendance = AttendanceRepository::new(state.db_pool.clone());
    attendance.join(user.user_id, id).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /activities/{id}/attend`
///
/// The host cannot leave their own activity; they can cancel or delete it.
pub async fn unattend(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, ActivityError> {
    let id = parse_id(&id)?;
    let attendance = AttendanceRepository::new(state.db_pool.clone());

    match attendance.find(user.user_id, id).await? {
        Some(rel) if rel.is_host => {
            return Err(ActivityError::HostCannotLeave { id: id.to_string() });
        }
        Some(_) => {
            attendance.leave(user.user_id, id).await?;
        }
        // Leaving an activity the user never joined is a no-op.
        None => {}
    }

    Ok(StatusCode::OK)
}
