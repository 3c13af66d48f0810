//! Database repository for attendance relationships.
//!
//! This repository also backs the host authorization gate: every check reads
//! the current committed row directly from Postgres, with no caching layer in
//! between, so a committed change to the host flag is observed by the next
//! check (the freshness contract of [`AttendanceStore`]).

use async_trait::async_trait;
use chrono::Utc;
use gatherly_authz::{AttendanceRelationship, AttendanceStore, AuthzError};
use gatherly_core::{ActivityId, UserId};
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// Row type for attendance queries.
#[derive(FromRow)]
struct AttendanceRow {
    user_id: String,
    activity_id: String,
    is_host: bool,
}

impl AttendanceRow {
    fn try_into_relationship(self) -> Result<AttendanceRelationship, sqlx::Error> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid user id '{}': {}", self.user_id, e),
            )))
        })?;
        let activity_id = ActivityId::from_str(&self.activity_id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid activity id '{}': {}", self.activity_id, e),
            )))
        })?;
        Ok(AttendanceRelationship::new(
            user_id,
            activity_id,
            self.is_host,
        ))
    }
}

/// Repository for attendance operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new attendance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the attendance relationship for a `(user, activity)` pair.
    ///
    /// At most one row exists per pair (primary key).
    pub async fn find(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<Option<AttendanceRelationship>, sqlx::Error> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT user_id, activity_id, is_host
            FROM activity_attendees
            WHERE user_id = $1 AND activity_id = $2
            "#,
        )
        .bind(user_id.to_string())
        .bind(activity_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into_relationship()?)),
            None => Ok(None),
        }
    }

    /// Adds the user as a non-host attendee. Joining an activity the user
    /// already attends is a no-op; an existing host row is never downgraded.
    pub async fn join(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO activity_attendees (activity_id, user_id, is_host, joined_at)
            VALUES ($1, $2, false, $3)
            ON CONFLICT (activity_id, user_id) DO NOTHING
            "#,
        )
        .bind(activity_id.to_string())
        .bind(user_id.to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a non-host attendance row. The host row is excluded here;
    /// callers reject host departures before reaching this query.
    pub async fn leave(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM activity_attendees
            WHERE user_id = $1 AND activity_id = $2 AND is_host = false
            "#,
        )
        .bind(user_id.to_string())
        .bind(activity_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn lookup(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
    ) -> Result<Option<AttendanceRelationship>, Report<AuthzError>> {
        self.find(user_id, activity_id)
            .await
            .map_err(|e| AuthzError::StoreUnavailable {
                details: e.to_string(),
            }
            .into())
    }
}
