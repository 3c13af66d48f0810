//! Database repository for sessions.

use chrono::{DateTime, Utc};
use gatherly_core::UserId;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// A session record from the database.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Opaque session ID (the cookie value).
    pub id: String,
    /// The authenticated user.
    pub user_id: UserId,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Row type for session queries.
#[derive(FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn try_into_record(self) -> Result<SessionRecord, sqlx::Error> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid user id '{}': {}", self.user_id, e),
            )))
        })?;
        Ok(SessionRecord {
            id: self.id,
            user_id,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

/// Repository for session operations.
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a session by ID.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>, sqlx::Error> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, expires_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into_record()?)),
            None => Ok(None),
        }
    }

    /// Deletes a session by ID (logout).
    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes expired sessions.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn session_expiry() {
        let expired = SessionRecord {
            id: "sess".to_string(),
            user_id: UserId::new(),
            created_at: Utc::now() - Duration::hours(2),
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(expired.is_expired());

        let live = SessionRecord {
            expires_at: Utc::now() + Duration::hours(1),
            ..expired
        };
        assert!(!live.is_expired());
    }
}
