//! Database repository for users and their photo collections.

use chrono::{DateTime, Utc};
use gatherly_activities::model::{Photo, UserProfile};
use gatherly_core::{PhotoId, UserId};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// A user record from the database.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// User ID.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Name shown in listings.
    pub display_name: String,
    /// Free-form bio.
    pub bio: Option<String>,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

/// Row type for user queries.
#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    display_name: String,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_record(self) -> Result<UserRecord, sqlx::Error> {
        let id = UserId::from_str(&self.id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid user id '{}': {}", self.id, e),
            )))
        })?;
        Ok(UserRecord {
            id,
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row type for photo queries.
#[derive(FromRow)]
struct PhotoRow {
    id: String,
    url: String,
    is_main: bool,
}

impl PhotoRow {
    fn try_into_photo(self) -> Result<Photo, sqlx::Error> {
        let id = PhotoId::from_str(&self.id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid photo id '{}': {}", self.id, e),
            )))
        })?;
        Ok(Photo {
            id,
            url: self.url,
            is_main: self.is_main,
        })
    }
}

/// Repository for user operations.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a user by their internal ID.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, display_name, bio, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into_record()?)),
            None => Ok(None),
        }
    }

    /// Loads a full profile (photos included) by username.
    pub async fn find_profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, display_name, bio, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let record = row.try_into_record()?;

        let photo_rows: Vec<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, url, is_main
            FROM photos
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(record.id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let photos = photo_rows
            .into_iter()
            .map(|p| p.try_into_photo())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(UserProfile {
            id: record.id,
            username: record.username,
            display_name: record.display_name,
            bio: record.bio,
            photos,
        }))
    }
}
