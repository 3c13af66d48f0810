//! Database repository for activities and their attendee graphs.

use chrono::{DateTime, Utc};
use gatherly_activities::model::{Activity, Attendee, Photo, UserProfile};
use gatherly_core::{ActivityId, PhotoId, UserId};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::str::FromStr;

/// A flat activity record, used for writes. Reads that feed the API go
/// through the graph-loading queries below instead.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    /// Activity ID.
    pub id: ActivityId,
    /// Title shown in listings.
    pub title: String,
    /// When the activity takes place.
    pub date: DateTime<Utc>,
    /// Longer description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// City where the activity happens.
    pub city: String,
    /// Venue within the city.
    pub venue: String,
    /// Whether the host has cancelled the activity.
    pub is_cancelled: bool,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a new activity record.
    #[must_use]
    pub fn new(
        title: String,
        date: DateTime<Utc>,
        description: String,
        category: String,
        city: String,
        venue: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ActivityId::new(),
            title,
            date,
            description,
            category,
            city,
            venue,
            is_cancelled: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies edited fields and bumps the update timestamp.
    pub fn apply_edit(
        &mut self,
        title: String,
        date: DateTime<Utc>,
        description: String,
        category: String,
        city: String,
        venue: String,
    ) {
        self.title = title;
        self.date = date;
        self.description = description;
        self.category = category;
        self.city = city;
        self.venue = venue;
        self.updated_at = Utc::now();
    }
}

/// Row type for activity queries.
#[derive(FromRow)]
struct ActivityRow {
    id: String,
    title: String,
    date: DateTime<Utc>,
    description: String,
    category: String,
    city: String,
    venue: String,
    is_cancelled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ActivityRow {
    fn try_into_record(self) -> Result<ActivityRecord, sqlx::Error> {
        let id = ActivityId::from_str(&self.id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid activity id '{}': {}", self.id, e),
            )))
        })?;
        Ok(ActivityRecord {
            id,
            title: self.title,
            date: self.date,
            description: self.description,
            category: self.category,
            city: self.city,
            venue: self.venue,
            is_cancelled: self.is_cancelled,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row type for attendee queries, joined with the user and their main photo.
#[derive(FromRow)]
struct AttendeeRow {
    activity_id: String,
    user_id: String,
    username: String,
    display_name: String,
    bio: Option<String>,
    is_host: bool,
    photo_id: Option<String>,
    photo_url: Option<String>,
}

impl AttendeeRow {
    fn try_into_attendee(self) -> Result<(String, Attendee), sqlx::Error> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid user id '{}': {}", self.user_id, e),
            )))
        })?;

        // Only the main photo is joined here; full collections load on the
        // profile route.
        let photos = match (self.photo_id, self.photo_url) {
            (Some(id), Some(url)) => {
                let id = PhotoId::from_str(&id).map_err(|e| {
                    sqlx::Error::Decode(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("invalid photo id '{}': {}", id, e),
                    )))
                })?;
                vec![Photo {
                    id,
                    url,
                    is_main: true,
                }]
            }
            _ => Vec::new(),
        };

        Ok((
            self.activity_id,
            Attendee {
                profile: UserProfile {
                    id: user_id,
                    username: self.username,
                    display_name: self.display_name,
                    bio: self.bio,
                    photos,
                },
                is_host: self.is_host,
            },
        ))
    }
}

const ATTENDEE_SELECT: &str = r#"
    SELECT
        aa.activity_id,
        aa.user_id,
        u.username,
        u.display_name,
        u.bio,
        aa.is_host,
        p.id as photo_id,
        p.url as photo_url
    FROM activity_attendees aa
    JOIN users u ON u.id = aa.user_id
    LEFT JOIN photos p ON p.user_id = u.id AND p.is_main
"#;

/// Repository for activity operations.
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Creates a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all activities with their attendee graphs, soonest first.
    pub async fn list(&self) -> Result<Vec<Activity>, sqlx::Error> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT id, title, date, description, category, city, venue,
                   is_cancelled, created_at, updated_at
            FROM activities
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .into_iter()
            .map(|r| r.try_into_record())
            .collect::<Result<Vec<_>, _>>()?;

        let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
        let attendee_rows: Vec<AttendeeRow> =
            sqlx::query_as(&format!("{ATTENDEE_SELECT} WHERE aa.activity_id = ANY($1)"))
                .bind(&ids)
                .fetch_all(&self.pool)
                .await?;

        let mut by_activity: HashMap<String, Vec<Attendee>> = HashMap::new();
        for row in attendee_rows {
            let (activity_id, attendee) = row.try_into_attendee()?;
            by_activity.entry(activity_id).or_default().push(attendee);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let attendees = by_activity
                    .remove(&record.id.to_string())
                    .unwrap_or_default();
                into_activity(record, attendees)
            })
            .collect())
    }

    /// Finds an activity with its attendee graph.
    pub async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>, sqlx::Error> {
        let Some(record) = self.find_record(id).await? else {
            return Ok(None);
        };

        let attendee_rows: Vec<AttendeeRow> =
            sqlx::query_as(&format!("{ATTENDEE_SELECT} WHERE aa.activity_id = $1"))
                .bind(id.to_string())
                .fetch_all(&self.pool)
                .await?;

        let attendees = attendee_rows
            .into_iter()
            .map(|r| r.try_into_attendee().map(|(_, a)| a))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(into_activity(record, attendees)))
    }

    /// Finds the flat activity record, without attendees.
    pub async fn find_record(
        &self,
        id: ActivityId,
    ) -> Result<Option<ActivityRecord>, sqlx::Error> {
        let row: Option<ActivityRow> = sqlx::query_as(
            r#"
            SELECT id, title, date, description, category, city, venue,
                   is_cancelled, created_at, updated_at
            FROM activities
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

    /// Creates an activity together with its host attendance record.
    ///
    /// Both inserts run in one transaction: the host flag is set exactly
    /// once, at creation, and an activity never exists without a host.
    pub async fn create(
        &self,
        activity: &ActivityRecord,
        host: UserId,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO activities
                (id, title, date, description, category, city, venue,
                 is_cancelled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(activity.id.to_string())
        .bind(&activity.title)
        .bind(activity.date)
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.city)
        .bind(&activity.venue)
        .bind(activity.is_cancelled)
        .bind(activity.created_at)
        .bind(activity.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO activity_attendees (activity_id, user_id, is_host, joined_at)
            VALUES ($1, $2, true, $3)
            "#,
        )
        .bind(activity.id.to_string())
        .bind(host.to_string())
        .bind(activity.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Updates an existing activity.
    pub async fn update(&self, activity: &ActivityRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE activities
            SET title = $2, date = $3, description = $4, category = $5,
                city = $6, venue = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(activity.id.to_string())
        .bind(&activity.title)
        .bind(activity.date)
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.city)
        .bind(&activity.venue)
        .bind(activity.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes an activity. Attendance rows go with it (cascade).
    pub async fn delete(&self, id: ActivityId) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Toggles the cancelled flag of an activity.
    pub async fn toggle_cancelled(&self, id: ActivityId) -> Result<bool, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            UPDATE activities
            SET is_cancelled = NOT is_cancelled, updated_at = NOW()
            WHERE id = $1
            RETURNING is_cancelled
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(c,)| c).unwrap_or(false))
    }
}

fn into_activity(record: ActivityRecord, attendees: Vec<Attendee>) -> Activity {
    Activity {
        id: record.id,
        title: record.title,
        date: record.date,
        description: record.description,
        category: record.category,
        city: record.city,
        venue: record.venue,
        is_cancelled: record.is_cancelled,
        attendees,
    }
}
