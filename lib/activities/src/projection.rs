//! Projection of domain graphs into API response payloads.
//!
//! Each target type gets an explicit mapping function so the semantics that
//! matter (locating the host attendee, locating the main photo) are visible
//! and testable, rather than hidden in a convention-based mapper.

use crate::model::{Activity, Attendee, UserProfile};
use chrono::{DateTime, Utc};
use gatherly_core::ActivityId;
use serde::Serialize;

/// An attendee as it appears in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeDto {
    /// Unique handle.
    pub username: String,
    /// Display name from the linked profile.
    pub display_name: String,
    /// Bio from the linked profile.
    pub bio: Option<String>,
    /// URL of the profile's main photo; absent when no main photo exists.
    pub image: Option<String>,
    /// Whether this attendee hosts the activity.
    pub is_host: bool,
}

impl AttendeeDto {
    /// Projects an attendee with its linked profile into the response shape.
    #[must_use]
    pub fn project(attendee: &Attendee) -> Self {
        Self {
            username: attendee.profile.username.clone(),
            display_name: attendee.profile.display_name.clone(),
            bio: attendee.profile.bio.clone(),
            image: attendee.profile.main_photo_url().map(str::to_string),
            is_host: attendee.is_host,
        }
    }
}

/// An activity as it appears in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityDto {
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
    /// Handle of the attendee flagged as host. Absent if the loaded graph
    /// has no host attendee.
    pub host_username: Option<String>,
    /// Everyone attending.
    pub attendees: Vec<AttendeeDto>,
}

impl ActivityDto {
    /// Projects an activity graph into the response shape.
    #[must_use]
    pub fn project(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title.clone(),
            date: activity.date,
            description: activity.description.clone(),
            category: activity.category.clone(),
            city: activity.city.clone(),
            venue: activity.venue.clone(),
            is_cancelled: activity.is_cancelled,
            host_username: activity.host().map(|a| a.profile.username.clone()),
            attendees: activity.attendees.iter().map(AttendeeDto::project).collect(),
        }
    }
}

/// A standalone profile as it appears in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Bio.
    pub bio: Option<String>,
    /// URL of the main photo; absent when no main photo exists.
    pub image: Option<String>,
}

impl ProfileDto {
    /// Projects a profile into the response shape.
    #[must_use]
    pub fn project(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            bio: profile.bio.clone(),
            image: profile.main_photo_url().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Photo;
    use gatherly_core::{PhotoId, UserId};

    fn profile(username: &str, photos: Vec<Photo>) -> UserProfile {
        UserProfile {
            id: UserId::new(),
            username: username.to_string(),
            display_name: format!("{} display", username),
            bio: Some("hello".to_string()),
            photos,
        }
    }

    fn photo(url: &str, is_main: bool) -> Photo {
        Photo {
            id: PhotoId::new(),
            url: url.to_string(),
            is_main,
        }
    }

    fn activity(attendees: Vec<Attendee>) -> Activity {
        Activity {
            id: ActivityId::new(),
            title: "City walk".to_string(),
            date: Utc::now(),
            description: "A walk around town".to_string(),
            category: "culture".to_string(),
            city: "Oslo".to_string(),
            venue: "Old town".to_string(),
            is_cancelled: false,
            attendees,
        }
    }

    #[test]
    fn host_username_comes_from_the_host_attendee() {
        let dto = ActivityDto::project(&activity(vec![
            Attendee {
                profile: profile("ann", vec![]),
                is_host: false,
            },
            Attendee {
                profile: profile("bob", vec![]),
                is_host: true,
            },
        ]));
        assert_eq!(dto.host_username.as_deref(), Some("bob"));
    }

    #[test]
    fn missing_host_attendee_is_tolerated() {
        let dto = ActivityDto::project(&activity(vec![Attendee {
            profile: profile("ann", vec![]),
            is_host: false,
        }]));
        assert_eq!(dto.host_username, None);
    }

    #[test]
    fn attendee_image_is_the_main_photo() {
        let dto = AttendeeDto::project(&Attendee {
            profile: profile(
                "ann",
                vec![
                    photo("https://img.example/one.png", false),
                    photo("https://img.example/two.png", true),
                ],
            ),
            is_host: false,
        });
        assert_eq!(dto.image.as_deref(), Some("https://img.example/two.png"));
    }

    #[test]
    fn attendee_without_main_photo_has_no_image() {
        let dto = AttendeeDto::project(&Attendee {
            profile: profile("ann", vec![photo("https://img.example/one.png", false)]),
            is_host: false,
        });
        assert_eq!(dto.image, None);
    }

    #[test]
    fn profile_projection_uses_main_photo() {
        let dto = ProfileDto::project(&profile(
            "ann",
            vec![photo("https://img.example/main.png", true)],
        ));
        assert_eq!(dto.image.as_deref(), Some("https://img.example/main.png"));
        assert_eq!(dto.username, "ann");
    }

    #[test]
    fn activity_dto_serializes() {
        let dto = ActivityDto::project(&activity(vec![Attendee {
            profile: profile("ann", vec![]),
            is_host: true,
        }]));
        let json = serde_json::to_value(&dto).expect("serialize");
        assert_eq!(json["host_username"], "ann");
        assert!(json["attendees"][0]["image"].is_null());
    }
}
