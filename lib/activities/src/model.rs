//! Domain types for activities and their attendees.

use chrono::{DateTime, Utc};
use gatherly_core::{ActivityId, PhotoId, UserId};

/// A photo in a user's profile collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Photo ID.
    pub id: PhotoId,
    /// Where the image is served from.
    pub url: String,
    /// Whether this is the profile's main photo.
    pub is_main: bool,
}

/// A user profile as seen by other attendees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User ID.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Name shown in listings.
    pub display_name: String,
    /// Free-form bio.
    pub bio: Option<String>,
    /// Uploaded photos. Zero or one of these is the main photo.
    pub photos: Vec<Photo>,
}

impl UserProfile {
    /// Returns the URL of the main photo, if the profile has one.
    #[must_use]
    pub fn main_photo_url(&self) -> Option<&str> {
        self.photos
            .iter()
            .find(|p| p.is_main)
            .map(|p| p.url.as_str())
    }
}

/// A user attending an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// The attendee's profile.
    pub profile: UserProfile,
    /// Whether this attendee hosts the activity.
    pub is_host: bool,
}

/// An activity with its attendees loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Activity ID.
    pub id: ActivityId,
    /// Title shown in listings.
    pub title: String,
    /// When the activity takes place.
    pub date: DateTime<Utc>,
    /// Longer description.
    pub description: String,
    /// Category label (e.g. "music", "travel").
    pub category: String,
    /// City where the activity happens.
    pub city: String,
    /// Venue within the city.
    pub venue: String,
    /// Whether the host has cancelled the activity.
    pub is_cancelled: bool,
    /// Everyone attending, host included.
    pub attendees: Vec<Attendee>,
}

impl Activity {
    /// Returns the host attendee, if one is present in the loaded graph.
    #[must_use]
    pub fn host(&self) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.is_host)
    }
}
