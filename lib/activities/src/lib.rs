//! Activity domain model and response projection for the gatherly platform.
//!
//! The domain types here describe activities and the people attending them;
//! `projection` shapes those graphs into the payloads the API returns.

pub mod model;
pub mod projection;

pub use model::{Activity, Attendee, Photo, UserProfile};
pub use projection::{ActivityDto, AttendeeDto, ProfileDto};
