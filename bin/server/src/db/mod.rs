//! Database repositories for the gatherly server.

pub mod activity;
pub mod attendance;
pub mod user;

pub use activity::{ActivityRecord, ActivityRepository};
pub use attendance::AttendanceRepository;
pub use user::{UserRecord, UserRepository};
