//! Host authorization for gatherly activities.
//!
//! Activities are owned by their host: the attendee whose attendance record
//! carries the host flag. Mutating operations (edit, delete, cancel) are gated
//! on that relationship. This crate implements the whole decision path:
//! extracting the check context from a request, looking up the attendance
//! relationship, and deriving a verdict.
//!
//! The decision itself ([`decide`]) is a pure function so it can be tested in
//! isolation; [`HostGate`] wires it to an [`AttendanceStore`] and carries the
//! fail-closed and freshness contracts.

mod context;
mod decision;
mod error;
mod gate;
mod store;
mod types;

pub use context::{HostCheckContext, RESOURCE_ROUTE_PARAM};
pub use decision::decide;
pub use error::AuthzError;
pub use gate::HostGate;
pub use store::AttendanceStore;
pub use types::{AttendanceRelationship, Verdict};
