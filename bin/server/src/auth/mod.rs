//! Authentication and authorization plumbing for the gatherly server.
//!
//! This module provides:
//! - Database-backed session lookup (session issuance happens upstream in
//!   the identity provider integration; this server only consumes sessions)
//! - Authentication extractors for Axum routes
//! - The `RequireHost` extractor gating host-only activity operations
//!
//! # Authorization model
//!
//! Authentication establishes *who* is calling; the host check establishes
//! whether that caller owns the targeted activity. The check flows through
//! `gatherly-authz`: the attendance relationship is read fresh from Postgres
//! on every check, and any inability to establish the relationship resolves
//! to a denial, never an authorization.

pub mod db;
pub mod middleware;
pub mod routes;

pub use db::{SessionRecord, SessionRepository};
pub use middleware::{OptionalAuth, RequireAuth, RequireHost};
pub use routes::logout;

use gatherly_core::UserId;
use sqlx::PgPool;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Shared application state.
pub struct AppState {
    /// Database connection pool.
    pub db_pool: PgPool,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

/// A caller with a verified session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user's ID (the subject of every authorization check).
    pub user_id: UserId,
    /// The user's handle.
    pub username: String,
}
