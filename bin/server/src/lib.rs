//! HTTP API server for the gatherly activities platform.
//!
//! Users create activities, other users attend them, and the creator (the
//! host) keeps elevated permissions over the activity. Mutating routes are
//! gated on the host relationship via `gatherly-authz`.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
