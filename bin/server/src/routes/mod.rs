//! HTTP route handlers.

pub mod activities;
pub mod profiles;
