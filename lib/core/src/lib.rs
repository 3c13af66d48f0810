//! Core domain types and utilities for the gatherly platform.
//!
//! This crate provides the foundational types and error handling shared
//! across the gatherly social activities platform.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ActivityId, ParseIdError, PhotoId, UserId};
